//! Deterministic technology detection
//!
//! Everything here is a pure function of the directory tree: no model calls,
//! no network. The result is a [`SignalSet`] that feeds the README template
//! directly.
//!
//! # Example
//!
//! ```no_run
//! use readmegen::detection::detect_signals;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let signals = detect_signals(Path::new("."))?;
//! println!("Stack: {:?}", signals.tech_stack.as_slice());
//! println!("{}", signals.project_structure);
//! # Ok(())
//! # }
//! ```

pub mod license;
pub mod markers;
pub mod quick_start;
pub mod structure;
pub mod types;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub use license::{classify_license_text, detect_license};
pub use markers::MarkerScan;
pub use quick_start::select_quick_start;
pub use structure::project_structure;
pub use types::{CodeBlock, Indicators, LicenseInfo, QuickStart, SignalSet, TechStack};

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Computes the full signal set for a project root
pub fn detect_signals(root: &Path) -> Result<SignalSet, DetectionError> {
    let markers = MarkerScan::scan(root);

    let signals = SignalSet {
        indicators: markers.indicators(),
        tech_stack: markers.tech_stack(),
        quick_start: select_quick_start(&markers),
        license: detect_license(root)?,
        project_structure: project_structure(root)?,
    };

    info!(
        root = %root.display(),
        tech_stack = ?signals.tech_stack.as_slice(),
        license = ?signals.license.name,
        "Detected project signals"
    );

    Ok(signals)
}
