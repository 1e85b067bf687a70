//! License file classification

use super::types::LicenseInfo;
use super::DetectionError;
use regex::{Regex, RegexBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// File names checked in order; the first one present decides
pub const LICENSE_CANDIDATES: &[&str] = &[
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "license",
    "LICENSE-MIT",
    "LICENCE",
];

/// Bytes read from the license file before matching
pub const LICENSE_READ_LIMIT: u64 = 2000;

/// Header phrase and resulting identifier, in priority order
const LICENSE_PHRASES: &[(&str, &str)] = &[
    ("mit license", "MIT"),
    ("apache license", "Apache-2.0"),
    ("gnu general public license", "GPL"),
];

const CUSTOM_LICENSE: &str = "Custom";

fn license_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        LICENSE_PHRASES
            .iter()
            .filter_map(|(phrase, name)| {
                RegexBuilder::new(&regex::escape(phrase))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, *name))
            })
            .collect()
    })
}

/// Maps license text to an identifier, `Custom` when nothing matches
pub fn classify_license_text(text: &str) -> &'static str {
    license_patterns()
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, name)| *name)
        .unwrap_or(CUSTOM_LICENSE)
}

pub fn detect_license(root: &Path) -> Result<LicenseInfo, DetectionError> {
    let Some(path) = LICENSE_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
    else {
        return Ok(LicenseInfo::default());
    };

    let mut head = Vec::new();
    File::open(&path)
        .and_then(|file| file.take(LICENSE_READ_LIMIT).read_to_end(&mut head))
        .map_err(|source| DetectionError::Io {
            path: path.clone(),
            source,
        })?;

    let name = classify_license_text(&String::from_utf8_lossy(&head));
    debug!(path = %path.display(), license = name, "License classified");

    Ok(LicenseInfo::named(name))
}
