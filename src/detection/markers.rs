//! Marker file and extension detection
//!
//! Root-level markers are plain existence checks. Recursive markers
//! (`**/index.html`, `**/*.rs`, ...) are answered from a single walk over the
//! whole tree, which does not follow symlinked directories.

use super::types::{Indicators, TechStack};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

const DOCKERFILE_NAMES: &[&str] = &["Dockerfile", "dockerfile"];
const COMPOSE_NAMES: &[&str] = &["docker-compose.yml", "compose.yaml", "compose.yml"];
const OPENAPI_NAMES: &[&str] = &[
    "openapi.yaml",
    "openapi.yml",
    "openapi.json",
    "swagger.yaml",
    "swagger.yml",
    "swagger.json",
];

/// Everything a single tree walk can tell us
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerScan {
    pub index_html: bool,
    pub package_json: bool,
    pub pyproject: bool,
    pub requirements: bool,
    pub dockerfile: bool,
    pub compose: bool,
    pub openapi: bool,
    pub javascript: bool,
    pub typescript: bool,
    pub go: bool,
    pub rust: bool,
}

impl MarkerScan {
    pub fn scan(root: &Path) -> Self {
        let exists = |name: &str| root.join(name).exists();
        let any_exists = |names: &[&str]| names.iter().any(|n| exists(n));

        let mut scan = Self {
            package_json: exists("package.json"),
            pyproject: exists("pyproject.toml"),
            requirements: exists("requirements.txt"),
            dockerfile: any_exists(DOCKERFILE_NAMES),
            compose: any_exists(COMPOSE_NAMES),
            openapi: any_exists(OPENAPI_NAMES),
            ..Self::default()
        };

        for entry in WalkDir::new(root).min_depth(1).into_iter().flatten() {
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            scan.observe(name);
        }

        debug!(root = %root.display(), markers = ?scan, "Marker scan complete");
        scan
    }

    /// Folds one entry name (at any depth) into the recursive markers
    fn observe(&mut self, name: &str) {
        match name {
            "index.html" => self.index_html = true,
            "Dockerfile" => self.dockerfile = true,
            "docker-compose.yml" => self.compose = true,
            _ => {}
        }

        if name.starts_with("openapi.") {
            self.openapi = true;
        }
        if name.ends_with(".js") {
            self.javascript = true;
        }
        if name.ends_with(".ts") || name.ends_with(".tsx") {
            self.typescript = true;
        }
        if name.ends_with(".go") {
            self.go = true;
        }
        if name.ends_with(".rs") {
            self.rust = true;
        }
    }

    pub fn python(&self) -> bool {
        self.pyproject || self.requirements
    }

    pub fn indicators(&self) -> Indicators {
        Indicators {
            index_html: self.index_html,
            node: self.package_json,
            python: self.python(),
            docker: self.dockerfile,
            compose: self.compose,
            openapi: self.openapi,
        }
    }

    /// Technology names in their fixed reporting order
    pub fn tech_stack(&self) -> TechStack {
        let mut stack = TechStack::new();

        if self.index_html {
            stack.extend(["HTML5", "CSS3"]);
        }
        if self.javascript {
            stack.push("JavaScript");
        }
        if self.typescript {
            stack.push("TypeScript");
        }
        if self.package_json {
            stack.push("Node.js");
        }
        if self.python() {
            stack.push("Python");
        }
        if self.go {
            stack.push("Go");
        }
        if self.rust {
            stack.push("Rust");
        }
        if self.dockerfile {
            stack.push("Docker");
        }

        stack
    }
}
