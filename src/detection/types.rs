//! Signal types produced by the tech detector

use serde::Serialize;

/// Boolean flags for each marker the detector looks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    /// An `index.html` exists anywhere in the tree
    pub index_html: bool,
    /// `package.json` at the root
    pub node: bool,
    /// `pyproject.toml` or `requirements.txt` at the root
    pub python: bool,
    /// A Dockerfile at the root or any `Dockerfile` below it
    pub docker: bool,
    /// A compose file
    pub compose: bool,
    /// An OpenAPI or Swagger document
    pub openapi: bool,
}

/// Technology names in first-detected order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TechStack(Vec<String>);

impl TechStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` unless it is already present
    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.0.contains(&name) {
            self.0.push(name);
        }
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fenced shell snippet in the quick-start section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub lang: String,
    pub code: String,
}

impl CodeBlock {
    pub fn bash(code: impl Into<String>) -> Self {
        Self {
            lang: "bash".to_string(),
            code: code.into(),
        }
    }
}

/// Suggested getting-started recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuickStart {
    pub steps: Vec<String>,
    pub code_blocks: Vec<CodeBlock>,
}

/// Detected license. Serializes to `{}` when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LicenseInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Everything the deterministic detector knows about a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalSet {
    pub indicators: Indicators,
    pub tech_stack: TechStack,
    pub quick_start: QuickStart,
    pub license: LicenseInfo,
    pub project_structure: String,
}
