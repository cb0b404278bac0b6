use crate::shared::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package-manager universe a tree or manager belongs to.
///
/// The set is closed: every match over it is exhaustive, so an unknown
/// manager type can only enter the system through `FromStr`, which fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Maven,
    Gradle,
    Npm,
    Go,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 4] = [
        Ecosystem::Maven,
        Ecosystem::Gradle,
        Ecosystem::Npm,
        Ecosystem::Go,
    ];

    /// Package type tag stored in `GeneralInfo`
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Maven => "maven",
            Ecosystem::Gradle => "gradle",
            Ecosystem::Npm => "npm",
            Ecosystem::Go => "go",
        }
    }

    /// Prefix used when building scan-service component identifiers
    pub fn component_prefix(&self) -> ComponentPrefix {
        match self {
            Ecosystem::Maven | Ecosystem::Gradle => ComponentPrefix::Gav,
            Ecosystem::Npm => ComponentPrefix::Npm,
            Ecosystem::Go => ComponentPrefix::Go,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maven" => Ok(Ecosystem::Maven),
            "gradle" => Ok(Ecosystem::Gradle),
            "npm" => Ok(Ecosystem::Npm),
            "go" => Ok(Ecosystem::Go),
            other => Err(ScanError::Validation {
                message: format!(
                    "Unknown package manager type '{}'. Expected one of: maven, gradle, npm, go",
                    other
                ),
            }),
        }
    }
}

/// Scheme part of a component identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentPrefix {
    Gav,
    Npm,
    Go,
}

impl ComponentPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentPrefix::Gav => "gav://",
            ComponentPrefix::Npm => "npm://",
            ComponentPrefix::Go => "go://",
        }
    }
}
