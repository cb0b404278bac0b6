use super::component_id::ComponentId;
use super::ecosystem::Ecosystem;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Descriptive metadata attached to every dependency node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralInfo {
    group_id: Option<String>,
    artifact_id: String,
    version: String,
    package_type: Ecosystem,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

impl GeneralInfo {
    pub fn new(artifact_id: impl Into<String>, version: impl Into<String>, package_type: Ecosystem) -> Self {
        Self {
            group_id: None,
            artifact_id: artifact_id.into(),
            version: version.into(),
            package_type,
            path: None,
        }
    }

    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_optional_group(mut self, group_id: Option<String>) -> Self {
        self.group_id = group_id;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn package_type(&self) -> Ecosystem {
        self.package_type
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Scan-service identifier for this package
    pub fn component_id(&self) -> ComponentId {
        let name = match &self.group_id {
            Some(group) if !group.is_empty() => format!("{}:{}", group, self.artifact_id),
            _ => self.artifact_id.clone(),
        };
        ComponentId::new(self.package_type.component_prefix(), name, self.version.clone())
    }
}
