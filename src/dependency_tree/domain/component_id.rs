use super::ecosystem::ComponentPrefix;
use std::fmt;

/// Identifier of a component as understood by the scan service.
///
/// Rendered as `gav://group:artifact:version`, `npm://name:version` or
/// `go://path:version`. Equality covers prefix, name and version, which is
/// what the quick-scan cache keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    prefix: ComponentPrefix,
    name: String,
    version: String,
}

impl ComponentId {
    pub fn new(prefix: ComponentPrefix, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            prefix,
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn prefix(&self) -> ComponentPrefix {
        self.prefix
    }

    /// Package name without the version (`group:artifact` for GAV components)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}", self.prefix.as_str(), self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = ComponentId::new(ComponentPrefix::Gav, "org.slf4j:slf4j-api", "2.0.9");
        assert_eq!(id.to_string(), "gav://org.slf4j:slf4j-api:2.0.9");
    }

    #[test]
    fn test_equality_includes_version() {
        let a = ComponentId::new(ComponentPrefix::Npm, "react", "18.2.0");
        let b = ComponentId::new(ComponentPrefix::Npm, "react", "18.3.0");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
