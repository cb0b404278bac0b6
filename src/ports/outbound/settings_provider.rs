/// SettingsProvider port for credential and exclusion settings
pub trait SettingsProvider: Send + Sync {
    /// Whether the scan server connection is configured
    fn are_credentials_set(&self) -> bool;

    /// Wildcard patterns of directories skipped by manifest discovery
    fn excluded_paths(&self) -> Vec<String>;
}
