use crate::application::read_models::ScanReport;
use crate::shared::Result;

/// TreeFormatter port for rendering filtered project trees
pub trait TreeFormatter {
    /// Renders every project projection of `report`
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &ScanReport) -> Result<String>;
}
