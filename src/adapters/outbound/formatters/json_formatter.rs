use crate::application::read_models::ScanReport;
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering the whole report as pretty JSON
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl TreeFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }
}
