use crate::application::orchestrator::SkipReason;
use crate::application::read_models::ScanReport;

/// ScanResponse - outcome of the workspace scan use case
#[derive(Debug)]
pub enum ScanResponse {
    /// The request was refused; the reason was already reported to the user
    Skipped(SkipReason),
    Completed(Box<ScanReport>),
}

impl ScanResponse {
    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            ScanResponse::Completed(report) => Some(report),
            ScanResponse::Skipped(_) => None,
        }
    }
}
