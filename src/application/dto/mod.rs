/// Data Transfer Objects for application layer
///
/// DTOs carry a scan request from the CLI into the use case and the
/// outcome back out, keeping the domain layer isolated.
mod output_format;
mod scan_request;
mod scan_response;

pub use output_format::OutputFormat;
pub use scan_request::ScanRequest;
pub use scan_response::ScanResponse;
