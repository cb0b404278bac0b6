/// Network adapters for the remote scan service
mod cvss;
mod osv_scan_service;

pub use osv_scan_service::OsvScanService;
