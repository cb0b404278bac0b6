/// Use cases module containing application business logic orchestration
mod scan_workspace;

pub use scan_workspace::ScanWorkspaceUseCase;
