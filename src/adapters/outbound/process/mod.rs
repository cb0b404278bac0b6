/// Process adapters invoking ecosystem tooling
mod command_package_manager;

pub use command_package_manager::CommandPackageManagerClient;
