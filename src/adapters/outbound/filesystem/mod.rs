/// Filesystem adapters: manifest discovery, workspace model, report output
mod file_writer;
mod package_file_finder;
mod workspace_model_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use package_file_finder::PackageFileFinder;
pub use workspace_model_reader::{EmptyWorkspace, JsonWorkspaceModel, WORKSPACE_MODEL_FILE_NAME};
