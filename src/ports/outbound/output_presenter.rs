use crate::shared::Result;

/// OutputPresenter port for presenting the rendered scan report
///
/// Abstracts the destination (stdout, file) of the formatted trees.
pub trait OutputPresenter {
    /// Writes `content` to the destination
    ///
    /// # Errors
    /// Returns an error if writing fails
    fn present(&self, content: &str) -> Result<()>;
}
