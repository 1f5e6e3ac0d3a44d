use crate::shared::Result;

/// OutputPresenter port for writing the takeover results file
///
/// This port abstracts where the `name:version` result lines end up
/// (a file on disk, stdout, or a capture buffer in tests).
pub trait OutputPresenter {
    /// Writes the formatted results to the destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link or its directory does not exist
    fn present(&self, content: &str) -> Result<()>;
}
