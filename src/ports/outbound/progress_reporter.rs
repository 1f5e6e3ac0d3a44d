/// ProgressReporter port for user-facing progress and findings
///
/// Diagnostics go through `tracing`; this port carries what the user is meant
/// to read: progress through the seed list, findings and the final summary.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a list
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Items expected
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a finding (takeover candidate, dangling domain) that should stand out
    fn report_finding(&self, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
