use crate::takeover::domain::{DanglingDomain, TakeoverCandidate};

/// TakeoverReportFormatter renders audit findings as plain text
///
/// The results file holds one `name:version` line per candidate so it can be fed
/// straight into other tooling. The summary lines are the console wording.
pub struct TakeoverReportFormatter;

impl TakeoverReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Content of the results file, one `name:version` line per candidate
    pub fn results_file<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a TakeoverCandidate>,
    ) -> String {
        candidates
            .into_iter()
            .map(|candidate| format!("{}\n", candidate.as_line()))
            .collect()
    }

    /// Summary lines for the candidates of one ecosystem run
    pub fn takeover_summary<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a TakeoverCandidate>,
    ) -> Vec<String> {
        let lines: Vec<String> = candidates
            .into_iter()
            .map(|candidate| format!("[+] {} might be taken over !", candidate.as_line()))
            .collect();

        if lines.is_empty() {
            vec!["[+] No package can be taken over !".to_string()]
        } else {
            lines
        }
    }

    pub fn dangling_domain(&self, package: &str, finding: &DanglingDomain) -> String {
        format!(
            "The account associated to dependency {} is : {} and the domain {} might be purchased !",
            package, finding.email, finding.domain
        )
    }

    pub fn saved_to(&self, path: &std::path::Path) -> String {
        format!("Results saved to {} !", path.display())
    }
}

impl Default for TakeoverReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
