use crate::takeover::domain::{EmailTakeover, Ecosystem};
use crate::takeover::services::AnalysisOutcome;

/// AuditResponse - Internal response DTO for one ecosystem run
#[derive(Debug, Clone)]
pub struct AuditResponse {
    pub ecosystem: Ecosystem,
    /// Number of seed dependencies analyzed, after exclusions
    pub seed_count: usize,
    /// Number of seed dependencies removed by exclude patterns
    pub excluded_count: usize,
    pub outcome: AnalysisOutcome,
    /// Packages with at least one dangling maintainer domain
    pub email_takeovers: Vec<EmailTakeover>,
}

impl AuditResponse {
    /// A run that found nothing to analyze
    pub fn empty(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            seed_count: 0,
            excluded_count: 0,
            outcome: AnalysisOutcome::default(),
            email_takeovers: Vec::new(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.outcome.takeover.is_empty() || !self.email_takeovers.is_empty()
    }
}
