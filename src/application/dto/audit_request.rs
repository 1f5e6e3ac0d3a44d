use crate::takeover::domain::{DependencyRecord, Ecosystem};
use std::path::PathBuf;

/// Where the seed dependencies of an audit come from
#[derive(Debug, Clone)]
pub enum DependencySource {
    /// Scan the manifests below a project directory
    Project(PathBuf),
    /// Audit one dependency given on the command line
    Single(DependencyRecord),
}

/// AuditRequest - Internal request DTO for one ecosystem run
#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub ecosystem: Ecosystem,
    pub source: DependencySource,
    /// Report takeover and namespaced findings as they are found
    pub print_takeover: bool,
    /// Also look for dangling maintainer email domains
    pub check_email: bool,
    /// Glob patterns for seed dependencies to leave out
    pub exclude_patterns: Vec<String>,
}

impl AuditRequest {
    pub fn new(ecosystem: Ecosystem, source: DependencySource) -> Self {
        Self {
            ecosystem,
            source,
            print_takeover: false,
            check_email: false,
            exclude_patterns: Vec::new(),
        }
    }

    pub fn with_print_takeover(mut self, print_takeover: bool) -> Self {
        self.print_takeover = print_takeover;
        self
    }

    pub fn with_check_email(mut self, check_email: bool) -> Self {
        self.check_email = check_email;
        self
    }

    pub fn with_exclude_patterns(mut self, exclude_patterns: Vec<String>) -> Self {
        self.exclude_patterns = exclude_patterns;
        self
    }
}
