pub mod domain_takeover_checker;
pub mod package_filter;
pub mod takeover_analyzer;

pub use domain_takeover_checker::DomainTakeoverChecker;
pub use package_filter::PackageFilter;
pub use takeover_analyzer::{AnalysisOutcome, TakeoverAnalyzer, DEFAULT_PACKAGE_LIMIT};
