/// Plain-text rendering of audit findings
mod takeover_report_formatter;

pub use takeover_report_formatter::TakeoverReportFormatter;
