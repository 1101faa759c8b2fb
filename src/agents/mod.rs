pub mod dependency_tree;
pub mod npm_execution;
pub mod report_parser;
pub mod result_writer;
pub mod version_source;

pub use dependency_tree::DependencyTreeReader;
pub use npm_execution::{NpmExecutionAgent, NpmSnapshot};
pub use report_parser::{ParsedReport, ReportSection, UpdateReportParser};
pub use result_writer::ResultWriter;
pub use version_source::{VersionSource, VersionSourceKind};
