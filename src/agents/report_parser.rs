use crate::error::{MajorGroupsError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

pub const REPORT_HINT: &str =
    "To create it run: npx npm-check-updates --format group > npm-check-updates";

/// Package names are the first run of lowercase letters, `@`, `/` and `-` on
/// a line. Scoped names such as `@types/node` must keep matching.
const PACKAGE_NAME_PATTERN: &str = r"[a-z@/-]+";

/// Sections of a grouped npm-check-updates report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportSection {
    Patch,
    Minor,
    Major,
}

impl ReportSection {
    /// Checked in this order against header lines.
    pub const ALL: [ReportSection; 3] =
        [ReportSection::Patch, ReportSection::Minor, ReportSection::Major];

    pub fn label(self) -> &'static str {
        match self {
            ReportSection::Patch => "Patch",
            ReportSection::Minor => "Minor",
            ReportSection::Major => "Major",
        }
    }

    fn find_in(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| line.contains(section.label()))
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of parsing a grouped report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub sections: BTreeMap<ReportSection, Vec<String>>,
    /// Lines inside a section with no recognizable package name
    pub skipped_lines: Vec<String>,
    /// Non-empty lines outside any section (banners, hints)
    pub ignored_lines: Vec<String>,
}

impl ParsedReport {
    /// Names listed under `section`, or `None` if the report had no such header.
    pub fn section(&self, section: ReportSection) -> Option<&[String]> {
        self.sections.get(&section).map(Vec::as_slice)
    }

    pub fn major(&self) -> Option<&[String]> {
        self.section(ReportSection::Major)
    }
}

/// Parses the text produced by `npm-check-updates --format group`.
pub struct UpdateReportParser {
    package_name: Regex,
}

impl UpdateReportParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            package_name: Regex::new(PACKAGE_NAME_PATTERN)?,
        })
    }

    /// Read and parse the report file.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<ParsedReport> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MajorGroupsError::input_unavailable(path.display().to_string(), e, REPORT_HINT)
        })?;
        Ok(self.parse(&content))
    }

    pub fn parse(&self, content: &str) -> ParsedReport {
        let mut report = ParsedReport::default();
        let mut active: Option<ReportSection> = None;

        for line in content.lines() {
            match active {
                Some(section) => {
                    if line.is_empty() {
                        active = None;
                        continue;
                    }

                    match self.package_name.find(line) {
                        Some(found) => report
                            .sections
                            .entry(section)
                            .or_default()
                            .push(found.as_str().to_string()),
                        None => report.skipped_lines.push(line.to_string()),
                    }
                }
                None => match ReportSection::find_in(line) {
                    Some(section) => {
                        report.sections.entry(section).or_default();
                        active = Some(section);
                    }
                    None => {
                        if !line.trim().is_empty() {
                            report.ignored_lines.push(line.to_string());
                        }
                    }
                },
            }
        }

        report
    }
}
