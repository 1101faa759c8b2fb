use crate::error::{MajorGroupsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Inputs that can be regenerated with npm tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpmSnapshot {
    /// `npx npm-check-updates --format group`
    UpdateReport,
    /// `npm ls --depth=1 --json`
    DependencyTree,
    /// `npx npm-check-updates --jsonAll`
    TargetVersions,
}

impl NpmSnapshot {
    pub const ALL: [NpmSnapshot; 3] = [
        NpmSnapshot::UpdateReport,
        NpmSnapshot::DependencyTree,
        NpmSnapshot::TargetVersions,
    ];

    fn program(self) -> &'static str {
        match (self, cfg!(target_os = "windows")) {
            (NpmSnapshot::DependencyTree, false) => "npm",
            (NpmSnapshot::DependencyTree, true) => "npm.cmd",
            (_, false) => "npx",
            (_, true) => "npx.cmd",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            NpmSnapshot::UpdateReport => &["npm-check-updates", "--format", "group"],
            NpmSnapshot::DependencyTree => &["ls", "--depth=1", "--json"],
            NpmSnapshot::TargetVersions => &["npm-check-updates", "--jsonAll"],
        }
    }

    /// Human readable command line, for logs.
    pub fn command_line(self) -> String {
        format!("{} {}", self.program(), self.args().join(" "))
    }

    /// `npm ls` exits non-zero on peer or extraneous problems but still prints
    /// the full tree.
    fn accepts_failed_exit(self, stdout: &[u8]) -> bool {
        self == NpmSnapshot::DependencyTree
            && serde_json::from_slice::<serde_json::Value>(stdout).is_ok()
    }
}

/// Runs npm tooling in the project directory and stores the captured output.
pub struct NpmExecutionAgent {
    project_path: PathBuf,
}

impl NpmExecutionAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Run the command for `snapshot` and write its stdout to `destination`.
    pub fn capture<P: AsRef<Path>>(&self, snapshot: NpmSnapshot, destination: P) -> Result<()> {
        let destination = destination.as_ref();
        let output = self.run(snapshot.program(), snapshot.args())?;

        if !output.status.success() && !snapshot.accepts_failed_exit(&output.stdout) {
            return Err(MajorGroupsError::NpmExecution(format!(
                "'{}' failed with exit code {}: {}",
                snapshot.command_line(),
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        fs::write(destination, &output.stdout).map_err(|e| {
            MajorGroupsError::OutputWrite(format!(
                "Failed to write '{}': {e}",
                destination.display()
            ))
        })
    }

    /// Check that `npm` can be launched at all.
    pub fn ensure_npm_available(&self) -> Result<String> {
        let program = NpmSnapshot::DependencyTree.program();
        let output = self.run(program, &["--version"])?;
        if !output.status.success() {
            return Err(MajorGroupsError::NpmExecution(format!(
                "'{program} --version' failed"
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        if std::env::var("MAJOR_GROUPS_VERBOSE").is_ok() {
            eprintln!("[VERBOSE] Executing: {} {}", program, args.join(" "));
        }

        Command::new(program)
            .current_dir(&self.project_path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                MajorGroupsError::NpmExecution(format!(
                    "Failed to execute '{} {}': {e}",
                    program,
                    args.join(" ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_lines_match_documented_remediation() {
        let prefix = |s: &str| s.trim_end_matches(".cmd").to_string();

        let report = NpmSnapshot::UpdateReport.command_line();
        assert!(report.ends_with("npm-check-updates --format group"));
        assert_eq!(prefix(report.split(' ').next().unwrap()), "npx");

        assert!(
            NpmSnapshot::DependencyTree
                .command_line()
                .ends_with("ls --depth=1 --json")
        );
        assert!(
            NpmSnapshot::TargetVersions
                .command_line()
                .ends_with("npm-check-updates --jsonAll")
        );
    }

    #[test]
    fn only_dependency_tree_tolerates_failed_exit_with_json() {
        let json = br#"{ "dependencies": {} }"#;

        assert!(NpmSnapshot::DependencyTree.accepts_failed_exit(json));
        assert!(!NpmSnapshot::DependencyTree.accepts_failed_exit(b"npm ERR! missing"));
        assert!(!NpmSnapshot::TargetVersions.accepts_failed_exit(json));
    }

    #[test]
    fn missing_program_is_reported() {
        let agent = NpmExecutionAgent::new(std::env::temp_dir());
        let err = agent
            .run("major-groups-no-such-program", &["--version"])
            .unwrap_err();

        assert!(matches!(err, MajorGroupsError::NpmExecution(_)));
    }
}
