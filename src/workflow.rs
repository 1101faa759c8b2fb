use crate::agents::{
    DependencyTreeReader, NpmExecutionAgent, NpmSnapshot, ParsedReport, ReportSection,
    ResultWriter, UpdateReportParser, VersionSource, VersionSourceKind,
};
use crate::cli::InputFiles;
use crate::error::Result;
use crate::grouping::{DependencyMap, GroupingInput, GroupingOutcome, GroupingPipeline, VersionMap};
use crate::utils::path_validator::PathValidator;
use colored::Colorize;
use std::path::{Path, PathBuf};

const VERBOSE_ENV: &str = "MAJOR_GROUPS_VERBOSE";

fn is_verbose() -> bool {
    std::env::var(VERBOSE_ENV).is_ok()
}

fn verbose(message: &str) {
    if is_verbose() {
        eprintln!("[VERBOSE] {}", message);
    }
}

fn warn(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Everything read from disk for one grouping run.
///
/// A field is `None` when its source was missing or unreadable; the warning
/// has already been printed by then.
#[derive(Debug, Default)]
pub struct LoadedInputs {
    pub report: Option<ParsedReport>,
    pub dependencies: Option<DependencyMap>,
    pub current_versions: Option<VersionMap>,
    pub target_versions: Option<VersionMap>,
}

impl LoadedInputs {
    pub fn grouping_input(&self) -> GroupingInput<'_> {
        GroupingInput {
            dependencies: self.dependencies.as_ref(),
            major_targets: self.report.as_ref().and_then(ParsedReport::major),
            current_versions: self.current_versions.as_ref(),
            target_versions: self.target_versions.as_ref(),
        }
    }
}

/// Execute the group workflow
pub fn execute_group<P: AsRef<Path>>(
    project_path: P,
    inputs: &InputFiles,
    output: &Path,
    dry_run: bool,
) -> Result<Option<PathBuf>> {
    println!("{}", "Grouping related major updates...".cyan().bold());

    let project_path = PathValidator::validate_project_path(project_path)?;
    verbose(&format!("Project directory: {}", project_path.display()));

    let loaded = load_inputs(&project_path, inputs)?;

    println!("\n{}", "5. Grouping related packages...".yellow());
    let outcome = GroupingPipeline::run(loaded.grouping_input());
    println!(
        "   {} related package(s), {} node(s), {} link(s), {} group(s)",
        outcome.relations.len(),
        outcome.graph.node_count(),
        outcome.graph.edge_count(),
        outcome.group_count()
    );

    if outcome.groups.is_none() {
        warn("Version information is unavailable, no grouped result was produced");
    }

    print_groups(&outcome);

    if dry_run {
        println!("\n{}", "Dry run: result file not written".dimmed());
        return Ok(None);
    }

    println!("\n{}", "6. Writing result...".yellow());
    let writer = ResultWriter::new(&project_path);
    let written = writer.write(output, outcome.groups.as_deref())?;
    println!(
        "{}",
        format!("✓ Result written to {}", written.display()).green()
    );

    Ok(Some(written))
}

/// Read every input, degrading each unreadable one to `None`.
pub fn load_inputs(project_path: &Path, inputs: &InputFiles) -> Result<LoadedInputs> {
    let resolve = |file: &Path| PathValidator::resolve_in_project(file, project_path);

    println!("\n{}", "1. Reading update report...".yellow());
    let parser = UpdateReportParser::new()?;
    let report = match parser.read(resolve(&inputs.report)) {
        Ok(report) => {
            for line in &report.skipped_lines {
                warn(&format!("Package name not found in line: {}", line.trim_end()));
            }
            for line in &report.ignored_lines {
                verbose(&format!("Section header not found in line: {}", line));
            }
            match report.major() {
                Some(names) => println!("   Found {} major update(s)", names.len()),
                None => println!("   {}", "No major section in the report".dimmed()),
            }
            Some(report)
        }
        Err(e) => {
            warn(&e.to_string());
            None
        }
    };

    println!("\n{}", "2. Reading dependency tree...".yellow());
    let dependencies = match DependencyTreeReader::read(resolve(&inputs.tree)) {
        Ok(deps) => {
            println!("   Found {} root package(s)", deps.len());
            Some(deps)
        }
        Err(e) => {
            warn(&e.to_string());
            None
        }
    };

    println!("\n{}", "3. Reading current versions...".yellow());
    let current_versions =
        read_versions(&resolve(&inputs.manifest), VersionSourceKind::Current);

    println!("\n{}", "4. Reading target versions...".yellow());
    let target_versions = read_versions(&resolve(&inputs.updates), VersionSourceKind::Target);

    Ok(LoadedInputs {
        report,
        dependencies,
        current_versions,
        target_versions,
    })
}

fn read_versions(path: &Path, kind: VersionSourceKind) -> Option<VersionMap> {
    match VersionSource::read(path, kind) {
        Ok(source) => {
            let merged = source.merged();
            println!("   Found {} version(s)", merged.len());
            Some(merged)
        }
        Err(e) => {
            warn(&e.to_string());
            None
        }
    }
}

fn print_groups(outcome: &GroupingOutcome) {
    let Some(groups) = &outcome.groups else {
        return;
    };

    if groups.is_empty() {
        println!("\n{}", "✨ No related major updates found".green().bold());
        return;
    }

    println!("\n{}", "📦 Isolated package groups:".cyan().bold());
    for (index, group) in groups.iter().enumerate() {
        println!(
            "\n{} ({} package(s))",
            format!("Group {}", index + 1).cyan().bold(),
            group.len()
        );
        for entry in group {
            println!("  • {}", entry.white());
        }
    }
}

/// Execute the sections workflow - display what the update report contains
pub fn execute_sections<P: AsRef<Path>>(project_path: P, report: &Path) -> Result<()> {
    let project_path = PathValidator::validate_project_path(project_path)?;
    println!("{}", "Reading update report...".cyan().bold());

    let parser = UpdateReportParser::new()?;
    let parsed = parser.read(PathValidator::resolve_in_project(report, &project_path))?;

    for line in &parsed.skipped_lines {
        warn(&format!("Package name not found in line: {}", line.trim_end()));
    }

    for section in ReportSection::ALL {
        println!("\n{}", format!("{}:", section).yellow().bold());
        match parsed.section(section) {
            Some([]) => println!("  {}", "(empty)".dimmed()),
            Some(names) => {
                for name in names {
                    println!("  • {}", name.cyan());
                }
            }
            None => println!("  {}", "(section not present)".dimmed()),
        }
    }

    Ok(())
}

/// Execute the prepare workflow - regenerate the npm-derived inputs
pub fn execute_prepare<P: AsRef<Path>>(
    project_path: P,
    inputs: &InputFiles,
    skip_npm_check: bool,
) -> Result<()> {
    let project_path = PathValidator::validate_project_path(project_path)?;
    println!("{}", "Regenerating npm inputs...".cyan().bold());

    let agent = NpmExecutionAgent::new(&project_path);

    if !skip_npm_check {
        let version = agent.ensure_npm_available()?;
        println!("{}", format!("✓ npm {} is available", version).green());
    }

    for (step, snapshot) in NpmSnapshot::ALL.into_iter().enumerate() {
        let destination = PathValidator::validate_output_path(
            snapshot_file(inputs, snapshot),
            &project_path,
        )?;
        println!(
            "\n{}",
            format!("{}. {}", step + 1, snapshot.command_line()).yellow()
        );
        agent.capture(snapshot, &destination)?;
        println!(
            "{}",
            format!("✓ Saved {}", destination.display()).green()
        );
    }

    println!(
        "\n{}",
        "✨ Inputs are ready, run `major-groups group` next".green().bold()
    );
    Ok(())
}

fn snapshot_file(inputs: &InputFiles, snapshot: NpmSnapshot) -> &Path {
    match snapshot {
        NpmSnapshot::UpdateReport => inputs.report.as_path(),
        NpmSnapshot::DependencyTree => inputs.tree.as_path(),
        NpmSnapshot::TargetVersions => inputs.updates.as_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::tempdir;

    const REPORT: &str = "\
Major   Potentially breaking API changes
 eslint      ^8.4.0  →  ^9.0.0
 typescript  ^4.9.5  →  ^5.4.0
";

    const TREE: &str = r#"{
  "dependencies": {
    "app": { "dependencies": { "eslint": {}, "lodash": {} } },
    "tool": { "dependencies": { "eslint": {}, "typescript": {} } },
    "other": { "dependencies": { "lodash": {} } }
  }
}"#;

    const MANIFEST: &str = r#"{ "devDependencies": { "eslint": "8.4.0" } }"#;
    const UPDATES: &str = r#"{ "devDependencies": { "eslint": "9.0.0" } }"#;

    fn write_project(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    fn read_result(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn group_writes_related_packages_together() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            &[
                ("npm-check-updates", REPORT),
                ("npmlist.json", TREE),
                ("package.json", MANIFEST),
                ("package-updates.json", UPDATES),
            ],
        );

        let written = execute_group(
            dir.path(),
            &InputFiles::default(),
            Path::new("result.json"),
            false,
        )
        .unwrap()
        .unwrap();

        let groups: Vec<Vec<String>> = serde_json::from_value(read_result(&written)).unwrap();
        assert_eq!(groups.len(), 1);
        let entries: BTreeSet<&str> = groups[0].iter().map(String::as_str).collect();
        let expected: BTreeSet<&str> = [
            "app: undefined -> undefined",
            "tool: undefined -> undefined",
            "eslint: 8.4.0 -> 9.0.0",
            "typescript: undefined -> undefined",
        ]
        .into_iter()
        .collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn missing_report_still_writes_empty_result() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            &[
                ("npmlist.json", TREE),
                ("package.json", MANIFEST),
                ("package-updates.json", UPDATES),
            ],
        );

        let written = execute_group(
            dir.path(),
            &InputFiles::default(),
            Path::new("result.json"),
            false,
        )
        .unwrap()
        .unwrap();

        assert_eq!(read_result(&written), serde_json::json!([]));
    }

    #[test]
    fn empty_major_section_writes_empty_result_without_version_files() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            &[
                ("npm-check-updates", "Major   Potentially breaking API changes\n\n"),
                ("npmlist.json", r#"{ "dependencies": {} }"#),
            ],
        );

        let written = execute_group(
            dir.path(),
            &InputFiles::default(),
            Path::new("result.json"),
            false,
        )
        .unwrap()
        .unwrap();

        assert_eq!(read_result(&written), serde_json::json!([]));
    }

    #[test]
    fn unreadable_target_versions_write_null() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            &[
                ("npm-check-updates", REPORT),
                ("npmlist.json", TREE),
                ("package.json", MANIFEST),
                ("package-updates.json", "not json"),
            ],
        );

        let written = execute_group(
            dir.path(),
            &InputFiles::default(),
            Path::new("result.json"),
            false,
        )
        .unwrap()
        .unwrap();

        assert_eq!(read_result(&written), serde_json::Value::Null);
    }

    #[test]
    fn dry_run_does_not_write() {
        let dir = tempdir().unwrap();
        write_project(dir.path(), &[("npm-check-updates", REPORT)]);

        let written = execute_group(
            dir.path(),
            &InputFiles::default(),
            Path::new("result.json"),
            true,
        )
        .unwrap();

        assert!(written.is_none());
        assert!(!dir.path().join("result.json").exists());
    }

    #[test]
    fn load_inputs_degrades_missing_files_to_none() {
        let dir = tempdir().unwrap();
        write_project(dir.path(), &[("package.json", MANIFEST)]);

        let loaded = load_inputs(dir.path(), &InputFiles::default()).unwrap();

        assert!(loaded.report.is_none());
        assert!(loaded.dependencies.is_none());
        assert!(loaded.target_versions.is_none());
        assert_eq!(loaded.current_versions.unwrap()["eslint"], "8.4.0");
    }

    #[test]
    fn sections_requires_a_readable_report() {
        let dir = tempdir().unwrap();
        assert!(execute_sections(dir.path(), Path::new("npm-check-updates")).is_err());

        write_project(dir.path(), &[("npm-check-updates", REPORT)]);
        assert!(execute_sections(dir.path(), Path::new("npm-check-updates")).is_ok());
    }
}
