use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "major-groups",
    about = "Groups npm packages that need major updates so related ones are upgraded together",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub path: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the groups of related major updates and write them as JSON
    Group {
        #[command(flatten)]
        inputs: InputFiles,

        /// Where to write the grouped result
        #[arg(short, long, default_value = "result.json")]
        output: PathBuf,

        /// Print the groups without writing the result file
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the packages listed in each section of the update report
    Sections {
        /// Output of `npx npm-check-updates --format group`
        #[arg(long, default_value = "npm-check-updates")]
        report: PathBuf,
    },

    /// Regenerate the npm-derived input files in the project directory
    Prepare {
        #[command(flatten)]
        inputs: InputFiles,

        /// Do not check that npm can be launched before running the commands
        #[arg(long)]
        skip_npm_check: bool,
    },
}

/// Locations of the files the grouping reads, relative to the project path
#[derive(Args, Debug, Clone)]
pub struct InputFiles {
    /// Output of `npx npm-check-updates --format group`
    #[arg(long, default_value = "npm-check-updates")]
    pub report: PathBuf,

    /// Output of `npm ls --depth=1 --json`
    #[arg(long, default_value = "npmlist.json")]
    pub tree: PathBuf,

    /// Manifest holding the current versions
    #[arg(long, default_value = "package.json")]
    pub manifest: PathBuf,

    /// Output of `npx npm-check-updates --jsonAll`
    #[arg(long, default_value = "package-updates.json")]
    pub updates: PathBuf,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            report: PathBuf::from("npm-check-updates"),
            tree: PathBuf::from("npmlist.json"),
            manifest: PathBuf::from("package.json"),
            updates: PathBuf::from("package-updates.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_uses_conventional_file_names() {
        let cli = Cli::parse_from(["major-groups", "group"]);

        match cli.command {
            Commands::Group {
                inputs,
                output,
                dry_run,
            } => {
                assert_eq!(inputs.report, PathBuf::from("npm-check-updates"));
                assert_eq!(inputs.tree, PathBuf::from("npmlist.json"));
                assert_eq!(inputs.manifest, PathBuf::from("package.json"));
                assert_eq!(inputs.updates, PathBuf::from("package-updates.json"));
                assert_eq!(output, PathBuf::from("result.json"));
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.path, ".");
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from([
            "major-groups",
            "group",
            "--dry-run",
            "--tree",
            "deps/npmlist.json",
            "-p",
            "web",
            "-v",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.path, "web");
        match cli.command {
            Commands::Group { inputs, dry_run, .. } => {
                assert!(dry_run);
                assert_eq!(inputs.tree, PathBuf::from("deps/npmlist.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
