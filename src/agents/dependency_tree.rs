use crate::error::{MajorGroupsError, Result};
use crate::grouping::DependencyMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEPENDENCY_TREE_HINT: &str =
    "To create it run: npm ls --depth=1 --json > npmlist.json";

/// Top level of `npm ls --json`.
#[derive(Debug, Deserialize)]
struct NpmListing {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, NpmListingNode>>,
}

/// One root package. Only the names of its own dependencies matter, so the
/// nested nodes are kept as raw JSON.
#[derive(Debug, Deserialize)]
struct NpmListingNode {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, serde_json::Value>>,
}

/// Reads the one-level dependency tree produced by `npm ls --depth=1 --json`.
pub struct DependencyTreeReader;

impl DependencyTreeReader {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<DependencyMap> {
        let path = path.as_ref();
        let unavailable = |reason: &dyn std::fmt::Display| {
            MajorGroupsError::input_unavailable(
                path.display().to_string(),
                reason,
                DEPENDENCY_TREE_HINT,
            )
        };

        let content = fs::read_to_string(path).map_err(|e| unavailable(&e))?;
        Self::parse(&content).map_err(|e| unavailable(&e))
    }

    pub fn parse(content: &str) -> Result<DependencyMap> {
        let listing: NpmListing = serde_json::from_str(content)?;

        Ok(listing
            .dependencies
            .unwrap_or_default()
            .into_iter()
            .map(|(root, node)| {
                let inner = node.dependencies.unwrap_or_default();
                (root, inner.into_keys().collect())
            })
            .collect())
    }
}
