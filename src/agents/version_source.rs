use crate::error::{MajorGroupsError, Result};
use crate::grouping::VersionMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_HINT: &str =
    "Make sure package.json exists and lists the package versions";
pub const UPDATES_HINT: &str =
    "To create it run: npx npm-check-updates --jsonAll > package-updates.json";

/// Which side of the upgrade a source describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSourceKind {
    /// `package.json`: what is installed today
    Current,
    /// `npm-check-updates --jsonAll`: what the upgrade would move to
    Target,
}

impl VersionSourceKind {
    pub fn hint(self) -> &'static str {
        match self {
            VersionSourceKind::Current => MANIFEST_HINT,
            VersionSourceKind::Target => UPDATES_HINT,
        }
    }
}

/// The two version maps of a package manifest.
///
/// Both the manifest and the `--jsonAll` report share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionSource {
    #[serde(default)]
    pub dependencies: Option<VersionMap>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Option<VersionMap>,
}

impl VersionSource {
    pub fn read<P: AsRef<Path>>(path: P, kind: VersionSourceKind) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |reason: &dyn std::fmt::Display| {
            MajorGroupsError::input_unavailable(path.display().to_string(), reason, kind.hint())
        };

        let content = fs::read_to_string(path).map_err(|e| unavailable(&e))?;
        Self::parse(&content).map_err(|e| unavailable(&e))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Production and development versions in one map. A name present in
    /// both takes its development version.
    pub fn merged(&self) -> VersionMap {
        let mut merged = VersionMap::new();
        for map in [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
        {
            merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }
}
