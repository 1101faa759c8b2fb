use super::{DependencyMap, TargetSet};
use std::collections::BTreeMap;

/// What a package in the reduced universe has to do with the targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationEntry {
    /// The package itself needs a major upgrade
    pub is_target: bool,
    /// Targets this package depends on directly, in listing order
    pub depends_on_targets: Vec<String>,
}

/// Packages that are targets or depend on one, keyed by name.
pub type FilteredRelations = BTreeMap<String, RelationEntry>;

/// Reduces a full dependency listing to the packages related to the targets.
pub struct PackageFilter;

impl PackageFilter {
    /// Keep each root that is a target or depends directly on one.
    ///
    /// `targets` is `None` when the update report had no major section, which
    /// is not an error: the result is simply empty.
    pub fn filter(all_deps: &DependencyMap, targets: Option<&TargetSet>) -> FilteredRelations {
        let mut result = FilteredRelations::new();

        let Some(targets) = targets.filter(|t| !t.is_empty()) else {
            return result;
        };

        for (root, dependencies) in all_deps {
            if targets.contains(root) {
                result.entry(root.clone()).or_default().is_target = true;
            }

            for dependency in dependencies {
                if targets.contains(dependency) {
                    result
                        .entry(root.clone())
                        .or_default()
                        .depends_on_targets
                        .push(dependency.clone());
                }
            }
        }

        result
    }
}
