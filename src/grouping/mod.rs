// Grouping core: turns a dependency listing and a set of major-update targets
// into isolated groups of packages that should be upgraded together.
//
// Stages, in order:
// - filter: reduce the listing to packages related to a target
// - inversion: re-index that relation by target
// - graph: build the undirected relation graph from the inverted index
// - components: split the graph into connected components
// - annotate: render each member with its current and target versions
pub mod annotate;
pub mod components;
pub mod filter;
pub mod graph;
pub mod inversion;
pub mod pipeline;

use std::collections::{BTreeMap, HashSet};

pub use pipeline::{GroupingInput, GroupingOutcome, GroupingPipeline};

/// Root package name -> names of its direct dependencies, one level deep.
pub type DependencyMap = BTreeMap<String, Vec<String>>;

/// Package name -> version string.
pub type VersionMap = BTreeMap<String, String>;

/// Packages flagged for a major upgrade.
pub type TargetSet = HashSet<String>;
