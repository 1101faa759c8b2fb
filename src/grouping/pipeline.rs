use super::annotate::VersionAnnotator;
use super::components::{Component, ComponentFinder};
use super::filter::{FilteredRelations, PackageFilter};
use super::graph::RelationGraph;
use super::inversion::invert_relations;
use super::{DependencyMap, TargetSet, VersionMap};

/// Everything the grouping needs, already read from disk.
///
/// `None` marks an input whose source was missing or unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupingInput<'a> {
    pub dependencies: Option<&'a DependencyMap>,
    pub major_targets: Option<&'a [String]>,
    pub current_versions: Option<&'a VersionMap>,
    pub target_versions: Option<&'a VersionMap>,
}

/// Products of the stages before annotation.
#[derive(Debug, Clone)]
pub struct ComponentSearch {
    pub relations: FilteredRelations,
    pub graph: RelationGraph,
    pub components: Vec<Component>,
}

/// Intermediate and final products of one grouping run.
#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    pub relations: FilteredRelations,
    pub graph: RelationGraph,
    pub components: Vec<Component>,
    /// `None` when a version source was unreadable
    pub groups: Option<Vec<Vec<String>>>,
}

impl GroupingOutcome {
    pub fn group_count(&self) -> usize {
        self.components.len()
    }
}

/// Runs filter, inversion, graph building, component search and annotation
/// in sequence. Each stage only borrows the previous stage's output.
pub struct GroupingPipeline;

impl GroupingPipeline {
    pub fn run(input: GroupingInput<'_>) -> GroupingOutcome {
        let grouped = Self::group(input.dependencies, input.major_targets);
        let groups = VersionAnnotator::annotate_all(
            &grouped.components,
            input.current_versions,
            input.target_versions,
        );

        GroupingOutcome {
            relations: grouped.relations,
            graph: grouped.graph,
            components: grouped.components,
            groups,
        }
    }

    /// The unannotated part of the pipeline: filter through component search.
    pub fn group(
        dependencies: Option<&DependencyMap>,
        major_targets: Option<&[String]>,
    ) -> ComponentSearch {
        let empty = DependencyMap::new();
        let dependencies = dependencies.unwrap_or(&empty);
        let targets: Option<TargetSet> =
            major_targets.map(|names| names.iter().cloned().collect());

        let relations = PackageFilter::filter(dependencies, targets.as_ref());
        let inverted = invert_relations(&relations);
        let graph = RelationGraph::build(&inverted);
        let components = ComponentFinder::find(&graph);

        ComponentSearch {
            relations,
            graph,
            components,
        }
    }
}
