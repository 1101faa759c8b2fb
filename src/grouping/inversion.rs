use super::filter::FilteredRelations;
use std::collections::BTreeMap;

/// Package name -> roots that depend on it directly.
pub type InvertedRelations = BTreeMap<String, Vec<String>>;

/// Re-index the filtered relation by target instead of by root.
///
/// Every package of `relations` gets a key, even when nothing depends on it,
/// so targets without dependents survive as isolated nodes. Each target a root
/// depends on gets that root appended to its list.
pub fn invert_relations(relations: &FilteredRelations) -> InvertedRelations {
    let mut inverted = InvertedRelations::new();

    for (package, entry) in relations {
        inverted.entry(package.clone()).or_default();

        for target in &entry.depends_on_targets {
            inverted
                .entry(target.clone())
                .or_default()
                .push(package.clone());
        }
    }

    inverted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::filter::RelationEntry;

    fn relation(is_target: bool, deps: &[&str]) -> RelationEntry {
        RelationEntry {
            is_target,
            depends_on_targets: deps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn indexes_roots_by_shared_target() {
        let mut relations = FilteredRelations::new();
        relations.insert("app".into(), relation(false, &["eslint"]));
        relations.insert("tool".into(), relation(false, &["eslint", "typescript"]));

        let inverted = invert_relations(&relations);

        assert_eq!(inverted["eslint"], vec!["app", "tool"]);
        assert_eq!(inverted["typescript"], vec!["tool"]);
        assert!(inverted["app"].is_empty());
        assert!(inverted["tool"].is_empty());
        assert_eq!(inverted.len(), 4);
    }

    #[test]
    fn target_without_dependents_keeps_empty_entry() {
        let mut relations = FilteredRelations::new();
        relations.insert("eslint".into(), relation(true, &[]));

        let inverted = invert_relations(&relations);

        assert_eq!(inverted.len(), 1);
        assert!(inverted["eslint"].is_empty());
    }

    #[test]
    fn root_that_is_also_a_dependent_target() {
        let mut relations = FilteredRelations::new();
        relations.insert("typescript".into(), relation(true, &[]));
        relations.insert("ts-node".into(), relation(true, &["typescript"]));

        let inverted = invert_relations(&relations);

        assert_eq!(inverted["typescript"], vec!["ts-node"]);
        assert!(inverted["ts-node"].is_empty());
    }

    #[test]
    fn empty_relations_invert_to_empty() {
        assert!(invert_relations(&FilteredRelations::new()).is_empty());
    }
}
