use super::VersionMap;
use super::components::Component;

/// Rendered in place of a version that neither source knows about.
pub const UNRESOLVED_VERSION: &str = "undefined";

/// Renders grouped package names with their current and target versions.
pub struct VersionAnnotator<'a> {
    current: &'a VersionMap,
    target: &'a VersionMap,
}

impl<'a> VersionAnnotator<'a> {
    pub fn new(current: &'a VersionMap, target: &'a VersionMap) -> Self {
        Self { current, target }
    }

    /// Annotate every component, or return `None` when either version source
    /// could not be read at all.
    ///
    /// With no components there is nothing to annotate, so the result is an
    /// empty list whatever the state of the sources.
    pub fn annotate_all(
        components: &[Component],
        current: Option<&VersionMap>,
        target: Option<&VersionMap>,
    ) -> Option<Vec<Vec<String>>> {
        if components.is_empty() {
            return Some(Vec::new());
        }
        let annotator = VersionAnnotator::new(current?, target?);
        Some(annotator.annotate(components))
    }

    pub fn annotate(&self, components: &[Component]) -> Vec<Vec<String>> {
        components
            .iter()
            .map(|component| component.iter().map(|name| self.describe(name)).collect())
            .collect()
    }

    /// `"<name>: <current> -> <target>"`
    pub fn describe(&self, name: &str) -> String {
        let current = self
            .current
            .get(name)
            .map(String::as_str)
            .unwrap_or(UNRESOLVED_VERSION);
        let target = self
            .target
            .get(name)
            .map(String::as_str)
            .unwrap_or(UNRESOLVED_VERSION);
        format!("{}: {} -> {}", name, current, target)
    }
}
