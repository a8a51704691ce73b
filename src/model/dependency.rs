//! Derived-property dependency declarations
//!
//! Derived properties (`Plane`, `PressureEquation`) are computed on demand,
//! so an observer needs to know which of them go stale when an attribute
//! changes. The registry records `derived -> attribute path` edges; paths
//! are dotted (`Pressure.x`). A change to `Pressure` affects everything that
//! depends on one of its components, and a change to `Centre.x` affects
//! everything that depends on `Centre` as a whole.

use std::collections::{BTreeMap, BTreeSet};

/// Registry of derived properties keyed by the attribute paths they read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyRegistry {
    by_attribute: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `derived` must be recomputed when `attribute` changes
    pub fn add_dependency(&mut self, derived: impl Into<String>, attribute: impl Into<String>) {
        self.by_attribute
            .entry(attribute.into())
            .or_default()
            .insert(derived.into());
    }

    /// Derived properties affected by a change to `path`, sorted and deduplicated
    pub fn dependents_of(&self, path: &str) -> Vec<&str> {
        let affected: BTreeSet<&str> = self
            .by_attribute
            .iter()
            .filter(|(attribute, _)| paths_overlap(attribute, path))
            .flat_map(|(_, derived)| derived.iter().map(String::as_str))
            .collect();
        affected.into_iter().collect()
    }

    /// Attribute paths a derived property was registered against
    pub fn dependencies_of(&self, derived: &str) -> Vec<&str> {
        self.by_attribute
            .iter()
            .filter(|(_, names)| names.contains(derived))
            .map(|(attribute, _)| attribute.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_attribute.is_empty()
    }
}

/// True when one path equals the other or is a dotted prefix of it
fn paths_overlap(a: &str, b: &str) -> bool {
    fn is_prefix(prefix: &str, path: &str) -> bool {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    }
    is_prefix(a, b) || is_prefix(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressure_registry() -> DependencyRegistry {
        let mut r = DependencyRegistry::new();
        r.add_dependency("PressureEquation", "Pressure.x");
        r.add_dependency("PressureEquation", "Pressure.y");
        r.add_dependency("PressureEquation", "Pressure.z");
        r.add_dependency("Plane", "Centre");
        r
    }

    #[test]
    fn test_component_change_affects_dependent() {
        let r = pressure_registry();
        assert_eq!(r.dependents_of("Pressure.y"), vec!["PressureEquation"]);
    }

    #[test]
    fn test_whole_attribute_change_affects_component_dependents() {
        let r = pressure_registry();
        assert_eq!(r.dependents_of("Pressure"), vec!["PressureEquation"]);
    }

    #[test]
    fn test_component_change_affects_whole_attribute_dependents() {
        let r = pressure_registry();
        assert_eq!(r.dependents_of("Centre.z"), vec!["Plane"]);
    }

    #[test]
    fn test_prefix_must_end_at_dot() {
        let r = pressure_registry();
        assert!(r.dependents_of("Press").is_empty());
        assert!(r.dependents_of("Centres").is_empty());
    }

    #[test]
    fn test_dependencies_of_derived() {
        let r = pressure_registry();
        assert_eq!(
            r.dependencies_of("PressureEquation"),
            vec!["Pressure.x", "Pressure.y", "Pressure.z"]
        );
    }
}
