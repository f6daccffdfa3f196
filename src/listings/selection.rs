use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::ConcursoCatalog;
use super::domain::FacetName;

/// An active `facet:value` pair as shown in the "active filters" strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub facet: FacetName,
    pub value: String,
    pub label: String,
}

/// Selected values per facet. An absent or empty entry means the facet applies
/// no constraint. Values keep their selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelections {
    selected: BTreeMap<FacetName, Vec<String>>,
}

impl FacetSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `value` in the facet's selected set. Toggling the
    /// same value twice restores the prior selection.
    pub fn toggle(&mut self, facet: FacetName, value: impl Into<String>) {
        let value = value.into();
        let values = self.selected.entry(facet).or_default();
        match values.iter().position(|existing| *existing == value) {
            Some(index) => {
                values.remove(index);
                if values.is_empty() {
                    self.selected.remove(&facet);
                }
            }
            None => values.push(value),
        }
    }

    /// Replace the facet's entire selected set, dropping duplicates while
    /// keeping first-seen order. An empty set removes the facet's entry.
    pub fn set(&mut self, facet: FacetName, values: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        if deduped.is_empty() {
            self.selected.remove(&facet);
        } else {
            self.selected.insert(facet, deduped);
        }
    }

    pub fn values(&self, facet: FacetName) -> &[String] {
        self.selected
            .get(&facet)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, facet: FacetName, value: &str) -> bool {
        self.values(facet).iter().any(|existing| existing == value)
    }

    /// True when no facet constrains the result.
    pub fn is_empty(&self) -> bool {
        self.selected.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Derived projection of all active selections, ordered level, sphere,
    /// area, status, with selection order inside each facet.
    pub fn chips(&self, catalog: &ConcursoCatalog) -> Vec<FilterChip> {
        FacetName::ordered()
            .into_iter()
            .flat_map(|facet| {
                self.values(facet).iter().map(move |value| FilterChip {
                    facet,
                    value: value.clone(),
                    label: catalog.value_label(facet, value),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_idempotent_per_value() {
        let mut selections = FacetSelections::new();
        let before = selections.clone();

        selections.toggle(FacetName::Status, "open");
        assert!(selections.contains(FacetName::Status, "open"));

        selections.toggle(FacetName::Status, "open");
        assert_eq!(selections, before.clone());
        assert!(selections.is_empty());
    }

    #[test]
    fn set_replaces_and_dedupes() {
        let mut selections = FacetSelections::new();
        selections.toggle(FacetName::Level, "higher");

        selections.set(
            FacetName::Level,
            vec![
                "secondary".to_string(),
                "technical".to_string(),
                "secondary".to_string(),
            ],
        );
        assert_eq!(selections.values(FacetName::Level), ["secondary", "technical"]);
    }

    #[test]
    fn deselecting_every_value_matches_the_pristine_state() {
        let pristine = FacetSelections::new();

        let mut toggled = FacetSelections::new();
        toggled.toggle(FacetName::Sphere, "federal");
        toggled.toggle(FacetName::Sphere, "state");
        toggled.toggle(FacetName::Sphere, "federal");
        toggled.toggle(FacetName::Sphere, "state");
        assert_eq!(toggled, pristine);

        let mut replaced = FacetSelections::new();
        replaced.set(FacetName::Level, vec!["higher".to_string()]);
        replaced.set(FacetName::Level, Vec::new());
        assert_eq!(replaced, pristine);
        assert!(replaced.is_empty());
    }

    #[test]
    fn chips_follow_facet_order() {
        let catalog = crate::listings::ConcursoCatalog::bundled().expect("bundled dataset");
        let mut selections = FacetSelections::new();
        selections.toggle(FacetName::Status, "open");
        selections.toggle(FacetName::Level, "higher");
        selections.toggle(FacetName::Level, "secondary");

        let chips = selections.chips(&catalog);
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0].facet, FacetName::Level);
        assert_eq!(chips[0].value, "higher");
        assert_eq!(chips[1].value, "secondary");
        assert_eq!(chips[2].facet, FacetName::Status);
        assert_eq!(chips[2].label, "Inscrições Abertas");
    }

    #[test]
    fn clear_removes_every_selection() {
        let mut selections = FacetSelections::new();
        selections.toggle(FacetName::Area, "saúde");
        selections.toggle(FacetName::Sphere, "federal");
        selections.clear();
        assert!(selections.is_empty());
        assert!(selections.values(FacetName::Area).is_empty());
    }
}
