use super::domain::{Concurso, FacetName};
use super::selection::FacetSelections;

/// Records revealed per "load more" step, matching the original listing page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

pub const DEFAULT_RADIUS_KM: u16 = 50;

/// Inputs for one evaluation of the listing pipeline.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub search_term: String,
    pub selections: FacetSelections,
    /// Accepted for interface parity with the filter panel; applies no
    /// filtering until geolocation support lands.
    pub radius_km: u16,
    pub page: u32,
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selections: FacetSelections::new(),
            radius_km: DEFAULT_RADIUS_KM,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingQuery {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_selections(mut self, selections: FacetSelections) -> Self {
        self.selections = selections;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Result of one pipeline evaluation: the visible prefix plus totals.
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    pub visible: Vec<&'a Concurso>,
    pub total_filtered: usize,
    pub total_pages: u32,
}

impl QueryOutcome<'_> {
    /// No further page would reveal additional records.
    pub fn is_exhausted(&self, page: u32) -> bool {
        page >= self.total_pages
    }
}

/// Run every active stage conjunctively over the collection, preserving
/// document order, then cut the leading `page * page_size` records.
pub fn run<'a>(all: &'a [Concurso], query: &ListingQuery) -> QueryOutcome<'a> {
    let term = query.search_term.trim().to_lowercase();
    let selections = &query.selections;

    let filtered: Vec<&Concurso> = all
        .iter()
        .filter(|concurso| term.is_empty() || matches_term(concurso, &term))
        .filter(|concurso| {
            let selected = selections.values(FacetName::Level);
            selected.is_empty()
                || concurso
                    .levels
                    .iter()
                    .any(|level| selected.iter().any(|value| value == level.as_str()))
        })
        .filter(|concurso| {
            let selected = selections.values(FacetName::Sphere);
            selected.is_empty()
                || selected
                    .iter()
                    .any(|value| value == concurso.sphere.as_str())
        })
        .filter(|concurso| {
            let selected = selections.values(FacetName::Area);
            selected.is_empty()
                || concurso
                    .areas
                    .iter()
                    .any(|area| selected.iter().any(|value| value == area))
        })
        .filter(|concurso| {
            let selected = selections.values(FacetName::Status);
            selected.is_empty()
                || selected
                    .iter()
                    .any(|value| value == concurso.status.as_str())
        })
        .collect();

    let total_filtered = filtered.len();
    let page_size = query.page_size.max(1);
    let page = query.page.max(1);
    let total_pages = total_filtered.div_ceil(page_size) as u32;

    let cutoff = (page_size).saturating_mul(page as usize).min(total_filtered);
    let visible = filtered[..cutoff].to_vec();

    QueryOutcome {
        visible,
        total_filtered,
        total_pages,
    }
}

fn matches_term(concurso: &Concurso, folded_term: &str) -> bool {
    concurso.title.to_lowercase().contains(folded_term)
        || concurso.organization.to_lowercase().contains(folded_term)
        || concurso.location.to_lowercase().contains(folded_term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ConcursoCatalog;

    fn catalog() -> ConcursoCatalog {
        ConcursoCatalog::bundled().expect("bundled dataset loads")
    }

    #[test]
    fn default_query_returns_full_collection_in_order() {
        let catalog = catalog();
        let outcome = run(
            catalog.concursos(),
            &ListingQuery::default().with_page_size(catalog.len()),
        );

        assert_eq!(outcome.total_filtered, catalog.len());
        let ids: Vec<&str> = outcome.visible.iter().map(|c| c.id.as_str()).collect();
        let original: Vec<&str> = catalog.concursos().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, original);
    }

    #[test]
    fn text_stage_folds_case_and_trims() {
        let catalog = catalog();
        let outcome = run(
            catalog.concursos(),
            &ListingQuery::default().with_term("  TRIBUNAL "),
        );

        assert_eq!(outcome.total_filtered, 2);
        assert!(outcome
            .visible
            .iter()
            .all(|c| c.organization.to_lowercase().contains("tribunal")));
    }

    #[test]
    fn whitespace_term_is_no_constraint() {
        let catalog = catalog();
        let outcome = run(catalog.concursos(), &ListingQuery::default().with_term("   "));
        assert_eq!(outcome.total_filtered, catalog.len());
    }

    #[test]
    fn facets_combine_with_and_values_with_or() {
        let catalog = catalog();
        let mut selections = FacetSelections::new();
        selections.toggle(FacetName::Sphere, "federal");
        selections.toggle(FacetName::Level, "secondary");
        selections.toggle(FacetName::Level, "technical");

        let outcome = run(
            catalog.concursos(),
            &ListingQuery::default().with_selections(selections),
        );

        assert!(outcome.total_filtered > 0);
        for concurso in &outcome.visible {
            assert_eq!(concurso.sphere.as_str(), "federal");
            assert!(concurso
                .levels
                .iter()
                .any(|level| matches!(level.as_str(), "secondary" | "technical")));
        }
    }

    #[test]
    fn unknown_facet_value_matches_nothing() {
        let catalog = catalog();
        let mut selections = FacetSelections::new();
        selections.toggle(FacetName::Area, "astronomia");

        let outcome = run(
            catalog.concursos(),
            &ListingQuery::default().with_selections(selections),
        );
        assert_eq!(outcome.total_filtered, 0);
        assert!(outcome.visible.is_empty());
    }

    #[test]
    fn radius_applies_no_filtering() {
        let catalog = catalog();
        let mut narrow = ListingQuery::default();
        narrow.radius_km = 1;
        let narrow_outcome = run(catalog.concursos(), &narrow);
        let default_outcome = run(catalog.concursos(), &ListingQuery::default());
        assert_eq!(
            narrow_outcome.total_filtered,
            default_outcome.total_filtered
        );
    }

    #[test]
    fn visible_is_a_prefix_across_pages() {
        let catalog = catalog();
        let page_one = run(catalog.concursos(), &ListingQuery::default().with_page(1));
        let page_two = run(catalog.concursos(), &ListingQuery::default().with_page(2));

        assert_eq!(page_one.visible.len(), DEFAULT_PAGE_SIZE);
        assert!(page_two.visible.len() > page_one.visible.len());
        assert_eq!(
            &page_two.visible[..page_one.visible.len()],
            page_one.visible.as_slice()
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        let catalog = catalog();
        let outcome = run(catalog.concursos(), &ListingQuery::default());
        let expected = catalog.len().div_ceil(DEFAULT_PAGE_SIZE) as u32;
        assert_eq!(outcome.total_pages, expected);
        assert!(outcome.is_exhausted(expected));
        assert!(!outcome.is_exhausted(expected - 1));
    }

    #[test]
    fn search_by_organization_ignores_compatible_facets() {
        let catalog = catalog();
        let mut selections = FacetSelections::new();
        selections.toggle(FacetName::Status, "open");

        let outcome = run(
            catalog.concursos(),
            &ListingQuery::default()
                .with_term("tribunal")
                .with_selections(selections),
        );

        // Both tribunal records are open, so the facet does not shrink the result.
        assert_eq!(outcome.total_filtered, 2);
    }
}
