use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::catalog::ConcursoCatalog;
use super::domain::{Concurso, FacetName};
use super::query::{self, ListingQuery, QueryOutcome, DEFAULT_PAGE_SIZE, DEFAULT_RADIUS_KM};
use super::selection::{FacetSelections, FilterChip};

/// Proof that a deferred load was started. Completion is honored only while
/// the session's epoch still matches, so any intervening mutation suppresses
/// the stale update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

/// Mutable UI-session state over the immutable catalog: search term, facet
/// selections, radius, and the page cursor. All reads go through
/// [`ListingSession::recompute`], a pure projection of the current state.
#[derive(Debug)]
pub struct ListingSession {
    catalog: Arc<ConcursoCatalog>,
    search_term: String,
    selections: FacetSelections,
    radius_km: u16,
    page: u32,
    page_size: usize,
    epoch: u64,
    loading: bool,
    hydrated: bool,
}

impl ListingSession {
    /// A session whose initial load is still pending; `begin_hydration` /
    /// `complete_hydration` reveal the collection.
    pub fn new(catalog: Arc<ConcursoCatalog>) -> Self {
        Self {
            catalog,
            search_term: String::new(),
            selections: FacetSelections::new(),
            radius_km: DEFAULT_RADIUS_KM,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            epoch: 0,
            loading: false,
            hydrated: false,
        }
    }

    /// A session with the initial load already applied, for callers that do
    /// not simulate latency.
    pub fn preloaded(catalog: Arc<ConcursoCatalog>) -> Self {
        let mut session = Self::new(catalog);
        session.hydrated = true;
        session
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.invalidate();
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn radius_km(&self) -> u16 {
        self.radius_km
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn selections(&self) -> &FacetSelections {
        &self.selections
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.invalidate();
    }

    pub fn toggle_facet(&mut self, facet: FacetName, value: impl Into<String>) {
        self.selections.toggle(facet, value);
        self.invalidate();
    }

    pub fn set_facet_selection(&mut self, facet: FacetName, values: Vec<String>) {
        self.selections.set(facet, values);
        self.invalidate();
    }

    /// Accepted but never applied to filtering; still resets the page like any
    /// other filter input.
    pub fn set_radius(&mut self, km: u16) {
        self.radius_km = km;
        self.invalidate();
    }

    /// Restore the pristine filter state: empty term, no selections, default
    /// radius, first page.
    pub fn clear_all(&mut self) {
        self.search_term.clear();
        self.selections.clear();
        self.radius_km = DEFAULT_RADIUS_KM;
        self.invalidate();
    }

    /// Evaluate the pipeline for the current state. Before hydration the
    /// collection is not yet visible and the outcome is empty.
    pub fn recompute(&self) -> QueryOutcome<'_> {
        if !self.hydrated {
            return QueryOutcome {
                visible: Vec::new(),
                total_filtered: 0,
                total_pages: 0,
            };
        }
        query::run(self.catalog.concursos(), &self.query())
    }

    pub fn total_filtered(&self) -> usize {
        self.recompute().total_filtered
    }

    /// The records currently revealed, first page through the cursor.
    pub fn visible(&self) -> Vec<&Concurso> {
        self.recompute().visible
    }

    pub fn selected_filter_chips(&self) -> Vec<FilterChip> {
        self.selections.chips(&self.catalog)
    }

    /// Immediately advance the page cursor. No-op while a deferred load is
    /// pending or when every filtered record is already visible.
    pub fn advance_page(&mut self) -> bool {
        if self.loading || self.recompute().is_exhausted(self.page) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Start the simulated initial load. Returns `None` when already hydrated
    /// or while another load is pending.
    pub fn begin_hydration(&mut self) -> Option<LoadTicket> {
        if self.hydrated || self.loading {
            return None;
        }
        self.loading = true;
        Some(LoadTicket { epoch: self.epoch })
    }

    pub fn complete_hydration(&mut self, ticket: LoadTicket) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.loading = false;
        self.hydrated = true;
        true
    }

    /// Start a deferred "load more". Returns `None` while busy or once the
    /// cursor is exhausted, so re-entrant requests are ignored.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        if self.loading || !self.hydrated || self.recompute().is_exhausted(self.page) {
            return None;
        }
        self.loading = true;
        Some(LoadTicket { epoch: self.epoch })
    }

    /// Apply a deferred page advance. A ticket issued before any filter
    /// mutation no longer matches the epoch and is dropped.
    pub fn complete_load_more(&mut self, ticket: LoadTicket) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.loading = false;
        self.page += 1;
        true
    }

    fn query(&self) -> ListingQuery {
        ListingQuery {
            search_term: self.search_term.clone(),
            selections: self.selections.clone(),
            radius_km: self.radius_km,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Every filter mutation lands here: back to page one and orphan any
    /// in-flight load.
    fn invalidate(&mut self) {
        self.page = 1;
        self.loading = false;
        self.epoch += 1;
    }
}

/// Shared async wrapper driving the two-phase load protocol with the
/// configured simulated latency.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<ListingSession>>,
    delay: Duration,
}

impl SessionHandle {
    pub fn new(session: ListingSession, delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            delay,
        }
    }

    /// Simulated initial load. Resolves to `false` when the session was
    /// already hydrated, busy, or mutated while the delay elapsed.
    pub async fn hydrate(&self) -> bool {
        let ticket = self.with_session(ListingSession::begin_hydration);
        let Some(ticket) = ticket else {
            return false;
        };
        tokio::time::sleep(self.delay).await;
        self.with_session(|session| session.complete_hydration(ticket))
    }

    /// Simulated "load more". Re-entrant calls while one is pending resolve to
    /// `false` without queuing.
    pub async fn load_more(&self) -> bool {
        let ticket = self.with_session(ListingSession::begin_load_more);
        let Some(ticket) = ticket else {
            return false;
        };
        tokio::time::sleep(self.delay).await;
        self.with_session(|session| session.complete_load_more(ticket))
    }

    pub fn with_session<T>(&self, f: impl FnOnce(&mut ListingSession) -> T) -> T {
        let mut guard = self.inner.lock().expect("session mutex poisoned");
        f(&mut guard)
    }
}
