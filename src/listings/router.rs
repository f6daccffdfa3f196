use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::cards::ConcursoCardView;
use super::catalog::{ConcursoCatalog, FacetOption};
use super::domain::FacetName;
use super::query::{self, ListingQuery, DEFAULT_RADIUS_KM};
use super::selection::{FacetSelections, FilterChip};

/// Shared state for the listing endpoints: the immutable catalog plus the
/// configured page size.
#[derive(Clone)]
pub struct ListingState {
    pub catalog: Arc<ConcursoCatalog>,
    pub page_size: usize,
}

impl ListingState {
    pub fn new(catalog: Arc<ConcursoCatalog>, page_size: usize) -> Self {
        Self {
            catalog,
            page_size: page_size.max(1),
        }
    }
}

/// Router exposing the stateless query surface consumed by the listing page.
pub fn listing_router(state: ListingState) -> Router {
    Router::new()
        .route("/api/v1/concursos/search", post(search_endpoint))
        .route("/api/v1/concursos/facets", get(facets_endpoint))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    pub(crate) search_term: String,
    #[serde(default)]
    pub(crate) levels: Vec<String>,
    #[serde(default)]
    pub(crate) spheres: Vec<String>,
    #[serde(default)]
    pub(crate) areas: Vec<String>,
    #[serde(default)]
    pub(crate) statuses: Vec<String>,
    #[serde(default)]
    pub(crate) radius_km: Option<u16>,
    #[serde(default)]
    pub(crate) page: Option<u32>,
    /// Evaluation date for the registration countdown; defaults to today.
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    pub(crate) total_filtered: usize,
    pub(crate) total_pages: u32,
    pub(crate) page: u32,
    pub(crate) page_size: usize,
    pub(crate) active_filters: Vec<FilterChip>,
    pub(crate) concursos: Vec<ConcursoCardView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FacetsResponse {
    pub(crate) levels: Vec<FacetOption>,
    pub(crate) spheres: Vec<FacetOption>,
    pub(crate) areas: Vec<FacetOption>,
    pub(crate) statuses: Vec<FacetOption>,
}

pub(crate) async fn search_endpoint(
    State(state): State<ListingState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let catalog = &state.catalog;
    let mut selections = FacetSelections::new();
    selections.set(FacetName::Level, request.levels);
    selections.set(FacetName::Sphere, request.spheres);
    selections.set(FacetName::Area, request.areas);
    selections.set(FacetName::Status, request.statuses);

    let listing_query = ListingQuery {
        search_term: request.search_term,
        selections: selections.clone(),
        radius_km: request.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
        page: request.page.unwrap_or(1).max(1),
        page_size: state.page_size,
    };

    let outcome = query::run(catalog.concursos(), &listing_query);
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let concursos = outcome
        .visible
        .iter()
        .map(|concurso| ConcursoCardView::from_record(concurso, today))
        .collect();

    Json(SearchResponse {
        total_filtered: outcome.total_filtered,
        total_pages: outcome.total_pages,
        page: listing_query.page,
        page_size: listing_query.page_size,
        active_filters: selections.chips(catalog),
        concursos,
    })
}

pub(crate) async fn facets_endpoint(State(state): State<ListingState>) -> Json<FacetsResponse> {
    let catalog = &state.catalog;
    Json(FacetsResponse {
        levels: catalog.facet_options(FacetName::Level),
        spheres: catalog.facet_options(FacetName::Sphere),
        areas: catalog.facet_options(FacetName::Area),
        statuses: catalog.facet_options(FacetName::Status),
    })
}
