pub mod cards;
pub mod catalog;
pub mod domain;
pub mod query;
mod router;
pub mod selection;
pub mod session;

pub use catalog::{CatalogError, ConcursoCatalog, FacetOption};
pub use domain::{Concurso, FacetName, Level, Sphere, Status};
pub use query::{ListingQuery, QueryOutcome, DEFAULT_PAGE_SIZE, DEFAULT_RADIUS_KM};
pub use router::{listing_router, ListingState};
pub use selection::{FacetSelections, FilterChip};
pub use session::{ListingSession, SessionHandle};
