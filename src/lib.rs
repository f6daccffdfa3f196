//! Search and filtering service for Brazilian public-sector exam
//! announcements ("concursos"): an immutable bundled catalog, a pure
//! text/facet/page query pipeline, a session surface with simulated load
//! latency, and a thin HTTP API plus auth stub around them.

pub mod auth;
pub mod config;
pub mod error;
pub mod listings;
pub mod telemetry;
