//! # Repset Server
//!
//! HTTP surface over the exercise and routine catalog.
//!
//! ## Overview
//!
//! - **Exercise catalog**: title-keyed lookups, raw inserts, CSV bulk import
//! - **Image enrichment**: read-through cache in front of an external image
//!   search, populated lazily on first miss
//! - **Routines**: wholesale create/replace of nested workout documents,
//!   with a static fallback dataset when the store is down at startup
//!
//! The server is built on Axum and uses PostgreSQL for persistent storage.

pub mod fallback;
pub mod handlers;
pub mod infra;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::infra::app_state::AppState;

/// Build the application router with middleware applied.
///
/// CORS is wide open: the service fronts browser clients on arbitrary
/// origins and carries no credentials.
pub fn create_app(state: AppState) -> Router {
    routes::create_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
