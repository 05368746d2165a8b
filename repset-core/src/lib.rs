//! Persistence, CSV import, and image enrichment services for the Repset
//! exercise catalog.
//!
//! The crate is organized around port traits (`database::ports`,
//! `providers::ImageSearchPort`) with Postgres and Google Custom Search as
//! the production implementations; the HTTP layer only sees the seams.

pub mod database;
pub mod enrichment;
pub mod error;
pub mod import;
pub mod providers;

pub use database::PostgresDatabase;
pub use error::{CatalogError, Result};

/// Embedded migrations for the catalog schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
