use std::fmt;
use std::sync::Arc;

use repset_core::PostgresDatabase;
use repset_core::database::ports::{ExerciseRepository, RoutineRepository};
use repset_core::enrichment::EnrichmentService;

use crate::fallback::FallbackRoutines;
use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub exercises: Arc<dyn ExerciseRepository>,
    pub routines: Arc<dyn RoutineRepository>,
    pub enrichment: Arc<EnrichmentService>,
    pub db: Arc<PostgresDatabase>,
    pub config: Arc<Config>,
    /// Read-only routine dataset served when the store was down at startup.
    pub fallback: Arc<FallbackRoutines>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        exercises: Arc<dyn ExerciseRepository>,
        routines: Arc<dyn RoutineRepository>,
        enrichment: Arc<EnrichmentService>,
        db: Arc<PostgresDatabase>,
        config: Arc<Config>,
        fallback: Arc<FallbackRoutines>,
    ) -> Self {
        Self {
            exercises,
            routines,
            enrichment,
            db,
            config,
            fallback,
        }
    }
}
