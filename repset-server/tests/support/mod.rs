use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum_test::TestServer;
use sqlx::PgPool;

use repset_core::PostgresDatabase;
use repset_core::database::ports::{ExerciseRepository, RoutineRepository};
use repset_core::database::postgres::repositories::{
    PostgresExerciseRepository, PostgresRoutineRepository,
};
use repset_core::enrichment::EnrichmentService;
use repset_core::providers::{GOOGLE_SEARCH_ENDPOINT, ImageSearchPort, ProviderError};
use repset_model::NormalizedTitle;

use repset_server::create_app;
use repset_server::fallback::FallbackRoutines;
use repset_server::infra::app_state::AppState;
use repset_server::infra::config::{
    Config, DatabaseConfig, FallbackConfig, SearchConfig, ServerConfig,
};

/// Scripted stand-in for the external image search: responses are consumed
/// in FIFO order, an exhausted script answers with an empty result.
#[derive(Debug, Default)]
pub struct ScriptedSearch {
    responses: Mutex<VecDeque<Vec<String>>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enqueue(&self, urls: &[&str]) {
        self.responses
            .lock()
            .unwrap()
            .push_back(urls.iter().map(|s| s.to_string()).collect());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSearchPort for ScriptedSearch {
    async fn search_gifs(
        &self,
        _title: &NormalizedTitle,
    ) -> std::result::Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig { url: None },
        search: SearchConfig {
            api_key: String::new(),
            cx: String::new(),
            endpoint: GOOGLE_SEARCH_ENDPOINT.into(),
        },
        fallback: FallbackConfig {
            routines_path: "fallback_routines.json".into(),
        },
        env_file_loaded: false,
    }
}

pub fn build_state(
    pool: PgPool,
    search: Arc<dyn ImageSearchPort>,
    fallback: FallbackRoutines,
) -> AppState {
    let db = Arc::new(PostgresDatabase::from_pool(pool.clone()));
    let exercises: Arc<dyn ExerciseRepository> =
        Arc::new(PostgresExerciseRepository::new(pool.clone()));
    let routines: Arc<dyn RoutineRepository> = Arc::new(PostgresRoutineRepository::new(pool));
    let enrichment = Arc::new(EnrichmentService::new(Arc::clone(&exercises), search));

    AppState::new(
        exercises,
        routines,
        enrichment,
        db,
        Arc::new(test_config()),
        Arc::new(fallback),
    )
}

pub fn build_test_server(pool: PgPool, search: Arc<dyn ImageSearchPort>) -> Result<TestServer> {
    let state = build_state(pool, search, FallbackRoutines::disabled());
    TestServer::new(create_app(state)).map_err(|err| anyhow!(err.to_string()))
}

#[allow(dead_code)]
pub fn build_test_server_with_fallback(
    pool: PgPool,
    fallback: FallbackRoutines,
) -> Result<TestServer> {
    let state = build_state(pool, ScriptedSearch::new(), fallback);
    TestServer::new(create_app(state)).map_err(|err| anyhow!(err.to_string()))
}
