use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers::{exercises, imports, routines, system};
use crate::infra::app_state::AppState;

/// Assemble the full HTTP surface.
///
/// Paths are part of the public contract and carry no version prefix; the
/// static `/exercises/title` and `/exercises/search` segments take priority
/// over the `/exercises/{id}` capture.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(system::root))
        .route("/hello/{name}", get(system::hello))
        .route("/ping", get(system::ping))
        .route("/health", get(system::health))
        // Exercise catalog
        .route("/exercises/title", get(exercises::get_exercise_by_title))
        .route("/exercises/search", get(exercises::search_exercise))
        .route("/exercises/{id}", get(exercises::get_exercise_by_id))
        .route("/exercises", get(exercises::list_exercises))
        .route("/titles", get(exercises::list_titles))
        .route("/exercises/upload-csv", post(imports::upload_exercises_csv))
        .route("/exercise", post(exercises::create_exercise))
        .route("/exercise/update-gif", post(exercises::update_gif_url))
        // Routines
        .route(
            "/routines",
            get(routines::list_routines).post(routines::create_routine),
        )
        .route("/routines/{id}", put(routines::replace_routine))
        .route("/routines/upload-csv", post(imports::upload_routines_csv))
}
