use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use repset_core::enrichment::EnrichedExercise;
use repset_model::{Exercise, ExerciseID, NewExercise, NormalizedTitle};

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

/// Exact lookup by normalized title; never calls out.
pub async fn get_exercise_by_title(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<Exercise>> {
    let title = NormalizedTitle::new(&params.title)?;

    let exercise = state
        .exercises
        .find_by_title(&title)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise not found"))?;

    Ok(Json(exercise))
}

/// Read-through lookup: store first, external image search on miss, result
/// persisted for the next caller.
pub async fn search_exercise(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<EnrichedExercise>> {
    let title = NormalizedTitle::new(&params.title)?;
    let enriched = state.enrichment.find_or_enrich(&title).await?;
    Ok(Json(enriched))
}

pub async fn get_exercise_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Exercise>> {
    let id = ExerciseID::parse_str(&id)?;

    let exercise = state
        .exercises
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Exercise not found"))?;

    Ok(Json(exercise))
}

pub async fn list_titles(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let mut titles = state.exercises.list_titles().await?;
    titles.sort();
    Ok(Json(json!({ "titles": titles })))
}

pub async fn list_exercises(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let exercises = state.exercises.list_all().await?;
    Ok(Json(json!({ "exercises": exercises })))
}

/// Unvalidated insert: whatever subset of the document the client sends is
/// stored, with defaults for the rest.
pub async fn create_exercise(
    State(state): State<AppState>,
    Json(body): Json<NewExercise>,
) -> AppResult<Json<Value>> {
    let id = state.exercises.insert(body).await?;
    Ok(Json(json!({ "inserted_id": id.to_string() })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateGifRequest {
    pub id: Option<String>,
    #[serde(rename = "gifUrl")]
    pub gif_url: Option<String>,
}

pub async fn update_gif_url(
    State(state): State<AppState>,
    Json(body): Json<UpdateGifRequest>,
) -> AppResult<Json<Value>> {
    let raw_id = body.id.filter(|value| !value.is_empty());
    let gif_url = body.gif_url.filter(|value| !value.is_empty());

    let (Some(raw_id), Some(gif_url)) = (raw_id, gif_url) else {
        return Err(AppError::bad_request(
            "Both 'id' and 'gifUrl' are required.",
        ));
    };

    let id = ExerciseID::parse_str(&raw_id)?;

    let updated = state.exercises.update_gif_url(id, &gif_url).await?;
    if !updated {
        return Err(AppError::not_found(format!(
            "No exercise found with id '{raw_id}'"
        )));
    }

    Ok(Json(json!({
        "message": format!("gifUrl updated for exercise with id '{raw_id}'")
    })))
}
