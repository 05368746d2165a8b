use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{Value, json};

use repset_model::{RoutineDraft, RoutineID};

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

/// All routines, or the startup fallback dataset when the store was
/// unreachable at boot. Only this read path degrades; everything else
/// surfaces store errors per-request.
pub async fn list_routines(State(state): State<AppState>) -> AppResult<Json<Value>> {
    if state.fallback.active() {
        return Ok(Json(json!({ "routines": state.fallback.routines() })));
    }

    let routines = state.routines.list_all().await?;
    Ok(Json(json!({ "routines": routines })))
}

pub async fn create_routine(
    State(state): State<AppState>,
    Json(draft): Json<RoutineDraft>,
) -> AppResult<Json<Value>> {
    let id = state.routines.insert(draft.into()).await?;
    Ok(Json(json!({ "inserted_id": id.to_string() })))
}

/// Wholesale replace; the nested structure is immutable-by-replacement.
pub async fn replace_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<RoutineDraft>,
) -> AppResult<Json<Value>> {
    let id = RoutineID::parse_str(&id)?;

    let replaced = state.routines.replace(id, draft.into()).await?;
    if !replaced {
        return Err(AppError::not_found("Routine not found"));
    }

    Ok(Json(json!({ "message": "Routine updated successfully" })))
}
