use axum::extract::{Multipart, State};
use axum::response::Json;
use serde_json::{Value, json};
use tracing::info;

use repset_core::import::{parse_exercises_csv, parse_routines_csv};

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

/// Pull the uploaded CSV bytes out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(field.bytes().await?.to_vec());
        }
    }

    Err(AppError::bad_request("multipart field 'file' is required"))
}

pub async fn upload_exercises_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let data = read_upload(&mut multipart).await?;

    let exercises = parse_exercises_csv(&data)?;
    if exercises.is_empty() {
        return Ok(Json(json!({ "message": "No exercises found in CSV" })));
    }

    let inserted = state.exercises.insert_many(exercises).await?;
    info!(inserted, "exercise CSV import finished");

    Ok(Json(json!({ "inserted_count": inserted })))
}

pub async fn upload_routines_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let data = read_upload(&mut multipart).await?;

    let routines = parse_routines_csv(&data)?;
    if routines.is_empty() {
        return Ok(Json(json!({ "message": "No valid routines found in CSV" })));
    }

    let ids = state.routines.insert_many(routines).await?;
    info!(inserted = ids.len(), "routine CSV import finished");

    Ok(Json(json!({
        "inserted_count": ids.len(),
        "inserted_ids": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })))
}
