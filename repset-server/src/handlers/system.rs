use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};

use crate::infra::app_state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

pub async fn hello(Path(name): Path<String>) -> Json<Value> {
    Json(json!({ "message": format!("Hello {name}") }))
}

pub async fn ping() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Repset server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match state.db.ping().await {
        Ok(()) => {
            health_status["checks"]["database"] = json!({ "status": "healthy" });
            Ok(Json(health_status))
        }
        Err(e) => {
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": e.to_string(),
            });
            health_status["status"] = json!("unhealthy");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
