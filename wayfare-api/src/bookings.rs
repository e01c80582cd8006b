use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/book", post(book))
}

async fn book(
    State(state): State<AppState>,
    details: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(details) = details?;
    let confirmation = state.orchestrator.book(details).await?;
    info!("Booked {}", confirmation.transaction_id);

    Ok(Json(json!({
        "success": true,
        "message": confirmation.message,
    })))
}
