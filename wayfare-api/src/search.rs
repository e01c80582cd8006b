use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::info;
use wayfare_order::orchestrator::UNRESOLVED_DESTINATION;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/search", post(search))
}

/// `query` must be present and not `null` or `""`. Any other non-string
/// value is searched as "no query" and ends in the unresolved response.
async fn search(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body?;
    let query = match body.get("query") {
        None | Some(Value::Null) => None,
        Some(Value::String(query)) if query.is_empty() => None,
        Some(query) => Some(query),
    }
    .ok_or_else(|| AppError::ValidationError("Query is required".to_string()))?;
    info!("Search request: {}", query);

    let Some(results) = state.orchestrator.search(query.as_str()).await else {
        return Ok(Json(json!({
            "success": false,
            "message": UNRESOLVED_DESTINATION,
        })));
    };

    Ok(Json(json!({
        "success": true,
        "destination": results.destination,
        "destinationCode": results.destination_code,
        "flights": results.flights,
        "hotels": results.hotels,
    })))
}
