use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wayfare_store::app_config::ServerConfig;

pub mod bookings;
pub mod error;
pub mod search;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.server);
    let body_limit = DefaultBodyLimit::max(state.server.body_limit_bytes);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(search::routes())
        .merge(bookings::routes())
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `"*"` allows any origin without credentials; an explicit list allows
/// credentials.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if server.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

async fn root() -> &'static str {
    "Hello from the Wayfare travel API!"
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
