//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression,
//! and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;

/// Smallest request body limit, enough for any routine request.
const MIN_BODY_LIMIT: usize = 64 * 1024;

/// Request body limit for a given maximum message length in characters.
///
/// One character escaped in JSON takes at most twelve bytes (a surrogate
/// pair, `\uXXXX\uXXXX`), so any message the engine would accept fits and
/// one moderately over the length limit still gets the engine's JSON 413.
pub fn body_limit(max_message_length: usize) -> usize {
    max_message_length
        .saturating_mul(12)
        .saturating_add(1024)
        .max(MIN_BODY_LIMIT)
}

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let limit = body_limit(state.config.chat.max_message_length);

    // Storefront origins allowed to call the chat widget endpoints.
    let origins: Vec<HeaderValue> = state
        .config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/chat/search_products", post(handlers::search_products))
        .route("/history", get(handlers::history))
        .route("/intents", get(handlers::intents))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
