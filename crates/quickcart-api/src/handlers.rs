//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its JSON body via axum extractors, calls into the
//! chat engine or the repositories, and returns a JSON response.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use quickcart_chat::ChatReply;
use quickcart_core::types::{ConversationRecord, ProductSummary};
use quickcart_storage::{ConversationRepository, ProductRepository};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

/// Request body for POST /chat.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for POST /chat/search_products.
#[derive(Debug, Default, Deserialize)]
pub struct ProductSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductSearchResponse {
    pub products: Vec<ProductSummary>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntentInfo {
    pub tag: String,
    pub pattern_count: usize,
    pub response_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntentsResponse {
    pub intents: Vec<IntentInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub intents: usize,
    pub messages: u64,
}

pub const NO_PRODUCTS_MESSAGE: &str =
    "Sorry, I couldn't find any products matching your search.";

// =============================================================================
// Chat
// =============================================================================

/// POST /chat - classify a message and reply.
///
/// A body that is missing, malformed or has an empty `message` gets a 400.
/// The turn is recorded in the conversation log; a logging failure does not
/// affect the reply.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let message = body
        .ok()
        .and_then(|Json(req)| req.message)
        .unwrap_or_default();

    let reply = state.engine.reply(&message)?;

    let history = ConversationRepository::new(state.database.clone());
    if let Err(e) = history.append(&message, &reply.response) {
        warn!("Failed to record conversation turn: {}", e);
    }

    Ok(Json(reply))
}

/// POST /chat/search_products - look up products by name.
///
/// Always answers 200; storage failures degrade to an empty result.
pub async fn search_products(
    State(state): State<AppState>,
    body: Result<Json<ProductSearchRequest>, JsonRejection>,
) -> Json<ProductSearchResponse> {
    let query = body
        .ok()
        .and_then(|Json(req)| req.query)
        .unwrap_or_default()
        .to_lowercase();

    let repo = ProductRepository::new(state.database.clone());
    match repo.search_by_name(&query, state.config.storage.product_search_limit) {
        Ok(products) => {
            debug!(query = %query, found = products.len(), "Product search");
            let products: Vec<ProductSummary> =
                products.into_iter().map(|p| p.into_summary()).collect();
            let message = format!("I found {} products matching your search.", products.len());
            Json(ProductSearchResponse { products, message })
        }
        Err(e) => {
            warn!("Error searching products: {}", e);
            Json(ProductSearchResponse {
                products: Vec::new(),
                message: NO_PRODUCTS_MESSAGE.to_string(),
            })
        }
    }
}

// =============================================================================
// History, intents, health
// =============================================================================

/// GET /history - most recent conversation turns, newest first.
pub async fn history(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversationRecord>>, ApiError> {
    let repo = ConversationRepository::new(state.database.clone());
    let records = repo.recent(state.config.storage.history_limit)?;
    Ok(Json(records))
}

/// GET /intents - the loaded intent catalog, summarized.
pub async fn intents(State(state): State<AppState>) -> Json<IntentsResponse> {
    let intents = state
        .engine
        .catalog()
        .iter()
        .map(|intent| IntentInfo {
            tag: intent.tag.clone(),
            pattern_count: intent.patterns.len(),
            response_count: intent.responses.len(),
        })
        .collect();

    Json(IntentsResponse { intents })
}

/// GET /health - liveness plus a few counters.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let messages = ConversationRepository::new(state.database.clone())
        .count()
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        intents: state.engine.catalog().len(),
        messages,
    })
}
