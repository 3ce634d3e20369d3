//! QuickCart API crate - axum HTTP server and route handlers.
//!
//! Exposes the chat endpoint used by the storefront widget, product
//! search, the conversation history, the intent listing and a health check.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
