//! Application state shared across all route handlers.
//!
//! AppState holds references to the chat engine and the database.
//! It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use quickcart_chat::ChatEngine;
use quickcart_core::config::QuickCartConfig;
use quickcart_storage::Database;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The engine
/// and configuration are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<QuickCartConfig>,
    /// Intent engine answering chat messages.
    pub engine: Arc<ChatEngine>,
    /// SQLite database for the conversation log and products.
    pub database: Arc<Database>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    ///
    /// The database is taken already shared so startup tasks (product
    /// seeding) can keep using it.
    pub fn new(config: QuickCartConfig, engine: ChatEngine, database: Arc<Database>) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            database,
            start_time: Instant::now(),
        }
    }
}
