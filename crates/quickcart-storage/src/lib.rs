//! QuickCart storage crate - SQLite persistence for the conversation log
//! and the product catalog.
//!
//! Provides a WAL-mode SQLite database with migrations and repository
//! implementations used by the HTTP layer.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{ConversationRepository, ProductRepository};
