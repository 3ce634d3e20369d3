//! Database schema migrations.
//!
//! Applies the initial schema: the conversation log (`messages`), the
//! product catalog (`products`), and the `schema_migrations` tracking table.

use rusqlite::Connection;
use tracing::info;

use quickcart_core::error::QuickCartError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), QuickCartError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| QuickCartError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| {
            QuickCartError::Storage(format!("Failed to query migration version: {}", e))
        })?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: conversation log and product catalog.
fn apply_v1(conn: &Connection) -> Result<(), QuickCartError> {
    conn.execute_batch(
        "
        -- Append-only conversation log, one row per chat turn.
        CREATE TABLE IF NOT EXISTS messages (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_message    TEXT NOT NULL,
            bot_response    TEXT NOT NULL,
            timestamp       INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_messages_timestamp
            ON messages (timestamp DESC, id DESC);

        -- Products searchable from the chat widget.
        CREATE TABLE IF NOT EXISTS products (
            id              TEXT PRIMARY KEY NOT NULL,
            name            TEXT NOT NULL,
            price           REAL NOT NULL CHECK (price >= 0),
            image           TEXT NOT NULL DEFAULT '',
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_products_name
            ON products (name COLLATE NOCASE);

        INSERT INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| QuickCartError::Storage(format!("Migration v1 failed: {}", e)))?;

    Ok(())
}
