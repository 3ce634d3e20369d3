//! Repository implementations for SQLite-backed persistence.
//!
//! Provides ConversationRepository and ProductRepository that operate on
//! the Database struct using raw SQL.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use quickcart_core::error::QuickCartError;
use quickcart_core::types::{ConversationRecord, Product};

use crate::db::Database;

/// Repository for the append-only conversation log.
pub struct ConversationRepository {
    db: Arc<Database>,
}

impl ConversationRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Record one chat turn, stamped with the current time.
    pub fn append(
        &self,
        user_message: &str,
        bot_response: &str,
    ) -> Result<ConversationRecord, QuickCartError> {
        let now = Utc::now();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (user_message, bot_response, timestamp)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![user_message, bot_response, now.timestamp()],
            )
            .map_err(|e| QuickCartError::Storage(format!("Failed to save message: {}", e)))?;

            Ok(ConversationRecord {
                id: conn.last_insert_rowid(),
                user_message: user_message.to_string(),
                bot_response: bot_response.to_string(),
                timestamp: Utc
                    .timestamp_opt(now.timestamp(), 0)
                    .single()
                    .unwrap_or(now),
            })
        })
    }

    /// The most recent `limit` turns, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<ConversationRecord>, QuickCartError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, user_message, bot_response, timestamp
                     FROM messages
                     ORDER BY timestamp DESC, id DESC
                     LIMIT ?1",
                )
                .map_err(|e| QuickCartError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![limit], |row| {
                    let timestamp: i64 = row.get(3)?;
                    Ok(ConversationRecord {
                        id: row.get(0)?,
                        user_message: row.get(1)?,
                        bot_response: row.get(2)?,
                        timestamp: Utc
                            .timestamp_opt(timestamp, 0)
                            .single()
                            .unwrap_or_default(),
                    })
                })
                .map_err(|e| QuickCartError::Storage(e.to_string()))?;

            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| QuickCartError::Storage(e.to_string()))
        })
    }

    /// Total number of recorded turns.
    pub fn count(&self) -> Result<u64, QuickCartError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
                .map_err(|e| QuickCartError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

/// Repository for the searchable product catalog.
pub struct ProductRepository {
    db: Arc<Database>,
}

impl ProductRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a product, replacing any existing product with the same ID.
    pub fn insert(&self, product: &Product) -> Result<(), QuickCartError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO products (id, name, price, image)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    product.id.to_string(),
                    product.name,
                    product.price,
                    product.image,
                ],
            )
            .map_err(|e| QuickCartError::Storage(format!("Failed to save product: {}", e)))?;
            Ok(())
        })
    }

    /// Products whose name contains `query`, ignoring case.
    ///
    /// Results are ordered by name. A blank query matches nothing.
    pub fn search_by_name(&self, query: &str, limit: u32) -> Result<Vec<Product>, QuickCartError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, price, image
                     FROM products
                     WHERE instr(unicode_lower(name), ?1) > 0
                     ORDER BY name COLLATE NOCASE, id
                     LIMIT ?2",
                )
                .map_err(|e| QuickCartError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![needle, limit], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                })
                .map_err(|e| QuickCartError::Storage(e.to_string()))?;

            let mut products = Vec::new();
            for row in rows {
                let (id, name, price, image) =
                    row.map_err(|e| QuickCartError::Storage(e.to_string()))?;
                let id = Uuid::parse_str(&id)
                    .map_err(|e| QuickCartError::Storage(format!("Invalid product id: {}", e)))?;
                products.push(Product {
                    id,
                    name,
                    price,
                    image,
                });
            }
            Ok(products)
        })
    }

    /// Total number of stored products.
    pub fn count(&self) -> Result<u64, QuickCartError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
                .map_err(|e| QuickCartError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}
