use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Conversation log
// =============================================================================

/// One chat turn in the append-only conversation log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Monotonic row identifier assigned by the store.
    pub id: i64,
    /// The message the shopper sent.
    pub user_message: String,
    /// The reply the assistant produced.
    pub bot_response: String,
    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Products
// =============================================================================

/// A catalog product as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Create a product with a fresh identifier.
    pub fn new(name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Project into the summary shape shown in the chat widget.
    pub fn into_summary(self) -> ProductSummary {
        let url = format!("/product/{}", self.id);
        ProductSummary {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            url,
        }
    }
}

/// Compact product card returned by product search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub image: String,
    /// Storefront link, `/product/{id}`.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_summary_url() {
        let product = Product::new("Apple AirPods Pro", 249.99, "/img/airpods.png");
        let id = product.id;
        let summary = product.into_summary();
        assert_eq!(summary.id, id);
        assert_eq!(summary.url, format!("/product/{}", id));
        assert_eq!(summary.name, "Apple AirPods Pro");
        assert_eq!(summary.price, 249.99);
    }

    #[test]
    fn test_product_deserialize_without_id_or_image() {
        let product: Product =
            serde_json::from_str(r#"{"name": "Bose QuietComfort 45", "price": 329.0}"#).unwrap();
        assert_eq!(product.name, "Bose QuietComfort 45");
        assert!(product.image.is_empty());
        assert!(!product.id.is_nil());
    }

    #[test]
    fn test_conversation_record_serializes_snake_case() {
        let record = ConversationRecord {
            id: 7,
            user_message: "hello".to_string(),
            bot_response: "Welcome!".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["user_message"], "hello");
        assert_eq!(json["bot_response"], "Welcome!");
        assert!(json["timestamp"].is_string());
    }
}
