//! Intent engine for the QuickCart shopping assistant.
//!
//! Normalizes a shopper's message, scores it against a static intent
//! catalog by token overlap, and picks a canned reply.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod product_query;
pub mod resources;
pub mod responder;

pub use catalog::{Intent, IntentCatalog};
pub use engine::{ChatEngine, ChatReply};
pub use error::ChatError;
pub use matcher::{MatchResult, Matcher, OverlapScorer, ScoringStrategy};
pub use normalizer::{Normalizer, TokenSet};
pub use product_query::looks_like_product_search;
pub use resources::LanguageResources;
pub use responder::{Responder, FALLBACK_RESPONSE};
