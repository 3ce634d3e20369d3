//! Chat engine: one classify-and-respond pass per message.
//!
//! Wires the normalizer, matcher and responder over a shared read-only
//! catalog. Holds no per-conversation state, so one engine serves every
//! request concurrently.

use std::sync::Arc;

use quickcart_core::config::ChatConfig;
use serde::Serialize;
use tracing::debug;

use crate::catalog::IntentCatalog;
use crate::error::ChatError;
use crate::matcher::{MatchResult, Matcher};
use crate::normalizer::Normalizer;
use crate::product_query::looks_like_product_search;
use crate::resources::LanguageResources;
use crate::responder::Responder;

/// The engine's answer to a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Reply text shown to the shopper.
    pub response: String,
    /// Tag of the matched intent, if any.
    pub intent: Option<String>,
    /// Overlap score of the winning pattern.
    pub score: usize,
    /// Whether the storefront should also run a product search.
    pub product_search: bool,
}

/// Stateless intent engine.
#[derive(Debug)]
pub struct ChatEngine {
    catalog: IntentCatalog,
    matcher: Matcher,
    responder: Responder,
    max_message_length: usize,
}

impl ChatEngine {
    pub fn new(
        resources: Arc<LanguageResources>,
        catalog: IntentCatalog,
        config: &ChatConfig,
    ) -> Self {
        Self {
            catalog,
            matcher: Matcher::new(Normalizer::new(resources)),
            responder: Responder::new(config.response_selection),
            max_message_length: config.max_message_length,
        }
    }

    /// Engine over the built-in English resources and intent catalog.
    pub fn builtin(config: &ChatConfig) -> Result<Self, ChatError> {
        let resources = Arc::new(LanguageResources::english()?);
        let catalog = IntentCatalog::builtin()?;
        Ok(Self::new(resources, catalog, config))
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// Classify `message` without producing a reply.
    pub fn classify(&self, message: &str) -> MatchResult<'_> {
        let tokens = self.matcher.normalizer().normalize(message);
        self.matcher.best_match(&tokens, &self.catalog)
    }

    /// Validate, classify and answer `message`.
    pub fn reply(&self, message: &str) -> Result<ChatReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        let result = self.classify(message);
        let response = self.responder.respond(&result);

        debug!(
            intent = result.tag().unwrap_or("none"),
            score = result.score,
            "Message classified"
        );

        Ok(ChatReply {
            response,
            intent: result.tag().map(str::to_string),
            score: result.score,
            product_search: looks_like_product_search(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Intent;
    use crate::responder::FALLBACK_RESPONSE;
    use quickcart_core::config::ResponseSelection;

    fn engine() -> ChatEngine {
        ChatEngine::builtin(&ChatConfig::default()).unwrap()
    }

    #[test]
    fn test_reply_to_greeting() {
        let engine = engine();
        let reply = engine.reply("hello").unwrap();
        assert_eq!(reply.intent.as_deref(), Some("greeting"));
        assert!(reply.score >= 1);
        let greeting = engine.catalog().get("greeting").unwrap();
        assert!(greeting.responses.contains(&reply.response));
        assert!(!reply.product_search);
    }

    #[test]
    fn test_reply_fallback() {
        let reply = engine().reply("asdkjfh qwrpoiu").unwrap();
        assert_eq!(reply.response, FALLBACK_RESPONSE);
        assert_eq!(reply.intent, None);
        assert_eq!(reply.score, 0);
    }

    #[test]
    fn test_reply_rejects_empty_message() {
        assert!(matches!(engine().reply(""), Err(ChatError::EmptyMessage)));
        assert!(matches!(engine().reply("  \n"), Err(ChatError::EmptyMessage)));
    }

    #[test]
    fn test_reply_rejects_long_message() {
        let config = ChatConfig {
            max_message_length: 10,
            ..ChatConfig::default()
        };
        let engine = ChatEngine::builtin(&config).unwrap();
        assert!(engine.reply("0123456789").is_ok());
        assert!(matches!(
            engine.reply("0123456789a"),
            Err(ChatError::MessageTooLong(10))
        ));
    }

    #[test]
    fn test_reply_flags_product_search() {
        let reply = engine().reply("I'm looking for running shoes").unwrap();
        assert!(reply.product_search);
        assert_eq!(reply.intent.as_deref(), Some("product_search"));
    }

    #[test]
    fn test_reply_first_selection_mode() {
        let config = ChatConfig {
            response_selection: ResponseSelection::First,
            ..ChatConfig::default()
        };
        let engine = ChatEngine::builtin(&config).unwrap();
        let expected = engine.catalog().get("greeting").unwrap().responses[0].clone();
        assert_eq!(engine.reply("hi").unwrap().response, expected);
        assert_eq!(engine.reply("good evening").unwrap().response, expected);
    }

    #[test]
    fn test_classify_matches_reply_intent() {
        let engine = engine();
        let result = engine.classify("shipping cost to Canada");
        assert_eq!(result.tag(), Some("shipping"));
        assert_eq!(
            engine.reply("shipping cost to Canada").unwrap().intent.as_deref(),
            Some("shipping")
        );
    }

    #[test]
    fn test_engine_with_custom_catalog() {
        let catalog = IntentCatalog::from_intents(vec![Intent {
            tag: "gift_cards".to_string(),
            patterns: vec!["gift card".to_string()],
            responses: vec!["Gift cards never expire.".to_string()],
        }])
        .unwrap();
        let resources = Arc::new(LanguageResources::english().unwrap());
        let engine = ChatEngine::new(resources, catalog, &ChatConfig::default());

        let reply = engine.reply("Do gift cards expire?").unwrap();
        assert_eq!(reply.intent.as_deref(), Some("gift_cards"));
        assert_eq!(reply.response, "Gift cards never expire.");
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.reply("track order").unwrap().intent)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("order_tracking"));
        }
    }
}
