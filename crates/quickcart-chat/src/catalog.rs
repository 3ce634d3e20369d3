//! The intent catalog: tagged FAQ topics with example patterns and replies.
//!
//! The catalog is plain configuration data. The built-in QuickCart catalog is
//! embedded from `resources/intents.toml`; a deployment may point at its own
//! file instead. Every constructor validates the catalog, so a bad entry fails
//! at load time rather than during matching.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ChatError;

const BUILTIN_INTENTS: &str = include_str!("../resources/intents.toml");

/// A single FAQ intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Identifier, unique within the catalog.
    pub tag: String,
    /// Example phrases, scanned in order.
    pub patterns: Vec<String>,
    /// Candidate replies.
    pub responses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    intents: Vec<Intent>,
}

/// Validated, read-only collection of intents in declaration order.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

impl IntentCatalog {
    /// The built-in QuickCart catalog.
    pub fn builtin() -> Result<Self, ChatError> {
        Self::from_toml_str(BUILTIN_INTENTS)
    }

    /// Load a catalog from a TOML file with `[[intents]]` tables.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_toml_str(&content)?;
        info!(path = %path.display(), intents = catalog.len(), "Intent catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ChatError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| ChatError::Catalog(e.to_string()))?;
        Self::from_intents(file.intents)
    }

    /// Build a catalog from intents, enforcing tag uniqueness and
    /// non-empty patterns and responses.
    pub fn from_intents(intents: Vec<Intent>) -> Result<Self, ChatError> {
        if intents.is_empty() {
            return Err(ChatError::Catalog("catalog has no intents".to_string()));
        }

        let mut seen = HashSet::new();
        for intent in &intents {
            if intent.tag.trim().is_empty() {
                return Err(ChatError::Catalog("intent tag must not be empty".to_string()));
            }
            if !seen.insert(intent.tag.as_str()) {
                return Err(ChatError::Catalog(format!("duplicate tag '{}'", intent.tag)));
            }
            if intent.patterns.is_empty() {
                return Err(ChatError::Catalog(format!(
                    "intent '{}' has no patterns",
                    intent.tag
                )));
            }
            if intent.responses.is_empty() {
                return Err(ChatError::Catalog(format!(
                    "intent '{}' has no responses",
                    intent.tag
                )));
            }
        }

        Ok(Self { intents })
    }

    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.tag == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intent> {
        self.intents.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|i| i.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl<'a> IntoIterator for &'a IntentCatalog {
    type Item = &'a Intent;
    type IntoIter = std::slice::Iter<'a, Intent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
