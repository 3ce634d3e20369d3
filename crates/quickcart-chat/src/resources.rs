//! Language resources for text normalization.
//!
//! The stopword set and lemma tables are loaded once at startup into an
//! immutable [`LanguageResources`] handle that every [`Normalizer`] shares.
//! A resource document that cannot be read or parsed is a startup failure.
//!
//! [`Normalizer`]: crate::normalizer::Normalizer

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ChatError;

/// Built-in English resources, compiled into the binary.
const ENGLISH_RESOURCES: &str = include_str!("../resources/english.toml");

/// On-disk shape of a resource document.
#[derive(Debug, Deserialize)]
struct ResourceFile {
    stopwords: Vec<String>,
    #[serde(default)]
    invariant_words: Vec<String>,
    #[serde(default)]
    lemma_exceptions: HashMap<String, String>,
}

/// Immutable stopword and lemma data for one language.
#[derive(Debug, Clone)]
pub struct LanguageResources {
    stopwords: HashSet<String>,
    invariant_words: HashSet<String>,
    lemma_exceptions: HashMap<String, String>,
}

impl LanguageResources {
    /// Load the built-in English resources.
    pub fn english() -> Result<Self, ChatError> {
        Self::from_toml_str(ENGLISH_RESOURCES)
    }

    /// Load resources from a TOML file with the same shape as the built-in one.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Resource(format!("failed to read {}: {}", path.display(), e))
        })?;
        let resources = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            stopwords = resources.stopwords.len(),
            "Language resources loaded"
        );
        Ok(resources)
    }

    /// Parse resources from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ChatError> {
        let file: ResourceFile =
            toml::from_str(content).map_err(|e| ChatError::Resource(e.to_string()))?;

        if file.stopwords.is_empty() {
            return Err(ChatError::Resource("stopword list is empty".to_string()));
        }

        let lower = |words: Vec<String>| -> HashSet<String> {
            words.into_iter().map(|w| w.to_lowercase()).collect()
        };

        Ok(Self {
            stopwords: lower(file.stopwords),
            invariant_words: lower(file.invariant_words),
            lemma_exceptions: file
                .lemma_exceptions
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
                .collect(),
        })
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Words whose surface form is already the lemma.
    pub fn is_invariant(&self, token: &str) -> bool {
        self.invariant_words.contains(token)
    }

    /// Irregular lemma for `token`, if one is listed.
    pub fn lemma_exception(&self, token: &str) -> Option<&str> {
        self.lemma_exceptions.get(token).map(String::as_str)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}
