//! Text normalization: raw text into a set of lemmatized content tokens.
//!
//! The same [`Normalizer`] is applied to shopper messages and to catalog
//! patterns, so both sides of a match see identical tokenization.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::resources::LanguageResources;

// =============================================================================
// Tokenizer regex (compiled once, reused across calls)
// =============================================================================

/// A word run (letters, digits, underscore) optionally joined by internal
/// hyphens or apostrophes, or any single non-space symbol.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:[-']\w+)*|[^\w\s]").expect("Invalid tokenizer regex")
});

/// Suffix rewrite rules applied in order: (suffix, replacement, minimum stem length).
const SUFFIX_RULES: &[(&str, &str, usize)] = &[
    ("sses", "ss", 1),
    ("ies", "y", 2),
    ("xes", "x", 1),
    ("ches", "ch", 1),
    ("shes", "sh", 1),
];

// =============================================================================
// TokenSet
// =============================================================================

/// A normalized, deduplicated set of tokens.
///
/// Ordered so that debug output and comparisons are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tokens in `self` that also appear in `other`.
    pub fn overlap(&self, other: &TokenSet) -> usize {
        self.0.iter().filter(|t| other.0.contains(*t)).count()
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TokenSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

// =============================================================================
// Normalizer
// =============================================================================

/// Lowercases, tokenizes, removes stopwords and punctuation, and lemmatizes.
#[derive(Debug, Clone)]
pub struct Normalizer {
    resources: Arc<LanguageResources>,
}

impl Normalizer {
    pub fn new(resources: Arc<LanguageResources>) -> Self {
        Self { resources }
    }

    /// Normalize `text` into its content-token set.
    pub fn normalize(&self, text: &str) -> TokenSet {
        self.tokenize(text)
            .into_iter()
            .filter(|t| is_alphanumeric(t) && !self.resources.is_stopword(t))
            .map(|t| self.lemmatize(&t))
            .collect()
    }

    /// Split lowercased `text` into word and punctuation tokens.
    ///
    /// Contractions are split off: `"don't"` yields `"do"`, `"n't"` and
    /// `"what's"` yields `"what"`, `"'s"`.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut tokens = Vec::new();

        for m in TOKEN_RE.find_iter(&lower) {
            let word = m.as_str();
            if word.len() > 3 && word.ends_with("n't") {
                let (head, tail) = word.split_at(word.len() - 3);
                tokens.push(head.to_string());
                tokens.push(tail.to_string());
            } else if let Some(idx) = word.find('\'') {
                let (head, tail) = word.split_at(idx);
                tokens.push(head.to_string());
                tokens.push(tail.to_string());
            } else {
                tokens.push(word.to_string());
            }
        }

        tokens
    }

    /// Reduce a lowercase token to its noun base form.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(lemma) = self.resources.lemma_exception(token) {
            return lemma.to_string();
        }
        if self.resources.is_invariant(token) {
            return token.to_string();
        }

        for (suffix, replacement, min_stem) in SUFFIX_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.chars().count() >= *min_stem {
                    return format!("{}{}", stem, replacement);
                }
            }
        }

        // Plain plural: "orders" -> "order", but not "address", "bus", "this".
        if let Some(stem) = token.strip_suffix('s') {
            if stem.chars().count() >= 3 && !stem.ends_with(&['s', 'u', 'i'][..]) {
                return stem.to_string();
            }
        }

        token.to_string()
    }
}

fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
