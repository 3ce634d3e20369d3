//! Best-match intent selection.
//!
//! Scans every pattern of every intent in catalog order and keeps the intent
//! behind the single highest-scoring pattern. Comparison is strictly
//! greater-than, so the first pattern to reach a score wins ties. Scoring
//! itself is a [`ScoringStrategy`] and can be swapped without touching the
//! scan.

use crate::catalog::{Intent, IntentCatalog};
use crate::normalizer::{Normalizer, TokenSet};

// =============================================================================
// Scoring
// =============================================================================

/// Scores one pattern's tokens against the input tokens.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, input: &TokenSet, pattern: &TokenSet) -> usize;
}

/// Counts input tokens that also occur in the pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapScorer;

impl ScoringStrategy for OverlapScorer {
    fn score(&self, input: &TokenSet, pattern: &TokenSet) -> usize {
        input.overlap(pattern)
    }
}

// =============================================================================
// MatchResult
// =============================================================================

/// Outcome of a catalog scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// The winning intent, or `None` when nothing scored above zero.
    pub intent: Option<&'a Intent>,
    /// Score of the winning pattern; `0` when there is no winner.
    pub score: usize,
}

impl<'a> MatchResult<'a> {
    pub fn none() -> Self {
        Self {
            intent: None,
            score: 0,
        }
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.intent.map(|i| i.tag.as_str())
    }

    pub fn is_match(&self) -> bool {
        self.intent.is_some()
    }
}

// =============================================================================
// Matcher
// =============================================================================

/// Selects the best intent for a normalized input.
#[derive(Debug, Clone)]
pub struct Matcher<S = OverlapScorer> {
    normalizer: Normalizer,
    scorer: S,
}

impl Matcher<OverlapScorer> {
    /// Matcher using token-overlap scoring.
    pub fn new(normalizer: Normalizer) -> Self {
        Self::with_scorer(normalizer, OverlapScorer)
    }
}

impl<S: ScoringStrategy> Matcher<S> {
    pub fn with_scorer(normalizer: Normalizer, scorer: S) -> Self {
        Self { normalizer, scorer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Find the intent whose best pattern scores highest against `input`.
    pub fn best_match<'c>(&self, input: &TokenSet, catalog: &'c IntentCatalog) -> MatchResult<'c> {
        let mut best = MatchResult::none();

        if input.is_empty() {
            return best;
        }

        for intent in catalog {
            for pattern in &intent.patterns {
                let pattern_tokens = self.normalizer.normalize(pattern);
                let score = self.scorer.score(input, &pattern_tokens);
                if score > best.score {
                    best = MatchResult {
                        intent: Some(intent),
                        score,
                    };
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::LanguageResources;
    use std::sync::Arc;

    fn normalizer() -> Normalizer {
        Normalizer::new(Arc::new(LanguageResources::english().unwrap()))
    }

    fn matcher() -> Matcher {
        Matcher::new(normalizer())
    }

    fn intent(tag: &str, patterns: &[&str]) -> Intent {
        Intent {
            tag: tag.to_string(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            responses: vec![format!("{} reply", tag)],
        }
    }

    fn catalog(intents: Vec<Intent>) -> IntentCatalog {
        IntentCatalog::from_intents(intents).unwrap()
    }

    fn best<'c>(m: &Matcher, text: &str, catalog: &'c IntentCatalog) -> MatchResult<'c> {
        let input = m.normalizer().normalize(text);
        m.best_match(&input, catalog)
    }

    // ---- Built-in catalog ----

    #[test]
    fn test_hello_selects_greeting() {
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "hello", &catalog);
        assert_eq!(result.tag(), Some("greeting"));
        assert!(result.score >= 1);
    }

    #[test]
    fn test_gibberish_matches_nothing() {
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "asdkjfh qwrpoiu", &catalog);
        assert_eq!(result, MatchResult::none());
        assert!(!result.is_match());
    }

    #[test]
    fn test_stopwords_only_matches_nothing() {
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "Do you have it?", &catalog);
        assert_eq!(result.score, 0);
        assert!(result.intent.is_none());
    }

    #[test]
    fn test_order_tracking_question() {
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "How do I track my orders?", &catalog);
        assert_eq!(result.tag(), Some("order_tracking"));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_return_policy_question() {
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "What is your return policy?", &catalog);
        assert_eq!(result.tag(), Some("return_policy"));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_payment_question() {
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "Do you accept PayPal?", &catalog);
        assert_eq!(result.tag(), Some("payment_methods"));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_builtin_tie_goes_to_earlier_intent() {
        // "shipping time" and "help" each score 1; shipping is declared first.
        let m = matcher();
        let catalog = IntentCatalog::builtin().unwrap();
        let result = best(&m, "help with shipping", &catalog);
        assert_eq!(result.tag(), Some("shipping"));
        assert_eq!(result.score, 1);
    }

    // ---- Scan order and tie-break ----

    #[test]
    fn test_tie_break_follows_declaration_order() {
        let m = matcher();
        let first = catalog(vec![
            intent("status", &["order status"]),
            intent("tracking", &["order tracking"]),
        ]);
        assert_eq!(best(&m, "order", &first).tag(), Some("status"));

        let swapped = catalog(vec![
            intent("tracking", &["order tracking"]),
            intent("status", &["order status"]),
        ]);
        assert_eq!(best(&m, "order", &swapped).tag(), Some("tracking"));
    }

    #[test]
    fn test_higher_score_later_in_scan_wins() {
        let m = matcher();
        let c = catalog(vec![
            intent("shoes", &["shoes"]),
            intent("red_shoes", &["red shoes"]),
        ]);
        let result = best(&m, "red shoes", &c);
        assert_eq!(result.tag(), Some("red_shoes"));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_pattern_scores_are_not_summed_per_intent() {
        // Two single-token patterns do not add up to beat one two-token pattern.
        let m = matcher();
        let c = catalog(vec![
            intent("split", &["red", "shoes"]),
            intent("joined", &["red shoes"]),
        ]);
        let result = best(&m, "red shoes", &c);
        assert_eq!(result.tag(), Some("joined"));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_intent_with_only_stopword_patterns_never_wins() {
        let m = matcher();
        let c = catalog(vec![
            intent("hollow", &["do you have", "is it"]),
            intent("stock", &["in stock"]),
        ]);
        assert_eq!(best(&m, "do you have it in stock", &c).tag(), Some("stock"));
        assert!(best(&m, "do you have it", &c).intent.is_none());
    }

    #[test]
    fn test_lemmatized_input_matches_plural_pattern() {
        let m = matcher();
        let c = catalog(vec![intent("payment_methods", &["payment methods"])]);
        let result = best(&m, "which payment method works?", &c);
        assert_eq!(result.tag(), Some("payment_methods"));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let m = matcher();
        let c = IntentCatalog::builtin().unwrap();
        let result = m.best_match(&TokenSet::default(), &c);
        assert_eq!(result, MatchResult::none());
    }

    // ---- Pluggable scoring ----

    /// Scores only complete pattern coverage.
    struct FullCoverageScorer;

    impl ScoringStrategy for FullCoverageScorer {
        fn score(&self, input: &TokenSet, pattern: &TokenSet) -> usize {
            let hits = input.overlap(pattern);
            if !pattern.is_empty() && hits == pattern.len() {
                hits
            } else {
                0
            }
        }
    }

    #[test]
    fn test_custom_scorer_changes_scores_not_scan() {
        let m = Matcher::with_scorer(normalizer(), FullCoverageScorer);
        let c = catalog(vec![
            intent("order_tracking", &["track order"]),
            intent("order_status", &["order status"]),
            intent("order", &["order"]),
        ]);
        // Partial overlap with the first two patterns no longer counts.
        let input = m.normalizer().normalize("order please");
        let result = m.best_match(&input, &c);
        assert_eq!(result.tag(), Some("order"));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_overlap_scorer_counts_shared_tokens() {
        let input: TokenSet = ["track", "order", "today"].into_iter().collect();
        let pattern: TokenSet = ["track", "order"].into_iter().collect();
        assert_eq!(OverlapScorer.score(&input, &pattern), 2);
    }
}
