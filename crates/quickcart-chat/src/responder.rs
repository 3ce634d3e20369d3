//! Reply selection for a match result.

use quickcart_core::config::ResponseSelection;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::matcher::MatchResult;

/// Reply used when no intent matched.
pub const FALLBACK_RESPONSE: &str = "I'm not sure I understand. Could you please rephrase that?";

/// Picks a reply from the winning intent's responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Responder {
    selection: ResponseSelection,
}

impl Responder {
    pub fn new(selection: ResponseSelection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> ResponseSelection {
        self.selection
    }

    /// Reply for `result` using the thread-local RNG.
    pub fn respond(&self, result: &MatchResult<'_>) -> String {
        self.respond_with(result, &mut rand::rng())
    }

    /// Reply for `result` drawing randomness from `rng`.
    pub fn respond_with<R: Rng + ?Sized>(&self, result: &MatchResult<'_>, rng: &mut R) -> String {
        let Some(intent) = result.intent else {
            return FALLBACK_RESPONSE.to_string();
        };

        let reply = match self.selection {
            ResponseSelection::Random => intent.responses.choose(rng),
            ResponseSelection::First => intent.responses.first(),
        };

        // Catalog validation guarantees at least one response.
        reply
            .cloned()
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string())
    }
}
