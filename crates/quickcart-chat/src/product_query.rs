//! Detection of messages that should also trigger a product lookup.

/// Phrases that mark a message as a product search.
const PRODUCT_SEARCH_CUES: &[&str] = &["find", "search", "looking for"];

/// Whether `message` reads like a request to find products.
///
/// Plain case-insensitive substring test, independent of intent matching.
pub fn looks_like_product_search(message: &str) -> bool {
    let lower = message.to_lowercase();
    PRODUCT_SEARCH_CUES.iter().any(|cue| lower.contains(cue))
}
