//! Error types for the intent engine.

use quickcart_core::error::QuickCartError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("invalid intent catalog: {0}")]
    Catalog(String),
    #[error("language resources unavailable: {0}")]
    Resource(String),
}

impl From<ChatError> for QuickCartError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Catalog(msg) => QuickCartError::Catalog(msg),
            ChatError::Resource(msg) => QuickCartError::Resource(msg),
            other => QuickCartError::Api(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::Catalog("duplicate tag 'help'".to_string()).to_string(),
            "invalid intent catalog: duplicate tag 'help'"
        );
        assert_eq!(
            ChatError::Resource("no stopwords".to_string()).to_string(),
            "language resources unavailable: no stopwords"
        );
    }

    #[test]
    fn test_catalog_error_maps_to_core_catalog() {
        let err: QuickCartError = ChatError::Catalog("empty".to_string()).into();
        assert!(matches!(err, QuickCartError::Catalog(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_resource_error_maps_to_core_resource() {
        let err: QuickCartError = ChatError::Resource("bad toml".to_string()).into();
        assert!(matches!(err, QuickCartError::Resource(_)));
    }

    #[test]
    fn test_input_errors_map_to_api() {
        let err: QuickCartError = ChatError::EmptyMessage.into();
        assert!(matches!(err, QuickCartError::Api(_)));
    }
}
