use thiserror::Error;

/// Top-level error type for the QuickCart assistant.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for QuickCartError` so that `?` works across
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuickCartError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Language resource error: {0}")]
    Resource(String),

    #[error("Intent catalog error: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for QuickCartError {
    fn from(err: toml::de::Error) -> Self {
        QuickCartError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for QuickCartError {
    fn from(err: toml::ser::Error) -> Self {
        QuickCartError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for QuickCartError {
    fn from(err: serde_json::Error) -> Self {
        QuickCartError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for QuickCart operations.
pub type Result<T> = std::result::Result<T, QuickCartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(QuickCartError, &str)> = vec![
            (
                QuickCartError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                QuickCartError::Resource("stopwords missing".to_string()),
                "Language resource error: stopwords missing",
            ),
            (
                QuickCartError::Catalog("duplicate tag 'help'".to_string()),
                "Intent catalog error: duplicate tag 'help'",
            ),
            (
                QuickCartError::Storage("disk full".to_string()),
                "Storage error: disk full",
            ),
            (
                QuickCartError::Api("bind failed".to_string()),
                "API error: bind failed",
            ),
            (
                QuickCartError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err = QuickCartError::from(io_err);
        match &err {
            QuickCartError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected Io variant"),
        }
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let err: QuickCartError = err.unwrap_err().into();
        assert!(matches!(err, QuickCartError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let err: QuickCartError = err.unwrap_err().into();
        assert!(matches!(err, QuickCartError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(format!("got {}", value))
        }

        assert_eq!(inner().unwrap(), "got 42");
    }
}
