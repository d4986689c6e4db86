//! Unified error types for DeckView
//!
//! Navigation-time errors are recovered where they occur; the enum exists so
//! each recovery site can log a precise cause.

/// Unified error type for DeckView operations
#[derive(Debug, thiserror::Error)]
pub enum DeckviewError {
    /// Navigation target outside `[0, total-1]`
    #[error("Slide {target} is out of bounds (deck has {total} slides)")]
    OutOfBoundsNavigation { target: usize, total: usize },

    /// A render target is switched off or absent
    #[error("Missing view target: {0}")]
    MissingTarget(&'static str),

    /// Location fragment could not be parsed
    #[error("Malformed location fragment: {0:?}")]
    MalformedHash(String),

    /// System clipboard could not be reached
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// Deck file contains no slides
    #[error("Deck contains no slides")]
    EmptyDeck,

    /// Deck file could not be parsed
    #[error("Content error: {0}")]
    Content(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors (deck loading, location file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using DeckviewError
pub type Result<T> = std::result::Result<T, DeckviewError>;

impl DeckviewError {
    /// Create a Content error
    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a MalformedHash error
    pub fn malformed_hash(raw: impl Into<String>) -> Self {
        Self::MalformedHash(raw.into())
    }

    /// Create a ClipboardUnavailable error
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::ClipboardUnavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckviewError::OutOfBoundsNavigation {
            target: 12,
            total: 12,
        };
        assert_eq!(
            format!("{}", err),
            "Slide 12 is out of bounds (deck has 12 slides)"
        );

        let err = DeckviewError::MissingTarget("counter");
        assert_eq!(format!("{}", err), "Missing view target: counter");

        let err = DeckviewError::malformed_hash("#slide-x");
        assert_eq!(
            format!("{}", err),
            "Malformed location fragment: \"#slide-x\""
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DeckviewError = io_err.into();
        assert!(matches!(err, DeckviewError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
