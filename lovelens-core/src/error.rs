//! Error types for lovelens-core

use thiserror::Error;

/// Main error type for the lovelens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// No line of the input matched a recognised transcript format
    #[error(
        "no valid messages found; sample lines from the input:\n{}",
        sample.join("\n")
    )]
    NoMessagesFound {
        /// Up to five raw non-empty lines from the start of the input
        sample: Vec<String>,
    },

    /// The transcript is not a two-party chat
    #[error(
        "expected a chat between exactly two people, found {} participant(s): {}",
        found.len(),
        found.join(", ")
    )]
    ParticipantCount { found: Vec<String> },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A lexicon keyword produced an unusable pattern
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for lovelens-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_messages_found_display_includes_sample() {
        let err = Error::NoMessagesFound {
            sample: vec!["hello".to_string(), "world".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("no valid messages found"));
        assert!(text.ends_with("hello\nworld"));
    }

    #[test]
    fn test_participant_count_display() {
        let err = Error::ParticipantCount {
            found: vec!["Alice".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "expected a chat between exactly two people, found 1 participant(s): Alice"
        );
    }
}
