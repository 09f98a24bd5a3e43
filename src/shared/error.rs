//! Shared Error Types
//!
//! The domain error taxonomy for the messaging engine. Validation errors are
//! raised before any I/O; storage and directory failures wrap their sources.
//!
//! # Error Categories
//!
//! - `InvalidIdentifier` - Malformed participant or thread identifier
//! - `EmptyMessage` - Neither content nor attachments supplied
//! - `ContentTooLong` - Message text above the accepted bound
//! - `ThreadNotFound` - Unknown thread, or a viewer who is not a participant
//! - `Directory` - Participant directory lookup failure
//! - `Database` - Storage layer failure
use thiserror::Error;

use crate::shared::messaging::MAX_CONTENT_CHARS;

/// Errors produced by the messaging services
#[derive(Debug, Error)]
pub enum MessagingError {
    /// An identifier failed validation before any I/O was attempted
    #[error("invalid identifier in '{field}'")]
    InvalidIdentifier {
        /// The field that failed validation
        field: &'static str,
    },

    /// A message with neither text content nor attachments
    #[error("message requires text content or at least one attachment")]
    EmptyMessage,

    /// Message text above [`MAX_CONTENT_CHARS`]
    #[error("message content exceeds {MAX_CONTENT_CHARS} characters")]
    ContentTooLong,

    /// The thread does not exist, or the caller is not one of its
    /// participants. Non-participants get this rather than a forbidden
    /// error so thread existence is never leaked.
    #[error("thread not found")]
    ThreadNotFound,

    /// Participant directory lookup failed
    #[error("participant directory error: {message}")]
    Directory {
        /// Human-readable error message
        message: String,
    },

    /// Storage layer error
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl MessagingError {
    /// Create a new invalid-identifier error for a named field
    pub fn invalid(field: &'static str) -> Self {
        Self::InvalidIdentifier { field }
    }

    /// Create a new directory error
    pub fn directory(message: impl Into<String>) -> Self {
        Self::Directory {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier() {
        let error = MessagingError::invalid("sender_id");
        match error {
            MessagingError::InvalidIdentifier { field } => assert_eq!(field, "sender_id"),
            _ => panic!("Expected InvalidIdentifier"),
        }
    }

    #[test]
    fn test_directory_error() {
        let error = MessagingError::directory("user service unavailable");
        match error {
            MessagingError::Directory { message } => {
                assert_eq!(message, "user service unavailable");
            }
            _ => panic!("Expected Directory"),
        }
    }

    #[test]
    fn test_error_display() {
        let error = MessagingError::EmptyMessage;
        assert!(format!("{}", error).contains("text content or at least one attachment"));

        let error = MessagingError::ContentTooLong;
        assert!(format!("{}", error).contains("4000"));
    }

    #[test]
    fn test_from_sqlx_error() {
        let error: MessagingError = sqlx::Error::RowNotFound.into();
        match error {
            MessagingError::Database(_) => {}
            _ => panic!("Expected Database variant"),
        }
    }
}
