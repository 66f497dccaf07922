//! Error types for source resolution and stream opening.

use thiserror::Error;

use crate::token::TokenError;

/// Errors that can surface from resolving sources or opening a stream.
///
/// Collaborator failures are carried through untranslated; the core never
/// rewrites a recording or channel failure into another variant.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The open token could not be decoded into an item and source.
    #[error("Invalid open token: {0}")]
    InvalidToken(#[from] TokenError),

    /// The caller cancelled the request before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// The recording subsystem failed to produce sources.
    #[error("Recording error: {reason}")]
    Recording {
        /// The reason reported by the recording subsystem
        reason: String,
    },

    /// The channel subsystem failed to enumerate sources or open a stream.
    #[error("Channel error: {reason}")]
    Channel {
        /// The reason reported by the channel subsystem
        reason: String,
    },

    /// The media source registry failed.
    #[error("Storage error: {reason}")]
    Storage {
        /// The reason reported by the registry
        reason: String,
    },
}

impl SourceError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::InvalidToken(TokenError::InvalidTypeName { .. }) => {
                "This item cannot be opened as a live stream".to_string()
            }
            SourceError::InvalidToken(_) => "The stream link is invalid or has expired".to_string(),
            SourceError::Cancelled => "The request was cancelled".to_string(),
            SourceError::Recording { .. } => "Recording is unavailable".to_string(),
            SourceError::Channel { reason } => format!("Channel is unavailable: {reason}"),
            SourceError::Storage { .. } => "Media library error occurred".to_string(),
        }
    }

    /// Checks if this error was caused by caller input rather than a subsystem.
    ///
    /// A type name unfit for a token comes from item metadata, not the caller.
    pub fn is_user_error(&self) -> bool {
        matches!(self, SourceError::InvalidToken(TokenError::Malformed { .. }))
    }
}
