//! Error types for the generator

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised when input data is invalid or a phase is misused
///
/// Malformed address tokens are deliberately NOT represented here: they
/// degrade to best-effort participant records so one bad header never
/// aborts a conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields absent or blank, all named at once
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Document source outside the closed set
    #[error(
        "Invalid source type '{0}'. Must be one of: \
         email_thread, meeting_transcript, chat, forwarded_email"
    )]
    UnknownSource(String),

    /// `entry_date` present but unparseable
    #[error("Invalid entry_date '{value}': {reason}")]
    InvalidTimestamp {
        /// The value as supplied
        value: String,
        /// Why it failed to parse
        reason: String,
    },

    /// Action item entry missing required sub-fields
    #[error("Invalid action item at index {index}: missing {}", .missing.join(", "))]
    InvalidActionItem {
        /// Index of the offending entry in the payload
        index: usize,
        /// The absent sub-fields
        missing: Vec<String>,
    },

    /// Analysis payload with no substantive field
    #[error("Analysis payload is empty: at least one of summary, action_items, \
             key_topics, key_decisions, or category is required")]
    EmptyAnalysis,

    /// Phase 2 invoked before phase 1 produced a document
    #[error("No base document: call generate_base before add_analysis")]
    NoBaseDocument,
}
