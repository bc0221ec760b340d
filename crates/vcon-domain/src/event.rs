//! Event module - timed pieces of conversation content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of message event, derived from the document source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An email message body
    Email,

    /// The forwarder's own note on a forwarded email
    ForwardedNote,

    /// Meeting transcript content
    MeetingTranscript,

    /// Chat log content
    Chat,
}

impl EventKind {
    /// Get the kind name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Email => "email",
            EventKind::ForwardedNote => "forwarded_note",
            EventKind::MeetingTranscript => "meeting_transcript",
            EventKind::Chat => "chat",
        }
    }
}

/// Message headers and media attributes carried through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Message-ID header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Reply-To header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,

    /// In-Reply-To header (message ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,

    /// References header (message IDs)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,

    /// Recording length for meeting media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

/// A single timed piece of conversation content
///
/// Events are ordered by processing order; for forwarded mail the embedded
/// original comes before the forwarder's note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Stable identifier within the document (`m1`, `m2`, ...)
    pub id: String,

    /// Event kind
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Event time from the input's `entry_date`; `None` when unspecified
    pub timestamp: Option<DateTime<Utc>>,

    /// Subject line for this event, forward prefixes stripped where relevant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Body text
    pub content: String,

    /// Headers and media attributes
    #[serde(default)]
    pub metadata: EventMetadata,
}
