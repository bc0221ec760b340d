//! Source module - the conversation medium a document was created from

use crate::event::EventKind;
use serde::{Deserialize, Serialize};

/// The medium a conversation record came from
///
/// This is the document-level source (the kind of conversation), distinct
/// from the analysis-level source (the producer identity of an analysis
/// record, e.g. a model name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// A plain email thread
    EmailThread,

    /// A meeting transcript
    MeetingTranscript,

    /// A chat log
    Chat,

    /// An email forwarded with a note from the forwarder
    ForwardedEmail,
}

impl SourceType {
    /// Get the source name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::EmailThread => "email_thread",
            SourceType::MeetingTranscript => "meeting_transcript",
            SourceType::Chat => "chat",
            SourceType::ForwardedEmail => "forwarded_email",
        }
    }

    /// Parse a source from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email_thread" => Some(SourceType::EmailThread),
            "meeting_transcript" => Some(SourceType::MeetingTranscript),
            "chat" => Some(SourceType::Chat),
            "forwarded_email" => Some(SourceType::ForwardedEmail),
            _ => None,
        }
    }

    /// The event kind carried by primary content from this source
    ///
    /// A forwarded email's embedded original is still an email message; the
    /// forwarder's note gets [`EventKind::ForwardedNote`] separately.
    pub fn event_kind(&self) -> EventKind {
        match self {
            SourceType::EmailThread | SourceType::ForwardedEmail => EventKind::Email,
            SourceType::MeetingTranscript => EventKind::MeetingTranscript,
            SourceType::Chat => EventKind::Chat,
        }
    }
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::EmailThread
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid source type: {}", s))
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
