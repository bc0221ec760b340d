//! Typed phase inputs, deserialized at the boundary
//!
//! Both phases accept loosely structured JSON mappings. These structs give
//! every recognized key an explicit optional field so that business logic
//! only ever sees typed data. Fields that need cross-field or closed-set
//! validation (`source`, `entry_date`, action items) arrive raw and are
//! checked eagerly by the generator.

use serde::Deserialize;

/// Raw phase-1 input: one conversation record
///
/// Required fields are enforced by validation, not by the type: `subject`
/// (alias `title`) and `from` always, plus `content` for ordinary records
/// or `user_note` + `original_content` when `is_forwarded` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConversationInput {
    /// Conversation subject; `title` is accepted as an alias
    #[serde(alias = "title")]
    pub subject: Option<String>,

    /// Sender header, a single address token
    pub from: Option<String>,

    /// Recipient header, one token or a comma-separated list
    pub to: Option<String>,

    /// Carbon-copy header, one token or a comma-separated list
    pub cc: Option<String>,

    /// Body text for ordinary (non-forwarded) records
    pub content: Option<String>,

    /// Document source wire name; defaults to `email_thread`
    pub source: Option<String>,

    /// Event timestamp, ISO-8601
    pub entry_date: Option<String>,

    /// Recording length for meeting media
    pub duration_minutes: Option<f64>,

    /// Auxiliary attendee list for non-email media
    pub participants: Vec<String>,

    /// Whether this record is a forwarded email
    pub is_forwarded: bool,

    /// Forwarder's note (required when forwarded)
    pub user_note: Option<String>,

    /// Embedded original message (required when forwarded)
    pub original_content: Option<String>,

    /// Message-ID header
    pub message_id: Option<String>,

    /// Reply-To header
    pub reply_to: Option<String>,

    /// In-Reply-To header
    pub in_reply_to: Option<String>,

    /// References header, a whitespace-separated string or a list
    pub references: Option<References>,
}

/// References header in either of its JSON spellings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum References {
    /// Single string, message IDs separated by whitespace
    Text(String),
    /// Already a list of message IDs
    List(Vec<String>),
}

impl References {
    /// Normalize to a list of message IDs
    pub fn to_list(&self) -> Vec<String> {
        match self {
            References::Text(s) => s.split_whitespace().map(str::to_string).collect(),
            References::List(items) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Raw phase-2 input: one analysis payload from an external producer
///
/// Every field is individually optional, but the payload as a whole must be
/// substantive; the generator rejects a payload carrying nothing but a
/// `source`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisInput {
    /// Conversation summary
    pub summary: Option<String>,

    /// Extracted action items
    pub action_items: Vec<ActionItemInput>,

    /// Key topics
    pub key_topics: Vec<String>,

    /// Key decisions
    pub key_decisions: Vec<String>,

    /// Classification label
    pub category: Option<String>,

    /// Producer identity for attribution (e.g. "gpt-4")
    pub source: Option<String>,
}

/// Raw action item entry; `assignee` and `description` are enforced by
/// validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionItemInput {
    /// Who the item is assigned to
    pub assignee: Option<String>,

    /// What needs to be done
    pub description: Option<String>,

    /// Optional due date, carried through as given
    pub due_date: Option<String>,
}
