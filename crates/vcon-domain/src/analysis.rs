//! Analysis module - derived insights attached to a document in phase 2

use serde::{Deserialize, Serialize};

/// A single follow-up item extracted from the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Who the item is assigned to
    pub assignee: String,

    /// What needs to be done
    pub description: String,

    /// Optional due date, carried through as given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// One batch of derived analysis from an external producer
///
/// Records accumulate: each successful phase-2 call appends one. The
/// `source` identifies the producer (e.g. a model name) for attribution and
/// is distinct from the document-level conversation source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Conversation summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Extracted action items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_items: Vec<ActionItem>,

    /// Key topics, order-preserving and de-duplicated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_topics: Vec<String>,

    /// Key decisions in the order they were reported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_decisions: Vec<String>,

    /// Classification label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Producer identity (e.g. "gpt-4", "claude-3")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
