//! Participant module - conversation parties and their header roles

use serde::{Deserialize, Serialize};

/// Role a participant played, inferred from the header it appeared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Originator (`from` header)
    From,

    /// Direct recipient (`to` header)
    To,

    /// Carbon-copy recipient (`cc` header)
    Cc,

    /// Attendee from an explicit participant list (non-email media)
    Participant,
}

impl Role {
    /// Get the role name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::From => "from",
            Role::To => "to",
            Role::Cc => "cc",
            Role::Participant => "participant",
        }
    }
}

/// A conversation party
///
/// Participants are unique within a document: by normalized (lowercased)
/// address when one was parsed, otherwise by exact raw token. A party seen
/// under several headers keeps one entry tagged with every role seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier within the document (`p1`, `p2`, ...)
    pub id: String,

    /// Display name, or the raw token when the address was unparseable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parsed email address; `None` for a malformed token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Order-preserving union of roles seen for this party
    pub roles: Vec<Role>,
}

impl Participant {
    /// Create a participant with a single role
    pub fn new(id: String, name: Option<String>, address: Option<String>, role: Role) -> Self {
        Self {
            id,
            name,
            address,
            roles: vec![role],
        }
    }

    /// Tag this participant with an additional role, preserving order
    pub fn add_role(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    /// Key under which this participant is de-duplicated
    ///
    /// Lowercased address when present, otherwise the raw token held in
    /// `name`. Address-less participants with no name never merge.
    pub fn merge_key(&self) -> Option<String> {
        self.address
            .as_ref()
            .map(|a| a.to_lowercase())
            .or_else(|| self.name.clone())
    }
}
