//! Document module - the vCon conversation document itself

use crate::analysis::AnalysisRecord;
use crate::event::MessageEvent;
use crate::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document version, advanced by the enrichment phase
///
/// `0.0.1` is a freshly generated base document; `0.0.2` means analysis has
/// been attached at least once. The version is monotonic and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VconVersion {
    /// Base document, phase 1 only
    #[serde(rename = "0.0.1")]
    V0_0_1,

    /// Enriched document, phase 2 has run
    #[serde(rename = "0.0.2")]
    V0_0_2,
}

impl VconVersion {
    /// Get the version string as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            VconVersion::V0_0_1 => "0.0.1",
            VconVersion::V0_0_2 => "0.0.2",
        }
    }

    /// Advance to the enriched version; idempotent once there
    pub fn advance(&mut self) {
        *self = VconVersion::V0_0_2;
    }
}

impl std::fmt::Display for VconVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A portable conversation document
///
/// Created only by the phase-1 transformation; mutated in place by phase-2
/// enrichment via [`VconDocument::apply_analysis`]. The serialized layout is
/// the wire contract other vCon-aware tools depend on: `0.0.2` output is a
/// strict superset of `0.0.1` output, never removing or renaming fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VconDocument {
    /// Unique document identifier (UUIDv7)
    pub uuid: Uuid,

    /// Document version
    pub version: VconVersion,

    /// Conversation subject as given in phase 1
    pub subject: String,

    /// When the base document was generated
    pub created_at: DateTime<Utc>,

    /// Last mutation time; refreshed by each enrichment
    pub updated_at: DateTime<Utc>,

    /// Conversation parties in first-seen order
    pub participants: Vec<Participant>,

    /// Message events in processing order
    pub events: Vec<MessageEvent>,

    /// Analysis records in attachment order; empty until phase 2 runs
    pub analysis: Vec<AnalysisRecord>,

    /// Attribution identifiers in observation order: the creation source
    /// first, then one entry per attributed analysis record
    pub sources: Vec<String>,
}

impl VconDocument {
    /// Create an empty base document for the given subject and creation
    /// source, versioned `0.0.1`
    pub fn new(subject: String, creation_source: &str) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::now_v7(),
            version: VconVersion::V0_0_1,
            subject,
            created_at: now,
            updated_at: now,
            participants: Vec::new(),
            events: Vec::new(),
            analysis: Vec::new(),
            sources: vec![creation_source.to_string()],
        }
    }

    /// Attach an analysis record, advancing the document version
    ///
    /// This is the unguarded mutation primitive: payload validation is the
    /// generator's responsibility and must happen before this is called.
    /// Appends the record, records its `source` for attribution when given,
    /// and refreshes `updated_at`.
    pub fn apply_analysis(&mut self, record: AnalysisRecord) {
        if let Some(source) = &record.source {
            self.sources.push(source.clone());
        }
        self.analysis.push(record);
        self.version.advance();
        self.updated_at = Utc::now();
    }

    /// Serialize the document as pretty-printed JSON
    ///
    /// Pure and deterministic given the current document state; never
    /// mutates.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize the document as compact single-line JSON
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Standardized filename for persisting this document
    ///
    /// `YYYY-MM-DD-<subject-slug>.json`, dated from the first event
    /// timestamp when one is set, otherwise from `created_at`.
    pub fn suggested_filename(&self) -> String {
        let date = self
            .events
            .iter()
            .find_map(|e| e.timestamp)
            .unwrap_or(self.created_at);
        format!("{}-{}.json", date.format("%Y-%m-%d"), slugify(&self.subject))
    }
}

/// Reduce a subject line to a filename-safe slug
///
/// Lowercased alphanumerics, hyphen-joined, capped at 50 bytes. An empty
/// result falls back to `conversation`.
fn slugify(subject: &str) -> String {
    let cleaned: String = subject
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect();
    let mut slug = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
    slug.truncate(50);
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "conversation".to_string()
    } else {
        slug
    }
}
