//! Core two-phase transformation
//!
//! Phase 1 ([`generate_base`]) turns a validated [`ConversationInput`] into
//! a fresh [`VconDocument`]. Phase 2 ([`add_analysis`]) attaches a validated
//! analysis payload to an existing document, advancing its version. All
//! validation happens eagerly at the start of each phase; a failing call
//! leaves the document untouched.

use crate::address::{parse_address_token, split_address_list};
use crate::error::{Result, ValidationError};
use crate::input::{ActionItemInput, AnalysisInput, ConversationInput};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::{debug, info, warn};
use vcon_domain::{
    ActionItem, AnalysisRecord, EventKind, EventMetadata, MessageEvent, Participant, Role,
    SourceType, VconDocument,
};

/// Phase 1: transform one conversation record into a base document
///
/// Validates required fields (collecting every violation into one error),
/// resolves the document source, parses participants out of the address
/// headers with best-effort degradation, and constructs the message events
/// in processing order. The result is versioned `0.0.1`.
pub fn generate_base(input: &ConversationInput) -> Result<VconDocument> {
    let missing = missing_required_fields(input);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let source = resolve_source(input.source.as_deref())?;
    let timestamp = input
        .entry_date
        .as_deref()
        .map(parse_entry_date)
        .transpose()?;

    // Validated non-blank above
    let subject = input.subject.as_deref().unwrap_or_default().trim();

    let mut document = VconDocument::new(subject.to_string(), source.as_str());
    collect_participants(&mut document, input);
    build_events(&mut document, input, source, timestamp);

    info!(
        "Generated base document from '{}': {} participants, {} events",
        source,
        document.participants.len(),
        document.events.len()
    );

    Ok(document)
}

/// Phase 2: attach an analysis payload to an existing document
///
/// The payload must be substantive and every action item entry complete;
/// on success the record is appended, its `source` recorded for
/// attribution, and the document version advanced to `0.0.2` (idempotent
/// on repeat calls).
pub fn add_analysis(document: &mut VconDocument, payload: &AnalysisInput) -> Result<()> {
    let record = validate_analysis(payload)?;
    document.apply_analysis(record);

    info!(
        "Attached analysis record {} (version {})",
        document.analysis.len(),
        document.version
    );

    Ok(())
}

/// Two-phase generator facade holding the document between calls
///
/// The core API threads the document value explicitly; this wrapper exposes
/// the sequential call surface convenient for flag-driven callers like the
/// CLI. Calling [`VconGenerator::add_analysis`] before a base document
/// exists is a [`ValidationError::NoBaseDocument`]; a repeated
/// [`VconGenerator::generate_base`] replaces the held document.
#[derive(Debug, Default)]
pub struct VconGenerator {
    document: Option<VconDocument>,
}

impl VconGenerator {
    /// Create a generator holding no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Run phase 1, replacing any previously held document
    pub fn generate_base(&mut self, input: &ConversationInput) -> Result<&VconDocument> {
        let document = generate_base(input)?;
        Ok(self.document.insert(document))
    }

    /// Run phase 2 against the held document
    pub fn add_analysis(&mut self, payload: &AnalysisInput) -> Result<&VconDocument> {
        let document = self
            .document
            .as_mut()
            .ok_or(ValidationError::NoBaseDocument)?;
        add_analysis(document, payload)?;
        Ok(document)
    }

    /// The held document, if phase 1 has run
    pub fn document(&self) -> Option<&VconDocument> {
        self.document.as_ref()
    }

    /// Consume the generator, yielding the held document
    pub fn into_document(self) -> Option<VconDocument> {
        self.document
    }
}

// ── Phase 1 validation ─────────────────────────────────────────────

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Names of every required field that is absent or blank
///
/// `content` is required for ordinary records; forwarded records require
/// `user_note` and `original_content` instead.
fn missing_required_fields(input: &ConversationInput) -> Vec<String> {
    let mut missing = Vec::new();
    if is_blank(input.subject.as_ref()) {
        missing.push("subject".to_string());
    }
    if is_blank(input.from.as_ref()) {
        missing.push("from".to_string());
    }
    if input.is_forwarded {
        if is_blank(input.user_note.as_ref()) {
            missing.push("user_note".to_string());
        }
        if is_blank(input.original_content.as_ref()) {
            missing.push("original_content".to_string());
        }
    } else if is_blank(input.content.as_ref()) {
        missing.push("content".to_string());
    }
    missing
}

fn resolve_source(source: Option<&str>) -> Result<SourceType> {
    match source {
        None => Ok(SourceType::default()),
        Some(raw) => {
            SourceType::parse(raw).ok_or_else(|| ValidationError::UnknownSource(raw.to_string()))
        }
    }
}

/// Parse an `entry_date` value
///
/// Accepts RFC 3339, a naive ISO datetime, or a bare date; naive values are
/// taken as UTC. Absence is handled by the caller (the timestamp stays
/// unset; it is never defaulted to the processing time).
fn parse_entry_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    Err(ValidationError::InvalidTimestamp {
        value: value.to_string(),
        reason: "not an ISO-8601 datetime".to_string(),
    })
}

// ── Participants ───────────────────────────────────────────────────

/// Parse the address headers and the auxiliary attendee list into
/// de-duplicated participants
fn collect_participants(document: &mut VconDocument, input: &ConversationInput) {
    let headers = [
        (input.from.as_deref(), Role::From),
        (input.to.as_deref(), Role::To),
        (input.cc.as_deref(), Role::Cc),
    ];

    for (field, role) in headers {
        let Some(field) = field else { continue };
        for token in split_address_list(field) {
            merge_participant(&mut document.participants, &token, role);
        }
    }

    for token in &input.participants {
        let token = token.trim();
        if !token.is_empty() {
            merge_participant(&mut document.participants, token, Role::Participant);
        }
    }
}

/// Insert a token as a participant, or fold it into an existing one
///
/// Matching is by normalized (lowercased) address when the token parsed,
/// otherwise by exact raw token. A merge unions the role and fills in a
/// display name the earlier occurrence lacked.
fn merge_participant(participants: &mut Vec<Participant>, token: &str, role: Role) {
    let parsed = parse_address_token(token);
    if !parsed.is_parsed() {
        warn!("Unparseable address token '{}', keeping as name-only participant", token);
    }

    let existing = participants.iter_mut().find(|p| match &parsed.address {
        Some(address) => p
            .address
            .as_ref()
            .is_some_and(|a| a.eq_ignore_ascii_case(address)),
        None => p.address.is_none() && p.name == parsed.name,
    });

    match existing {
        Some(participant) => {
            participant.add_role(role);
            if participant.name.is_none() {
                participant.name = parsed.name;
            }
        }
        None => {
            let id = format!("p{}", participants.len() + 1);
            participants.push(Participant::new(id, parsed.name, parsed.address, role));
        }
    }
}

// ── Events ─────────────────────────────────────────────────────────

/// Construct the message events in processing order
///
/// Ordinary records yield one event carrying `content`. Forwarded records
/// yield the embedded original first, then the forwarder's note, sharing
/// the same timestamp context. Header metadata is attached to every event.
fn build_events(
    document: &mut VconDocument,
    input: &ConversationInput,
    source: SourceType,
    timestamp: Option<DateTime<Utc>>,
) {
    let metadata = EventMetadata {
        message_id: input.message_id.clone(),
        reply_to: input.reply_to.clone(),
        in_reply_to: input.in_reply_to.clone(),
        references: input
            .references
            .as_ref()
            .map(|r| r.to_list())
            .unwrap_or_default(),
        duration_minutes: input.duration_minutes,
    };

    let mut push = |events: &mut Vec<MessageEvent>, kind: EventKind, subject, content: &str| {
        let id = format!("m{}", events.len() + 1);
        debug!("Adding {} event {}", kind.as_str(), id);
        events.push(MessageEvent {
            id,
            kind,
            timestamp,
            subject,
            content: content.to_string(),
            metadata: metadata.clone(),
        });
    };

    if input.is_forwarded {
        // Original content first, forwarder's note second
        let original = input.original_content.as_deref().unwrap_or_default();
        let note = input.user_note.as_deref().unwrap_or_default();
        push(
            &mut document.events,
            source.event_kind(),
            Some(strip_forward_prefix(&document.subject)),
            original,
        );
        push(
            &mut document.events,
            EventKind::ForwardedNote,
            Some(document.subject.clone()),
            note,
        );
    } else {
        let content = input.content.as_deref().unwrap_or_default();
        push(
            &mut document.events,
            source.event_kind(),
            Some(document.subject.clone()),
            content,
        );
    }
}

/// Drop leading `Fwd:` / `FW:` / `Fw:` prefixes from a subject line
fn strip_forward_prefix(subject: &str) -> String {
    let mut rest = subject.trim();
    loop {
        let lower = rest.to_lowercase();
        rest = if lower.starts_with("fwd:") {
            rest[4..].trim_start()
        } else if lower.starts_with("fw:") {
            rest[3..].trim_start()
        } else {
            break;
        };
    }
    rest.to_string()
}

// ── Phase 2 validation ─────────────────────────────────────────────

/// Check an analysis payload and build the record it describes
///
/// Runs fully before any mutation: a rejected payload leaves the document
/// exactly as it was.
fn validate_analysis(payload: &AnalysisInput) -> Result<AnalysisRecord> {
    if !is_substantive(payload) {
        return Err(ValidationError::EmptyAnalysis);
    }

    let mut action_items = Vec::with_capacity(payload.action_items.len());
    for (index, item) in payload.action_items.iter().enumerate() {
        action_items.push(validate_action_item(index, item)?);
    }

    Ok(AnalysisRecord {
        summary: non_blank(payload.summary.as_deref()),
        action_items,
        key_topics: dedup_preserving_order(&payload.key_topics),
        key_decisions: payload
            .key_decisions
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        category: non_blank(payload.category.as_deref()),
        source: non_blank(payload.source.as_deref()),
    })
}

/// Whether the payload carries anything worth recording
///
/// `source` alone does not qualify: attribution without content is an
/// empty record.
fn is_substantive(payload: &AnalysisInput) -> bool {
    non_blank(payload.summary.as_deref()).is_some()
        || non_blank(payload.category.as_deref()).is_some()
        || !payload.action_items.is_empty()
        || payload.key_topics.iter().any(|t| !t.trim().is_empty())
        || payload.key_decisions.iter().any(|d| !d.trim().is_empty())
}

fn validate_action_item(index: usize, item: &ActionItemInput) -> Result<ActionItem> {
    let mut missing = Vec::new();
    if item.assignee.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("assignee".to_string());
    }
    if item
        .description
        .as_deref()
        .map_or(true, |s| s.trim().is_empty())
    {
        missing.push("description".to_string());
    }
    if !missing.is_empty() {
        return Err(ValidationError::InvalidActionItem { index, missing });
    }

    Ok(ActionItem {
        assignee: item.assignee.as_deref().unwrap_or_default().trim().to_string(),
        description: item
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        due_date: non_blank(item.due_date.as_deref()),
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Order-preserving de-duplication; first occurrence wins
fn dedup_preserving_order(values: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !seen.iter().any(|s: &String| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> ConversationInput {
        ConversationInput {
            subject: Some("Quarterly review".into()),
            from: Some("Alice <alice@example.com>".into()),
            to: Some("Bob <bob@example.com>, Carol <carol@example.com>".into()),
            content: Some("Let's review the numbers.".into()),
            ..ConversationInput::default()
        }
    }

    #[test]
    fn test_valid_input_yields_single_event_base_document() {
        let doc = generate_base(&base_input()).unwrap();
        assert_eq!(doc.version.as_str(), "0.0.1");
        assert_eq!(doc.events.len(), 1);
        assert_eq!(doc.events[0].kind, EventKind::Email);
        assert_eq!(doc.events[0].content, "Let's review the numbers.");
        assert_eq!(doc.sources, vec!["email_thread"]);
    }

    #[test]
    fn test_missing_fields_collected_into_one_error() {
        let input = ConversationInput {
            from: Some("alice@example.com".into()),
            ..ConversationInput::default()
        };
        let err = generate_base(&input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["subject".into(), "content".into()])
        );
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let input = ConversationInput {
            subject: Some("   ".into()),
            from: Some("".into()),
            content: Some("hi".into()),
            ..ConversationInput::default()
        };
        let err = generate_base(&input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["subject".into(), "from".into()])
        );
    }

    #[test]
    fn test_unknown_source_rejected() {
        let input = ConversationInput {
            source: Some("carrier_pigeon".into()),
            ..base_input()
        };
        let err = generate_base(&input).unwrap_err();
        assert_eq!(err, ValidationError::UnknownSource("carrier_pigeon".into()));
    }

    #[test]
    fn test_source_defaults_to_email_thread() {
        let doc = generate_base(&base_input()).unwrap();
        assert_eq!(doc.sources[0], "email_thread");
    }

    #[test]
    fn test_meeting_transcript_event_kind() {
        let input = ConversationInput {
            source: Some("meeting_transcript".into()),
            duration_minutes: Some(45.0),
            ..base_input()
        };
        let doc = generate_base(&input).unwrap();
        assert_eq!(doc.events[0].kind, EventKind::MeetingTranscript);
        assert_eq!(doc.events[0].metadata.duration_minutes, Some(45.0));
    }

    #[test]
    fn test_forwarded_requires_note_and_original() {
        let input = ConversationInput {
            subject: Some("Fwd: Budget".into()),
            from: Some("alice@example.com".into()),
            is_forwarded: true,
            ..ConversationInput::default()
        };
        let err = generate_base(&input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                "user_note".into(),
                "original_content".into()
            ])
        );
    }

    #[test]
    fn test_forwarded_content_not_required() {
        let input = ConversationInput {
            subject: Some("Fwd: Budget".into()),
            from: Some("alice@example.com".into()),
            is_forwarded: true,
            user_note: Some("FYI, see below".into()),
            original_content: Some("Original budget discussion".into()),
            source: Some("forwarded_email".into()),
            ..ConversationInput::default()
        };
        let doc = generate_base(&input).unwrap();
        assert_eq!(doc.events.len(), 2);
        // Original first, note second
        assert_eq!(doc.events[0].kind, EventKind::Email);
        assert_eq!(doc.events[0].content, "Original budget discussion");
        assert_eq!(doc.events[0].subject.as_deref(), Some("Budget"));
        assert_eq!(doc.events[1].kind, EventKind::ForwardedNote);
        assert_eq!(doc.events[1].content, "FYI, see below");
        assert_eq!(doc.events[1].subject.as_deref(), Some("Fwd: Budget"));
        // Document subject keeps the prefix
        assert_eq!(doc.subject, "Fwd: Budget");
    }

    #[test]
    fn test_participants_deduplicated_with_role_union() {
        let input = ConversationInput {
            subject: Some("s".into()),
            from: Some("Alice <alice@example.com>".into()),
            to: Some("bob@example.com, alice@example.com".into()),
            cc: Some("Bob <BOB@example.com>".into()),
            content: Some("c".into()),
            ..ConversationInput::default()
        };
        let doc = generate_base(&input).unwrap();
        assert_eq!(doc.participants.len(), 2);

        let alice = &doc.participants[0];
        assert_eq!(alice.id, "p1");
        assert_eq!(alice.address.as_deref(), Some("alice@example.com"));
        assert_eq!(alice.roles, vec![Role::From, Role::To]);

        let bob = &doc.participants[1];
        assert_eq!(bob.id, "p2");
        assert_eq!(bob.roles, vec![Role::To, Role::Cc]);
        // Name filled in from the cc occurrence
        assert_eq!(bob.name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_malformed_token_degrades_without_error() {
        let input = ConversationInput {
            to: Some("not-an-email, Carol <carol@example.com>".into()),
            ..base_input()
        };
        let doc = generate_base(&input).unwrap();
        let malformed = doc
            .participants
            .iter()
            .find(|p| p.address.is_none())
            .unwrap();
        assert_eq!(malformed.name.as_deref(), Some("not-an-email"));
        assert_eq!(malformed.roles, vec![Role::To]);
    }

    #[test]
    fn test_auxiliary_participants_list() {
        let input = ConversationInput {
            source: Some("meeting_transcript".into()),
            participants: vec!["Dana <dana@example.com>".into(), "Evan".into()],
            ..base_input()
        };
        let doc = generate_base(&input).unwrap();
        let dana = doc
            .participants
            .iter()
            .find(|p| p.address.as_deref() == Some("dana@example.com"))
            .unwrap();
        assert_eq!(dana.roles, vec![Role::Participant]);
        assert!(doc
            .participants
            .iter()
            .any(|p| p.name.as_deref() == Some("Evan") && p.address.is_none()));
    }

    #[test]
    fn test_entry_date_parsed_to_event_timestamp() {
        let input = ConversationInput {
            entry_date: Some("2024-03-01T09:30:00Z".into()),
            ..base_input()
        };
        let doc = generate_base(&input).unwrap();
        let ts = doc.events[0].timestamp.unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_entry_date_absent_leaves_timestamp_unset() {
        let doc = generate_base(&base_input()).unwrap();
        assert_eq!(doc.events[0].timestamp, None);
    }

    #[test]
    fn test_entry_date_unparseable_is_an_error() {
        let input = ConversationInput {
            entry_date: Some("next Tuesday".into()),
            ..base_input()
        };
        let err = generate_base(&input).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_entry_date_accepts_naive_and_date_only() {
        for value in ["2024-03-01T09:30:00", "2024-03-01 09:30:00.250", "2024-03-01"] {
            let input = ConversationInput {
                entry_date: Some(value.into()),
                ..base_input()
            };
            let doc = generate_base(&input).unwrap();
            assert!(doc.events[0].timestamp.is_some(), "failed for {}", value);
        }
    }

    #[test]
    fn test_references_attached_to_events() {
        let input = ConversationInput {
            message_id: Some("<m1@example.com>".into()),
            references: Some(crate::input::References::Text(
                "<a@example.com> <b@example.com>".into(),
            )),
            ..base_input()
        };
        let doc = generate_base(&input).unwrap();
        assert_eq!(
            doc.events[0].metadata.references,
            vec!["<a@example.com>", "<b@example.com>"]
        );
        assert_eq!(
            doc.events[0].metadata.message_id.as_deref(),
            Some("<m1@example.com>")
        );
    }

    #[test]
    fn test_strip_forward_prefix_variants() {
        assert_eq!(strip_forward_prefix("Fwd: Budget"), "Budget");
        assert_eq!(strip_forward_prefix("FW: fwd: Budget"), "Budget");
        assert_eq!(strip_forward_prefix("Budget"), "Budget");
        assert_eq!(strip_forward_prefix("Forward planning"), "Forward planning");
    }

    #[test]
    fn test_add_analysis_advances_version_and_sources() {
        let mut doc = generate_base(&base_input()).unwrap();
        let payload = AnalysisInput {
            summary: Some("Reviewed Q3 numbers".into()),
            source: Some("gpt-4".into()),
            ..AnalysisInput::default()
        };
        add_analysis(&mut doc, &payload).unwrap();
        assert_eq!(doc.version.as_str(), "0.0.2");
        assert_eq!(doc.analysis.len(), 1);
        assert_eq!(doc.sources, vec!["email_thread", "gpt-4"]);

        let second = AnalysisInput {
            key_decisions: vec!["hire two engineers".into()],
            source: Some("claude-3".into()),
            ..AnalysisInput::default()
        };
        add_analysis(&mut doc, &second).unwrap();
        assert_eq!(doc.version.as_str(), "0.0.2");
        assert_eq!(doc.analysis.len(), 2);
        assert_eq!(doc.sources, vec!["email_thread", "gpt-4", "claude-3"]);
    }

    #[test]
    fn test_empty_analysis_rejected_without_mutation() {
        let mut doc = generate_base(&base_input()).unwrap();
        let before = doc.clone();
        let payload = AnalysisInput {
            source: Some("gpt-4".into()),
            ..AnalysisInput::default()
        };
        let err = add_analysis(&mut doc, &payload).unwrap_err();
        assert_eq!(err, ValidationError::EmptyAnalysis);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_malformed_action_item_names_index() {
        let mut doc = generate_base(&base_input()).unwrap();
        let before = doc.clone();
        let payload = AnalysisInput {
            action_items: vec![
                ActionItemInput {
                    assignee: Some("alice".into()),
                    description: Some("send minutes".into()),
                    due_date: None,
                },
                ActionItemInput {
                    assignee: Some("bob".into()),
                    ..ActionItemInput::default()
                },
            ],
            ..AnalysisInput::default()
        };
        let err = add_analysis(&mut doc, &payload).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidActionItem {
                index: 1,
                missing: vec!["description".into()]
            }
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_key_topics_deduplicated_preserving_order() {
        let mut doc = generate_base(&base_input()).unwrap();
        let payload = AnalysisInput {
            key_topics: vec![
                "budget".into(),
                "hiring".into(),
                "budget".into(),
                " ".into(),
            ],
            ..AnalysisInput::default()
        };
        add_analysis(&mut doc, &payload).unwrap();
        assert_eq!(doc.analysis[0].key_topics, vec!["budget", "hiring"]);
    }

    #[test]
    fn test_facade_requires_base_document_first() {
        let mut generator = VconGenerator::new();
        let payload = AnalysisInput {
            summary: Some("s".into()),
            ..AnalysisInput::default()
        };
        let err = generator.add_analysis(&payload).unwrap_err();
        assert_eq!(err, ValidationError::NoBaseDocument);
    }

    #[test]
    fn test_facade_second_generate_replaces_document() {
        let mut generator = VconGenerator::new();
        generator.generate_base(&base_input()).unwrap();
        let first_uuid = generator.document().unwrap().uuid;

        let other = ConversationInput {
            subject: Some("Another thread".into()),
            ..base_input()
        };
        generator.generate_base(&other).unwrap();
        let doc = generator.document().unwrap();
        assert_ne!(doc.uuid, first_uuid);
        assert_eq!(doc.subject, "Another thread");
        assert_eq!(doc.analysis.len(), 0);
    }
}
