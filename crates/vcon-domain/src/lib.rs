//! vCon Domain Layer
//!
//! This crate contains the data model for vCon conversation documents: the
//! document itself, its participants, message events, and analysis records.
//! It defines the wire contract that other vCon-aware tools depend on and
//! keeps it stable across document versions (0.0.2 output is a strict
//! superset of 0.0.1 output).
//!
//! ## Key Concepts
//!
//! - **VconDocument**: the portable conversation document under construction
//! - **Participant**: a conversation party, unique by normalized address
//! - **MessageEvent**: a timed piece of conversation content
//! - **AnalysisRecord**: derived insight attached after the fact (phase 2)
//! - **SourceType**: the conversation medium (email thread, transcript, ...)
//!
//! ## Architecture
//!
//! This crate holds pure data and serialization only. Validation, address
//! parsing, and construction logic live in `vcon-generator`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod document;
pub mod event;
pub mod participant;
pub mod source;

// Re-exports for convenience
pub use analysis::{ActionItem, AnalysisRecord};
pub use document::{VconDocument, VconVersion};
pub use event::{EventKind, EventMetadata, MessageEvent};
pub use participant::{Participant, Role};
pub use source::SourceType;
