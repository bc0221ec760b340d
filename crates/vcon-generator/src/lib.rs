//! vCon Generator
//!
//! Converts loosely structured conversation records (emails, meeting
//! transcripts, chats, forwarded messages) into standardized vCon documents
//! in two independent phases.
//!
//! # Overview
//!
//! Phase 1 normalizes a raw record into a base document (version `0.0.1`):
//! field validation, address parsing, participant de-duplication, and event
//! construction. Phase 2 attaches derived analysis produced by an external
//! process (a summary, action items, topics, decisions), advancing the
//! document to version `0.0.2` without disturbing its identity. This crate
//! never invokes an analysis producer; it only accepts its output as data.
//!
//! # Architecture
//!
//! ```text
//! record JSON → ConversationInput → generate_base → VconDocument (0.0.1)
//! analysis JSON → AnalysisInput   → add_analysis  → VconDocument (0.0.2)
//! ```
//!
//! # Example Usage
//!
//! ```
//! use vcon_generator::{AnalysisInput, ConversationInput, VconGenerator};
//!
//! # fn example() -> Result<(), vcon_generator::ValidationError> {
//! let input = ConversationInput {
//!     subject: Some("Quarterly review".into()),
//!     from: Some("Alice <alice@example.com>".into()),
//!     to: Some("Bob <bob@example.com>".into()),
//!     content: Some("Let's review the numbers.".into()),
//!     ..ConversationInput::default()
//! };
//!
//! let mut generator = VconGenerator::new();
//! generator.generate_base(&input)?;
//!
//! let payload = AnalysisInput {
//!     summary: Some("The team reviewed Q3 numbers.".into()),
//!     source: Some("gpt-4".into()),
//!     ..AnalysisInput::default()
//! };
//! let document = generator.add_analysis(&payload)?;
//!
//! assert_eq!(document.version.as_str(), "0.0.2");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod address;
mod error;
mod generator;
mod input;

pub use address::{parse_address_token, split_address_list, ParsedAddress};
pub use error::{Result, ValidationError};
pub use generator::{add_analysis, generate_base, VconGenerator};
pub use input::{ActionItemInput, AnalysisInput, ConversationInput, References};
