//! Flashcard study tool: topics and cards in a single local slot, with
//! AI-assisted card generation on top.
//!
//! The core is the value-style topic collection (`TopicSet`), the
//! persistence slot (`TopicSlot`), and the extraction pipeline that
//! turns free-form completion output into card drafts. The `mneme`
//! binary is a thin CLI over this crate.

pub mod extract;
pub mod openai;
pub mod topics;

pub use extract::{extract_cards, CardDraft, Extraction, Stage};
pub use openai::{CompletionClient, Difficulty, GenerateError, ALLOWED_COUNTS};
pub use topics::{Card, CardUpdate, SlotError, Topic, TopicSet, TopicSlot, TopicUpdate};
