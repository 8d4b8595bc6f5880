//! Topic and flashcard management
//!
//! This module provides:
//! - The topic/card data model
//! - `TopicSet`, the value-style collection with all mutation operations
//! - The built-in starter collection
//! - `TopicSlot`, the single-file persistence slot

pub mod models;
pub mod seed;
pub mod storage;
pub mod store;

pub use models::*;
pub use seed::starter_topics;
pub use storage::{SlotError, TopicSlot};
pub use store::TopicSet;
