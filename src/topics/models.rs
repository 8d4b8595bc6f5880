//! Data models for topics and their flashcards

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A study topic holding an ordered set of flashcards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cards in study order. Insertion order is meaningful and preserved
    /// by every operation except explicit deletion.
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Topic {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            cards: Vec::new(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn card(&self, card_id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }
}

/// A single question/hint/answer flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    /// Empty means no hint is available for this card.
    #[serde(default)]
    pub hint: String,
    pub answer: String,
}

impl Card {
    pub fn new(question: String, hint: String, answer: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            hint,
            answer,
        }
    }

    pub fn has_hint(&self) -> bool {
        !self.hint.trim().is_empty()
    }
}

/// Partial update for a topic; unset fields are left unchanged.
/// Setting `cards` replaces the whole card sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cards: Option<Vec<Card>>,
}

/// Partial update for a card; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub question: Option<String>,
    pub hint: Option<String>,
    pub answer: Option<String>,
}
