//! The topic collection and its mutation operations
//!
//! `TopicSet` is a plain value: every operation takes the collection by
//! value and returns the next one, and the caller persists the result.
//! Topics and cards an operation does not address are carried over
//! untouched, so they compare equal before and after. Operations that
//! reference a missing topic or card id resolve as silent no-ops; this
//! keeps the collection usable while an AI generation request for a
//! since-deleted topic is still in flight.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{Card, CardUpdate, Topic, TopicUpdate};

/// Ordered collection of all topics. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSet {
    topics: Vec<Topic>,
}

impl TopicSet {
    pub fn new() -> Self {
        Self { topics: Vec::new() }
    }

    pub fn from_topics(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Topics in insertion order
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, topic_id: Uuid) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    // ==================== Topic Operations ====================

    /// Append a new topic with a fresh id and no cards
    pub fn add_topic(mut self, name: String, description: String) -> (Self, Uuid) {
        let topic = Topic::new(name, description);
        let id = topic.id;
        self.topics.push(topic);
        (self, id)
    }

    /// Merge set fields of `update` into the matching topic. No-op if
    /// `topic_id` does not match any topic.
    pub fn update_topic(mut self, topic_id: Uuid, update: TopicUpdate) -> Self {
        if let Some(topic) = self.topics.iter_mut().find(|t| t.id == topic_id) {
            if let Some(name) = update.name {
                topic.name = name;
            }
            if let Some(description) = update.description {
                topic.description = description;
            }
            if let Some(cards) = update.cards {
                topic.cards = cards;
            }
        }
        self
    }

    /// Remove the matching topic and all its cards. No-op if no match.
    pub fn delete_topic(mut self, topic_id: Uuid) -> Self {
        self.topics.retain(|t| t.id != topic_id);
        self
    }

    // ==================== Card Operations ====================

    /// Append a new card to the end of the matching topic's sequence.
    /// Returns the new card's id, or `None` when the topic was missing.
    pub fn add_card(
        mut self,
        topic_id: Uuid,
        question: String,
        hint: String,
        answer: String,
    ) -> (Self, Option<Uuid>) {
        let mut card_id = None;
        if let Some(topic) = self.topics.iter_mut().find(|t| t.id == topic_id) {
            let card = Card::new(question, hint, answer);
            card_id = Some(card.id);
            topic.cards.push(card);
        }
        (self, card_id)
    }

    /// Merge set fields of `update` into the matching card, keeping its
    /// position. No-op if either id does not match.
    pub fn update_card(mut self, topic_id: Uuid, card_id: Uuid, update: CardUpdate) -> Self {
        if let Some(topic) = self.topics.iter_mut().find(|t| t.id == topic_id) {
            if let Some(card) = topic.cards.iter_mut().find(|c| c.id == card_id) {
                if let Some(question) = update.question {
                    card.question = question;
                }
                if let Some(hint) = update.hint {
                    card.hint = hint;
                }
                if let Some(answer) = update.answer {
                    card.answer = answer;
                }
            }
        }
        self
    }

    /// Remove exactly the matching card, preserving the relative order
    /// of the rest. No-op if either id does not match.
    pub fn delete_card(mut self, topic_id: Uuid, card_id: Uuid) -> Self {
        if let Some(topic) = self.topics.iter_mut().find(|t| t.id == topic_id) {
            topic.cards.retain(|c| c.id != card_id);
        }
        self
    }

    /// Append `cards` in the given order, ids taken as provided by the
    /// caller. No-op if `topic_id` does not match; generated cards for a
    /// topic deleted while the request was in flight are dropped here.
    pub fn add_cards(mut self, topic_id: Uuid, cards: Vec<Card>) -> Self {
        match self.topics.iter_mut().find(|t| t.id == topic_id) {
            Some(topic) => topic.cards.extend(cards),
            None => {
                log::warn!(
                    "Dropping {} cards for missing topic {}",
                    cards.len(),
                    topic_id
                );
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> TopicSet {
        let (set, node_id) = TopicSet::new().add_topic(
            "Node.js".to_string(),
            "Event loop and friends".to_string(),
        );
        let (set, _) = set.add_card(
            node_id,
            "What is the event loop?".to_string(),
            "Phases".to_string(),
            "The scheduler for async I/O callbacks.".to_string(),
        );
        let (set, _) = set.add_card(
            node_id,
            "What are streams?".to_string(),
            String::new(),
            "Chunked data abstractions.".to_string(),
        );
        let (set, _) = set.add_topic("SQL".to_string(), "Joins and indexes".to_string());
        set
    }

    fn topic_id(set: &TopicSet, name: &str) -> Uuid {
        set.topics().iter().find(|t| t.name == name).unwrap().id
    }

    #[test]
    fn test_add_topic_appends_with_fresh_id() {
        let set = sample_set();
        let before = set.len();
        let (set, id) = set.add_topic("Docker".to_string(), String::new());

        assert_eq!(set.len(), before + 1);
        let topic = set.topics().last().unwrap();
        assert_eq!(topic.id, id);
        assert_eq!(topic.name, "Docker");
        assert!(topic.cards.is_empty());

        let (set, other) = set.add_topic("Docker".to_string(), String::new());
        assert_ne!(other, id);
        assert_eq!(set.len(), before + 2);
    }

    #[test]
    fn test_update_topic_merges_set_fields_only() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");
        let cards_before = set.topic(id).unwrap().cards.clone();

        let set = set.update_topic(
            id,
            TopicUpdate {
                name: Some("Node.js Fundamentals".to_string()),
                ..Default::default()
            },
        );

        let topic = set.topic(id).unwrap();
        assert_eq!(topic.name, "Node.js Fundamentals");
        assert_eq!(topic.description, "Event loop and friends");
        assert_eq!(topic.cards, cards_before);
    }

    #[test]
    fn test_update_topic_can_replace_cards() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");
        let replacement = vec![Card::new(
            "Only card".to_string(),
            String::new(),
            "Only answer".to_string(),
        )];

        let set = set.update_topic(
            id,
            TopicUpdate {
                cards: Some(replacement.clone()),
                ..Default::default()
            },
        );
        assert_eq!(set.topic(id).unwrap().cards, replacement);
    }

    #[test]
    fn test_delete_topic_removes_only_that_topic() {
        let set = sample_set();
        let node_id = topic_id(&set, "Node.js");
        let sql_before = set.topic(topic_id(&set, "SQL")).unwrap().clone();

        let set = set.delete_topic(node_id);

        assert_eq!(set.len(), 1);
        assert!(set.topic(node_id).is_none());
        assert_eq!(set.topics()[0], sql_before);
    }

    #[test]
    fn test_add_then_delete_topic_restores_original() {
        let before = sample_set();
        let (set, id) = before
            .clone()
            .add_topic("Scratch".to_string(), String::new());
        let after = set.delete_topic(id);
        assert_eq!(after, before);
    }

    #[test]
    fn test_add_card_appends_to_end() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");

        let (set, card_id) = set.add_card(
            id,
            "What is cluster mode?".to_string(),
            "One process per core".to_string(),
            "Forked workers sharing server ports.".to_string(),
        );

        let topic = set.topic(id).unwrap();
        assert_eq!(topic.cards.len(), 3);
        assert_eq!(topic.cards.last().unwrap().id, card_id.unwrap());
        assert_eq!(topic.cards[0].question, "What is the event loop?");
    }

    #[test]
    fn test_add_card_missing_topic_is_noop() {
        let before = sample_set();
        let (after, card_id) = before.clone().add_card(
            Uuid::new_v4(),
            "q".to_string(),
            String::new(),
            "a".to_string(),
        );
        assert!(card_id.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn test_update_card_preserves_position_and_neighbors() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");
        let second_before = set.topic(id).unwrap().cards[1].clone();
        let card_id = set.topic(id).unwrap().cards[0].id;

        let set = set.update_card(
            id,
            card_id,
            CardUpdate {
                hint: Some("Timers, poll, check".to_string()),
                ..Default::default()
            },
        );

        let topic = set.topic(id).unwrap();
        assert_eq!(topic.cards[0].id, card_id);
        assert_eq!(topic.cards[0].question, "What is the event loop?");
        assert_eq!(topic.cards[0].hint, "Timers, poll, check");
        assert_eq!(topic.cards[1], second_before);
    }

    #[test]
    fn test_delete_card_keeps_relative_order() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");
        let (set, extra) = set.add_card(
            id,
            "Third question".to_string(),
            String::new(),
            "Third answer".to_string(),
        );
        let middle = set.topic(id).unwrap().cards[1].id;

        let set = set.delete_card(id, middle);

        let topic = set.topic(id).unwrap();
        assert_eq!(topic.cards.len(), 2);
        assert_eq!(topic.cards[0].question, "What is the event loop?");
        assert_eq!(topic.cards[1].id, extra.unwrap());
    }

    #[test]
    fn test_missing_id_operations_are_noops() {
        let before = sample_set();
        let node_id = topic_id(&before, "Node.js");
        let ghost = Uuid::new_v4();

        let after = before.clone().update_topic(
            ghost,
            TopicUpdate {
                name: Some("renamed".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(after, before);

        let after = before.clone().delete_topic(ghost);
        assert_eq!(after, before);

        let after = before.clone().update_card(
            node_id,
            ghost,
            CardUpdate {
                answer: Some("changed".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(after, before);

        let after = before.clone().delete_card(node_id, ghost);
        assert_eq!(after, before);

        let after = before.clone().delete_card(ghost, ghost);
        assert_eq!(after, before);
    }

    #[test]
    fn test_add_cards_appends_in_given_order() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");
        let generated = vec![
            Card::new("G1".to_string(), "H1".to_string(), "A1".to_string()),
            Card::new("G2".to_string(), "H2".to_string(), "A2".to_string()),
        ];
        let generated_ids: Vec<Uuid> = generated.iter().map(|c| c.id).collect();

        let set = set.add_cards(id, generated);

        let topic = set.topic(id).unwrap();
        assert_eq!(topic.cards.len(), 4);
        assert_eq!(topic.cards[2].id, generated_ids[0]);
        assert_eq!(topic.cards[3].id, generated_ids[1]);
    }

    #[test]
    fn test_add_cards_for_deleted_topic_is_noop() {
        let set = sample_set();
        let id = topic_id(&set, "Node.js");
        let before = set.delete_topic(id);

        let after = before.clone().add_cards(
            id,
            vec![Card::new("q".to_string(), String::new(), "a".to_string())],
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_serialization_round_trip() {
        let set = sample_set();
        let json = serde_json::to_string_pretty(&set).unwrap();
        let restored: TopicSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let set = sample_set();
        let value = serde_json::to_value(&set).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["name"], "Node.js");
        assert!(value[0]["cards"].is_array());
    }

    #[test]
    fn test_deserializes_cards_with_missing_hint() {
        let json = r#"[
            {
                "id": "7f2c1c3a-90d6-4a0e-9a6b-51a4a1a1b2c3",
                "name": "Partial",
                "description": "",
                "cards": [
                    {
                        "id": "0d3adf0e-66a3-4a26-8f0f-0a4a8a7b6c5d",
                        "question": "Q",
                        "answer": "A"
                    }
                ]
            }
        ]"#;
        let set: TopicSet = serde_json::from_str(json).unwrap();
        let card = &set.topics()[0].cards[0];
        assert_eq!(card.hint, "");
        assert!(!card.has_hint());
    }
}
