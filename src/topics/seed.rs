//! Built-in starter collection
//!
//! A fixed set of interview-prep topics embedded in the binary, used to
//! bootstrap a first run or an emptied slot. Entities get fresh ids on
//! every load, so the seed never collides with user-created ids.

use serde::Deserialize;

use super::models::{Card, Topic};
use super::store::TopicSet;

const SEED_JSON: &str = include_str!("seed.json");

#[derive(Deserialize)]
struct SeedTopic {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cards: Vec<SeedCard>,
}

#[derive(Deserialize)]
struct SeedCard {
    question: String,
    #[serde(default)]
    hint: String,
    answer: String,
}

/// Build the starter collection, assigning fresh ids to every entity
pub fn starter_topics() -> TopicSet {
    let seed: Vec<SeedTopic> =
        serde_json::from_str(SEED_JSON).expect("embedded seed dataset is valid JSON");

    let topics = seed
        .into_iter()
        .map(|t| {
            let mut topic = Topic::new(t.name, t.description);
            topic.cards = t
                .cards
                .into_iter()
                .map(|c| Card::new(c.question, c.hint, c.answer))
                .collect();
            topic
        })
        .collect();

    TopicSet::from_topics(topics)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_parses_into_ten_topics() {
        let set = starter_topics();
        assert_eq!(set.len(), 10);
        assert_eq!(set.topics()[0].name, "Node.js Fundamentals");
        assert_eq!(set.topics()[9].name, "Interview Preparation");
    }

    #[test]
    fn test_seed_cards_are_complete() {
        let set = starter_topics();
        for topic in set.topics() {
            assert!(!topic.name.trim().is_empty());
            assert!(!topic.cards.is_empty(), "topic '{}' has no cards", topic.name);
            for card in &topic.cards {
                assert!(!card.question.trim().is_empty());
                assert!(!card.answer.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_seed_ids_are_unique_and_fresh() {
        let first = starter_topics();
        let second = starter_topics();

        let mut ids = HashSet::new();
        for topic in first.topics() {
            assert!(ids.insert(topic.id));
            for card in &topic.cards {
                assert!(ids.insert(card.id));
            }
        }

        // A reload never reuses ids from an earlier load
        assert_ne!(first.topics()[0].id, second.topics()[0].id);
    }
}
