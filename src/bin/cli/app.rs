use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use mneme_lib::topics::{Card, Topic, TopicSet, TopicSlot};

/// Shared application state for CLI commands
pub struct App {
    pub slot: TopicSlot,
    pub topics: TopicSet,
}

impl App {
    /// Load the collection from the data directory, seeding the slot
    /// on first run
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => TopicSlot::default_data_dir().context("Failed to get data directory")?,
        };

        let slot = TopicSlot::new(data_dir);
        let topics = slot.load_or_seed().context("Failed to load topics")?;

        Ok(Self { slot, topics })
    }

    /// Persist the next collection state and keep it as current
    pub fn commit(&mut self, next: TopicSet) -> Result<()> {
        self.slot.save(&next).context("Failed to save topics")?;
        self.topics = next;
        Ok(())
    }

    /// Find a topic by id or name (case-insensitive prefix match)
    pub fn find_topic(&self, selector: &str) -> Result<Topic> {
        if let Ok(id) = selector.parse::<Uuid>() {
            if let Some(topic) = self.topics.topic(id) {
                return Ok(topic.clone());
            }
            bail!("No topic with id {}", id);
        }

        let name_lower = selector.to_lowercase();

        // Exact match first
        if let Some(topic) = self
            .topics
            .topics()
            .iter()
            .find(|t| t.name.to_lowercase() == name_lower)
        {
            return Ok(topic.clone());
        }

        // Prefix match
        let matches: Vec<&Topic> = self
            .topics
            .topics()
            .iter()
            .filter(|t| t.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No topic matching '{}'. Available topics:\n{}",
                selector,
                self.topics
                    .topics()
                    .iter()
                    .map(|t| format!("  - {}", t.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous topic name '{}'. Matches:\n{}",
                selector,
                matches
                    .iter()
                    .map(|t| format!("  - {}", t.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a card within a topic by id, id prefix, or 1-based position
    pub fn find_card(&self, topic: &Topic, selector: &str) -> Result<Card> {
        if let Ok(id) = selector.parse::<Uuid>() {
            return topic
                .card(id)
                .cloned()
                .with_context(|| format!("No card with id {} in topic '{}'", id, topic.name));
        }

        if let Ok(position) = selector.parse::<usize>() {
            if position >= 1 && position <= topic.cards.len() {
                return Ok(topic.cards[position - 1].clone());
            }
            bail!(
                "Topic '{}' has {} cards, no position {}",
                topic.name,
                topic.cards.len(),
                position
            );
        }

        let selector_lower = selector.to_lowercase();
        let matches: Vec<&Card> = topic
            .cards
            .iter()
            .filter(|c| c.id.to_string().starts_with(&selector_lower))
            .collect();

        match matches.len() {
            0 => bail!("No card matching '{}' in topic '{}'", selector, topic.name),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous card id prefix '{}' in topic '{}'",
                selector,
                topic.name
            ),
        }
    }
}
