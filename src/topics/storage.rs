//! Persistence for the topic collection
//!
//! The whole collection lives in a single topics.json slot under the app
//! data directory. Callers re-persist the full collection after every
//! mutation. An absent or blank slot bootstraps from the built-in
//! starter topics, which are written back immediately.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::seed::starter_topics;
use super::store::TopicSet;

const TOPICS_FILE: &str = "topics.json";

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, SlotError>;

/// Storage slot for the full topic collection
pub struct TopicSlot {
    /// Base path for app data (e.g., ~/.local/share/mneme)
    base_path: PathBuf,
}

impl TopicSlot {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mneme"))
            .ok_or(SlotError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn topics_path(&self) -> PathBuf {
        self.base_path.join(TOPICS_FILE)
    }

    /// Load the stored collection. An absent or blank slot is `None`.
    pub fn load(&self) -> Result<Option<TopicSet>> {
        let path = self.topics_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let set: TopicSet = serde_json::from_str(&content)?;
        Ok(Some(set))
    }

    /// Overwrite the slot with the full collection
    pub fn save(&self, set: &TopicSet) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        let content = serde_json::to_string_pretty(set)?;
        fs::write(self.topics_path(), content)?;
        Ok(())
    }

    /// Load the collection, seeding the slot on first run or when the
    /// stored value has no topics
    pub fn load_or_seed(&self) -> Result<TopicSet> {
        if let Some(set) = self.load()? {
            if !set.is_empty() {
                return Ok(set);
            }
        }

        let seeded = starter_topics();
        self.save(&seeded)?;
        log::info!(
            "Seeded {} starter topics into {:?}",
            seeded.len(),
            self.topics_path()
        );
        Ok(seeded)
    }

    /// Discard the stored collection and reload the starter topics
    pub fn reset_to_seed(&self) -> Result<TopicSet> {
        let path = self.topics_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        log::info!("Reset topic slot to starter topics");
        self.load_or_seed()
    }

    /// Remove all locally stored application state
    pub fn wipe(&self) -> Result<()> {
        if self.base_path.exists() {
            fs::remove_dir_all(&self.base_path)?;
            log::info!("Wiped app data at {:?}", self.base_path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn create_test_slot() -> (TopicSlot, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let slot = TopicSlot::new(temp_dir.path().to_path_buf());
        (slot, temp_dir)
    }

    #[test]
    fn test_load_absent_slot_returns_none() {
        let (slot, _temp) = create_test_slot();
        assert!(slot.load().unwrap().is_none());
    }

    #[test]
    fn test_load_blank_slot_returns_none() {
        let (slot, _temp) = create_test_slot();
        fs::create_dir_all(slot.base_path()).unwrap();
        fs::write(slot.base_path().join(TOPICS_FILE), "  \n").unwrap();
        assert!(slot.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (slot, _temp) = create_test_slot();
        let (set, id) = TopicSet::new().add_topic("Rust".to_string(), "Ownership".to_string());
        let (set, _) = set.add_card(
            id,
            "What is borrowing?".to_string(),
            String::new(),
            "Temporary shared or exclusive access.".to_string(),
        );

        slot.save(&set).unwrap();
        let loaded = slot.load().unwrap().unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_load_or_seed_bootstraps_and_persists() {
        let (slot, _temp) = create_test_slot();

        let seeded = slot.load_or_seed().unwrap();
        assert_eq!(seeded.len(), 10);

        // The seed is written back immediately, with the same ids
        let stored = slot.load().unwrap().unwrap();
        assert_eq!(stored, seeded);
    }

    #[test]
    fn test_load_or_seed_reseeds_empty_collection() {
        let (slot, _temp) = create_test_slot();
        slot.save(&TopicSet::new()).unwrap();

        let seeded = slot.load_or_seed().unwrap();
        assert_eq!(seeded.len(), 10);
    }

    #[test]
    fn test_load_or_seed_keeps_existing_topics() {
        let (slot, _temp) = create_test_slot();
        let (set, _) = TopicSet::new().add_topic("Mine".to_string(), String::new());
        slot.save(&set).unwrap();

        let loaded = slot.load_or_seed().unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_reset_to_seed_discards_user_topics() {
        let (slot, _temp) = create_test_slot();
        let (set, _) = slot
            .load_or_seed()
            .unwrap()
            .add_topic("Mine".to_string(), String::new());
        slot.save(&set).unwrap();

        let reset = slot.reset_to_seed().unwrap();
        assert_eq!(reset.len(), 10);
        assert!(reset.topics().iter().all(|t| t.name != "Mine"));

        // Reseeded entities carry fresh ids
        assert_ne!(reset.topics()[0].id, set.topics()[0].id);
    }

    #[test]
    fn test_wipe_removes_data_dir() {
        let (slot, _temp) = create_test_slot();
        slot.load_or_seed().unwrap();
        assert!(slot.base_path().exists());

        slot.wipe().unwrap();
        assert!(!slot.base_path().exists());

        // Wiping an already-clean state is fine
        slot.wipe().unwrap();
    }
}
