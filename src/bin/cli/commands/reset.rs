use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use mneme_lib::TopicSlot;

use crate::OutputFormat;

/// Replace the stored collection with the bundled starter topics
pub fn run_reset(
    data_dir: Option<PathBuf>,
    yes: bool,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    if !yes {
        bail!("This replaces all stored topics with the starter set. Pass --yes to confirm.");
    }

    let slot = open_slot(data_dir)?;
    let topics = slot.reset_to_seed().context("Failed to reset topics")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "topics": topics.len(),
                "path": slot.base_path().to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Restored {} starter topics.", topics.len());
        }
    }

    Ok(())
}

/// Delete the data directory entirely
pub fn run_wipe(
    data_dir: Option<PathBuf>,
    yes: bool,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    if !yes {
        bail!("This deletes all stored topics. Pass --yes to confirm.");
    }

    let slot = open_slot(data_dir)?;
    slot.wipe().context("Failed to wipe data directory")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "wiped": true,
                "path": slot.base_path().to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted {}", slot.base_path().display());
        }
    }

    Ok(())
}

fn open_slot(data_dir: Option<PathBuf>) -> Result<TopicSlot> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => TopicSlot::default_data_dir().context("Failed to get data directory")?,
    };
    Ok(TopicSlot::new(data_dir))
}
