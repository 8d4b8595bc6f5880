use anyhow::{bail, Result};

use mneme_lib::TopicUpdate;

use crate::app::App;
use crate::OutputFormat;

pub fn run_add(
    app: &mut App,
    name: &str,
    description: &str,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Topic name must not be empty");
    }

    let (next, topic_id) = app
        .topics
        .clone()
        .add_topic(name.to_string(), description.trim().to_string());
    app.commit(next)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic_id.to_string(),
                "name": name,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Created topic \"{}\"", name);
            println!("  ID: {}", topic_id);
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &mut App,
    topic_selector: &str,
    name: Option<&str>,
    description: Option<&str>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    if name.is_none() && description.is_none() {
        bail!("Nothing to change. Pass --name or --description.");
    }

    let topic = app.find_topic(topic_selector)?;

    let name = match name {
        Some(n) if n.trim().is_empty() => bail!("Topic name must not be empty"),
        Some(n) => Some(n.trim().to_string()),
        None => None,
    };

    let update = TopicUpdate {
        name,
        description: description.map(|d| d.trim().to_string()),
        cards: None,
    };

    let next = app.topics.clone().update_topic(topic.id, update);
    app.commit(next)?;

    let updated = app.topics.topic(topic.id).cloned().unwrap_or(topic);
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": updated.id.to_string(),
                "name": updated.name,
                "description": updated.description,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Updated topic \"{}\"", updated.name);
        }
    }

    Ok(())
}

pub fn run_rm(
    app: &mut App,
    topic_selector: &str,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let topic = app.find_topic(topic_selector)?;

    let next = app.topics.clone().delete_topic(topic.id);
    app.commit(next)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id.to_string(),
                "name": topic.name,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Deleted topic \"{}\" ({} cards)",
                topic.name,
                topic.card_count()
            );
        }
    }

    Ok(())
}
