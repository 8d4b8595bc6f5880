use anyhow::{bail, Context, Result};

use mneme_lib::CardUpdate;

use crate::app::App;
use crate::OutputFormat;

pub fn run_add(
    app: &mut App,
    topic_selector: &str,
    question: &str,
    hint: &str,
    answer: &str,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        bail!("Card question must not be empty");
    }
    let answer = answer.trim();
    if answer.is_empty() {
        bail!("Card answer must not be empty");
    }

    let topic = app.find_topic(topic_selector)?;

    let (next, card_id) = app.topics.clone().add_card(
        topic.id,
        question.to_string(),
        hint.trim().to_string(),
        answer.to_string(),
    );
    let card_id =
        card_id.with_context(|| format!("Topic \"{}\" no longer exists", topic.name))?;
    app.commit(next)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card_id.to_string(),
                "topicId": topic.id.to_string(),
                "topicName": topic.name,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Added card to topic \"{}\"", topic.name);
            println!("  ID: {}", card_id);
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &mut App,
    topic_selector: &str,
    card_selector: &str,
    question: Option<&str>,
    hint: Option<&str>,
    answer: Option<&str>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    if question.is_none() && hint.is_none() && answer.is_none() {
        bail!("Nothing to change. Pass --question, --hint, or --answer.");
    }

    let topic = app.find_topic(topic_selector)?;
    let card = app.find_card(&topic, card_selector)?;

    let question = match question {
        Some(q) if q.trim().is_empty() => bail!("Card question must not be empty"),
        Some(q) => Some(q.trim().to_string()),
        None => None,
    };
    let answer = match answer {
        Some(a) if a.trim().is_empty() => bail!("Card answer must not be empty"),
        Some(a) => Some(a.trim().to_string()),
        None => None,
    };

    let update = CardUpdate {
        question,
        // An empty hint clears it
        hint: hint.map(|h| h.trim().to_string()),
        answer,
    };

    let next = app.topics.clone().update_card(topic.id, card.id, update);
    app.commit(next)?;

    let updated = app
        .topics
        .topic(topic.id)
        .and_then(|t| t.card(card.id))
        .cloned()
        .unwrap_or(card);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        OutputFormat::Plain => {
            println!("Updated card {} in topic \"{}\"", updated.id, topic.name);
        }
    }

    Ok(())
}

pub fn run_rm(
    app: &mut App,
    topic_selector: &str,
    card_selector: &str,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let topic = app.find_topic(topic_selector)?;
    let card = app.find_card(&topic, card_selector)?;

    let next = app.topics.clone().delete_card(topic.id, card.id);
    app.commit(next)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id.to_string(),
                "topicId": topic.id.to_string(),
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted card {} from topic \"{}\"", card.id, topic.name);
        }
    }

    Ok(())
}
