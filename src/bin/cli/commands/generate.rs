use anyhow::{bail, Context, Result};

use mneme_lib::extract::{extract_cards, Stage};
use mneme_lib::openai::{
    CompletionClient, Difficulty, ALLOWED_COUNTS, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
use mneme_lib::Card;

use crate::app::App;
use crate::render;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    topic_selector: &str,
    count: usize,
    difficulty: Difficulty,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    dry_run: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if !ALLOWED_COUNTS.contains(&count) {
        bail!("Count must be one of 3, 5, 8, or 10 (got {})", count);
    }

    let topic = app.find_topic(topic_selector)?;

    let api_key = api_key
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
        .context("No API key. Pass --api-key or set OPENAI_API_KEY.")?;

    let client = CompletionClient::with_options(
        api_key,
        base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
    )?;

    eprintln!(
        "Requesting {} {} cards for \"{}\" from {}...",
        count,
        difficulty,
        topic.name,
        client.model()
    );

    let raw = client.generate_cards(&topic.name, count, difficulty)?;
    let extraction = extract_cards(&raw, count, &topic.name);

    match extraction.stage {
        Stage::StrictJson => {}
        Stage::LinePattern => {
            eprintln!("Response was not valid JSON; recovered cards from labeled lines.");
        }
        Stage::LastResort => {
            eprintln!("Response had no recognizable card structure; built placeholder cards.");
        }
    }
    if !extraction.count_matches() {
        eprintln!(
            "Warning: asked for {} cards, got {}.",
            count,
            extraction.drafts.len()
        );
    }

    if dry_run {
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            }
            OutputFormat::Plain => {
                println!(
                    "Would add {} cards to \"{}\":",
                    extraction.drafts.len(),
                    topic.name
                );
                print_drafts(&extraction.drafts, use_color);
            }
        }
        return Ok(());
    }

    let cards: Vec<Card> = extraction
        .drafts
        .iter()
        .map(|d| Card::new(d.question.clone(), d.hint.clone(), d.answer.clone()))
        .collect();
    let added = cards.len();

    let next = app.topics.clone().add_cards(topic.id, cards);
    app.commit(next)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "topicId": topic.id.to_string(),
                "topicName": topic.name,
                "added": added,
                "stage": extraction.stage,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Added {} cards to \"{}\"", added, topic.name);
            print_drafts(&extraction.drafts, use_color);
        }
    }

    Ok(())
}

fn print_drafts(drafts: &[mneme_lib::extract::CardDraft], use_color: bool) {
    for (i, draft) in drafts.iter().enumerate() {
        println!();
        let lines =
            render::render_card(i + 1, &draft.question, &draft.hint, &draft.answer, use_color);
        for line in lines {
            println!("{}", line);
        }
    }
}
