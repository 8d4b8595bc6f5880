use anyhow::Result;

use crate::app::App;
use crate::render::Color;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let topics = app.topics.topics();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = topics
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id.to_string(),
                        "name": t.name,
                        "description": t.description,
                        "cardCount": t.card_count(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if topics.is_empty() {
                println!("No topics found.");
                return Ok(());
            }

            for topic in topics {
                if use_color {
                    println!(
                        "{}{}{} ({} cards)",
                        Color::BOLD,
                        topic.name,
                        Color::RESET,
                        topic.card_count()
                    );
                } else {
                    println!("{} ({} cards)", topic.name, topic.card_count());
                }
                if !topic.description.is_empty() {
                    if use_color {
                        println!("    {}{}{}", Color::DIM, topic.description, Color::RESET);
                    } else {
                        println!("    {}", topic.description);
                    }
                }
            }

            println!("\n{} topics total", topics.len());
        }
    }

    Ok(())
}
