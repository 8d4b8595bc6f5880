use anyhow::Result;

use crate::app::App;
use crate::render::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, topic_selector: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let topic = app.find_topic(topic_selector)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&topic)?);
        }
        OutputFormat::Plain => {
            if use_color {
                println!("{}{}{}", Color::BOLD, topic.name, Color::RESET);
            } else {
                println!("{}", topic.name);
            }
            if !topic.description.is_empty() {
                println!("{}", topic.description);
            }
            if use_color {
                println!("{}{}{}", Color::DIM, topic.id, Color::RESET);
            } else {
                println!("{}", topic.id);
            }

            if topic.cards.is_empty() {
                println!("\nNo cards yet.");
                return Ok(());
            }

            for (i, card) in topic.cards.iter().enumerate() {
                println!();
                let lines =
                    render::render_card(i + 1, &card.question, &card.hint, &card.answer, use_color);
                for line in lines {
                    println!("{}", line);
                }
                if use_color {
                    println!("    {}{}{}", Color::GRAY, card.id, Color::RESET);
                } else {
                    println!("    {}", card.id);
                }
            }

            println!("\n{} cards total", topic.cards.len());
        }
    }

    Ok(())
}
