mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mneme_lib::Difficulty;

#[derive(Parser)]
#[command(name = "mneme", about = "Flashcard topics with AI-assisted card generation", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all topics with card counts
    List,

    /// Show a topic and its cards
    Show {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,
    },

    /// Create, edit, or delete topics
    #[command(subcommand)]
    Topic(TopicCommand),

    /// Create, edit, or delete cards
    #[command(subcommand)]
    Card(CardCommand),

    /// Generate cards for a topic with the OpenAI API
    Generate {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,

        /// How many cards to request (3, 5, 8, or 10)
        #[arg(long, default_value = "5")]
        count: usize,

        /// Difficulty: beginner, intermediate, or advanced
        #[arg(long, default_value = "intermediate")]
        difficulty: Difficulty,

        /// API key (default: the OPENAI_API_KEY environment variable)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name (default: gpt-3.5-turbo)
        #[arg(long)]
        model: Option<String>,

        /// Base URL of an OpenAI-compatible API
        #[arg(long)]
        base_url: Option<String>,

        /// Preview extracted cards without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace all stored topics with the starter set
    Reset {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Delete the data directory and everything in it
    Wipe {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TopicCommand {
    /// Create a topic
    Add {
        /// Topic name
        name: String,

        /// Topic description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a topic's name or description
    Edit {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a topic and all its cards
    Rm {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add a card to a topic
    Add {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,

        /// Question text
        #[arg(long)]
        question: String,

        /// Optional hint
        #[arg(long, default_value = "")]
        hint: String,

        /// Answer text (use "-" to read from stdin)
        #[arg(long)]
        answer: String,
    },

    /// Edit a card's fields
    Edit {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,

        /// Card id, id prefix, or 1-based position
        card: String,

        /// New question text
        #[arg(long)]
        question: Option<String>,

        /// New hint (pass "" to clear)
        #[arg(long)]
        hint: Option<String>,

        /// New answer text (use "-" to read from stdin)
        #[arg(long)]
        answer: Option<String>,
    },

    /// Delete a card
    Rm {
        /// Topic name or id (case-insensitive prefix match)
        topic: String,

        /// Card id, id prefix, or 1-based position
        card: String,
    },
}

/// Resolve "-" as stdin for text arguments
fn resolve_arg(value: String) -> String {
    if value == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
        buf
    } else {
        value
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    match cli.command {
        Command::List => {
            let app = app::App::new(cli.data_dir.clone())?;
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Show { topic } => {
            let app = app::App::new(cli.data_dir.clone())?;
            commands::show::run(&app, &topic, &cli.format, use_color)?;
        }
        Command::Topic(subcmd) => {
            let mut app = app::App::new(cli.data_dir.clone())?;
            match subcmd {
                TopicCommand::Add { name, description } => {
                    commands::topic::run_add(&mut app, &name, &description, &cli.format, use_color)?;
                }
                TopicCommand::Edit { topic, name, description } => {
                    commands::topic::run_edit(
                        &mut app,
                        &topic,
                        name.as_deref(),
                        description.as_deref(),
                        &cli.format,
                        use_color,
                    )?;
                }
                TopicCommand::Rm { topic } => {
                    commands::topic::run_rm(&mut app, &topic, &cli.format, use_color)?;
                }
            }
        }
        Command::Card(subcmd) => {
            let mut app = app::App::new(cli.data_dir.clone())?;
            match subcmd {
                CardCommand::Add { topic, question, hint, answer } => {
                    let answer = resolve_arg(answer);
                    commands::card::run_add(
                        &mut app,
                        &topic,
                        &question,
                        &hint,
                        &answer,
                        &cli.format,
                        use_color,
                    )?;
                }
                CardCommand::Edit { topic, card, question, hint, answer } => {
                    let answer = answer.map(resolve_arg);
                    commands::card::run_edit(
                        &mut app,
                        &topic,
                        &card,
                        question.as_deref(),
                        hint.as_deref(),
                        answer.as_deref(),
                        &cli.format,
                        use_color,
                    )?;
                }
                CardCommand::Rm { topic, card } => {
                    commands::card::run_rm(&mut app, &topic, &card, &cli.format, use_color)?;
                }
            }
        }
        Command::Generate {
            topic,
            count,
            difficulty,
            api_key,
            model,
            base_url,
            dry_run,
        } => {
            let mut app = app::App::new(cli.data_dir.clone())?;
            commands::generate::run(
                &mut app,
                &topic,
                count,
                difficulty,
                api_key,
                model,
                base_url,
                dry_run,
                &cli.format,
                use_color,
            )?;
        }
        Command::Reset { yes } => {
            commands::reset::run_reset(cli.data_dir.clone(), yes, &cli.format, use_color)?;
        }
        Command::Wipe { yes } => {
            commands::reset::run_wipe(cli.data_dir.clone(), yes, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
