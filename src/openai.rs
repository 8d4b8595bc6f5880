//! OpenAI chat completion client for card generation
//!
//! One outbound request per generate action, single attempt, no retry.
//! The client returns the raw completion text; turning it into card
//! drafts is the extraction pipeline's job.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Card counts a generation request may ask for
pub const ALLOWED_COUNTS: [usize; 4] = [3, 5, 8, 10];

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: check the API key")]
    AuthFailed,

    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Completion response contained no choices")]
    EmptyResponse,
}

/// Difficulty level requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!(
                "unknown difficulty '{}', expected beginner, intermediate, or advanced",
                other
            )),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the chat completion endpoint
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(api_key: String) -> Result<Self, GenerateError> {
        Self::with_options(
            api_key,
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
        )
    }

    pub fn with_options(
        api_key: String,
        base_url: String,
        model: String,
    ) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Request flashcard text for a topic. Returns the first choice's
    /// raw content for the extraction pipeline.
    pub fn generate_cards(
        &self,
        topic_name: &str,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(topic_name, count),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(topic_name, count, difficulty),
                },
            ],
            temperature: 0.7,
            max_tokens: 2000,
        };

        log::info!(
            "Requesting {} {} cards about '{}' from {}",
            count,
            difficulty,
            topic_name,
            self.model
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GenerateError::AuthFailed);
            }
            status if !status.is_success() => {
                return Err(GenerateError::Api {
                    status: status.as_u16(),
                    message: response.text().unwrap_or_default(),
                });
            }
            _ => {}
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerateError::EmptyResponse)
    }
}

fn system_prompt(topic_name: &str, count: usize) -> String {
    format!(
        r#"You are an expert educator creating flashcards for learning. Create exactly {count} high-quality flashcards about "{topic}".

Each flashcard should have:
1. A clear, concise question
2. A helpful hint that guides the learner
3. A comprehensive answer that explains the concept

IMPORTANT: Return your response as a VALID JSON ARRAY containing exactly {count} objects. Each object must have these exact field names:

[
  {{
    "question": "Your question here",
    "hint": "Your hint here",
    "answer": "Your answer here"
  }},
  {{
    "question": "Your second question here",
    "hint": "Your second hint here",
    "answer": "Your second answer here"
  }}
]

Do not include any text before or after the JSON array. Do not include explanations, markdown formatting, or any other content. Return ONLY the JSON array."#,
        count = count,
        topic = topic_name
    )
}

fn user_prompt(topic_name: &str, count: usize, difficulty: Difficulty) -> String {
    format!(
        r#"Create exactly {count} flashcards about "{topic}" with {difficulty} difficulty level. Focus on practical concepts and real-world applications.

CRITICAL: Return ONLY a valid JSON array with {count} objects. Each object must have "question", "hint", and "answer" fields. Do not include any other text, explanations, or formatting."#,
        count = count,
        topic = topic_name,
        difficulty = difficulty
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_joins_base() {
        let client = CompletionClient::new("sk-test".to_string()).unwrap();
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let client = CompletionClient::with_options(
            "sk-test".to_string(),
            "http://localhost:8080/v1/".to_string(),
            "test-model".to_string(),
        )
        .unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(client.model(), "test-model");
    }

    #[test]
    fn test_prompts_carry_request_parameters() {
        let system = system_prompt("Node.js Fundamentals", 8);
        assert!(system.contains("exactly 8 high-quality flashcards"));
        assert!(system.contains("\"Node.js Fundamentals\""));
        assert!(system.contains("VALID JSON ARRAY"));

        let user = user_prompt("Node.js Fundamentals", 8, Difficulty::Advanced);
        assert!(user.contains("exactly 8 flashcards"));
        assert!(user.contains("advanced difficulty level"));
    }

    #[test]
    fn test_chat_request_wire_format() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![ChatMessage {
                role: "system",
                content: "hello".to_string(),
            }],
            temperature: 0.7,
            max_tokens: 2000,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "system");
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("beginner".parse::<Difficulty>(), Ok(Difficulty::Beginner));
        assert_eq!("Advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Intermediate.to_string(), "intermediate");
    }

    #[test]
    fn test_allowed_counts() {
        assert_eq!(ALLOWED_COUNTS, [3, 5, 8, 10]);
        assert!(ALLOWED_COUNTS.contains(&5));
        assert!(!ALLOWED_COUNTS.contains(&7));
    }
}
