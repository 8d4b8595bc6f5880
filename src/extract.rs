//! Card draft extraction from AI completion output
//!
//! The completion service is asked for a JSON array of
//! question/hint/answer objects, but the reply is free-form text and
//! regularly arrives fenced, decorated, or not as JSON at all. This
//! module recovers an ordered list of card drafts from whatever came
//! back: a strict JSON parse first, then a scan for labeled lines, then
//! a last-resort synthesis from raw lines. Extraction never fails; the
//! final stage always yields at least one draft.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Which stage of the pipeline produced the drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// The response contained a parseable, non-empty JSON array
    StrictJson,
    /// Drafts were recovered from question:/hint:/answer: lines
    LinePattern,
    /// Drafts were synthesized from raw non-blank lines
    LastResort,
}

/// A card draft recovered from model output. Question, hint, and answer
/// are never empty; a field the model left out carries a generated
/// placeholder naming the field and the draft's position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub question: String,
    pub hint: String,
    pub answer: String,
}

/// Result of running the pipeline over one response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub drafts: Vec<CardDraft>,
    pub stage: Stage,
    pub requested: usize,
}

impl Extraction {
    /// Whether the draft count matches what the caller asked for.
    /// A mismatch is a warning, never a failure.
    pub fn count_matches(&self) -> bool {
        self.drafts.len() == self.requested
    }
}

/// Extract card drafts from raw completion output
pub fn extract_cards(raw: &str, requested: usize, topic_label: &str) -> Extraction {
    let (drafts, stage) = if let Some(parsed) = parse_strict_json(raw) {
        (parsed, Stage::StrictJson)
    } else {
        let scanned = scan_labeled_lines(raw);
        if scanned.is_empty() {
            let synthesized = synthesize_from_lines(raw, requested, topic_label);
            (synthesized, Stage::LastResort)
        } else {
            (scanned, Stage::LinePattern)
        }
    };

    let extraction = Extraction {
        drafts: finalize(drafts),
        stage,
        requested,
    };
    if !extraction.count_matches() {
        log::warn!(
            "Expected {} cards but extracted {} ({:?} stage)",
            requested,
            extraction.drafts.len(),
            extraction.stage
        );
    }
    extraction
}

/// A draft as a stage produced it, before field cleanup
#[derive(Debug, Default)]
struct RawDraft {
    question: Option<String>,
    hint: Option<String>,
    answer: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Question,
    Hint,
    Answer,
}

// ==================== Stage 1: Strict JSON ====================

/// Strip code fences, slice out the JSON payload, and parse it.
/// The array pattern wins over the object pattern. Returns `None`
/// unless the payload is a non-empty array.
fn parse_strict_json(raw: &str) -> Option<Vec<RawDraft>> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    let slice = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => match (cleaned.find('{'), cleaned.rfind('}')) {
            (Some(start), Some(end)) if start < end => &cleaned[start..=end],
            _ => cleaned.trim(),
        },
    };

    let value: Value = serde_json::from_str(slice.trim()).ok()?;
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }

    let drafts = items
        .iter()
        .map(|item| RawDraft {
            question: value_field(item, "question"),
            hint: value_field(item, "hint"),
            answer: value_field(item, "answer"),
        })
        .collect();
    Some(drafts)
}

/// Read one field of a parsed draft object, stringifying non-string
/// values the way the model sometimes emits them (numbers, booleans)
fn value_field(item: &Value, name: &str) -> Option<String> {
    match item.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

// ==================== Stage 3: Labeled lines ====================

/// Scan the raw text for case-insensitive question:/hint:/answer:
/// markers. A question: marker closes the open draft and starts a new
/// one; non-marker lines continue the active field. Drafts without a
/// question are dropped.
fn scan_labeled_lines(raw: &str) -> Vec<RawDraft> {
    let question_marker = Regex::new(r"(?i)^.*?question:\s*").unwrap();
    let hint_marker = Regex::new(r"(?i)^.*?hint:\s*").unwrap();
    let answer_marker = Regex::new(r"(?i)^.*?answer:\s*").unwrap();

    let mut drafts = Vec::new();
    let mut current = RawDraft::default();
    let mut active: Option<Field> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        if lower.contains("question:") {
            close_draft(&mut drafts, std::mem::take(&mut current));
            current.question = Some(question_marker.replace(line, "").trim().to_string());
            active = Some(Field::Question);
        } else if lower.contains("hint:") {
            current.hint = Some(hint_marker.replace(line, "").trim().to_string());
            active = Some(Field::Hint);
        } else if lower.contains("answer:") {
            current.answer = Some(answer_marker.replace(line, "").trim().to_string());
            active = Some(Field::Answer);
        } else if let Some(field) = active {
            append_to_field(&mut current, field, line);
        }
    }
    close_draft(&mut drafts, current);

    drafts
}

fn close_draft(drafts: &mut Vec<RawDraft>, draft: RawDraft) {
    if let Some(question) = &draft.question {
        if !question.is_empty() {
            drafts.push(draft);
        }
    }
}

/// Continuation lines join the active field with a single space
fn append_to_field(current: &mut RawDraft, field: Field, line: &str) {
    let slot = match field {
        Field::Question => &mut current.question,
        Field::Hint => &mut current.hint,
        Field::Answer => &mut current.answer,
    };
    match slot {
        Some(value) if !value.is_empty() => {
            value.push(' ');
            value.push_str(line);
        }
        _ => *slot = Some(line.to_string()),
    }
}

// ==================== Stage 4: Last resort ====================

/// Build drafts straight from non-blank lines, one line per question,
/// capped at the requested count. Yields at least one draft even for
/// empty input.
fn synthesize_from_lines(raw: &str, requested: usize, topic_label: &str) -> Vec<RawDraft> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let count = requested.min(lines.len()).max(1);

    (0..count)
        .map(|i| RawDraft {
            question: Some(match lines.get(i) {
                Some(line) => line.to_string(),
                None => format!("Question about {}", topic_label),
            }),
            hint: Some(format!("Hint for question {}", i + 1)),
            answer: Some(format!("Answer for question {}", i + 1)),
        })
        .collect()
}

// ==================== Field cleanup ====================

/// Clean every field of every draft and fill the gaps with placeholders
fn finalize(drafts: Vec<RawDraft>) -> Vec<CardDraft> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let position = index + 1;
            CardDraft {
                question: clean_field(draft.question, Field::Question, position),
                hint: clean_field(draft.hint, Field::Hint, position),
                answer: clean_field(draft.answer, Field::Answer, position),
            }
        })
        .collect()
}

/// A field that is absent, or empty once cleaned, becomes a placeholder
fn clean_field(value: Option<String>, field: Field, position: usize) -> String {
    let cleaned = value.map(|v| clean_text(&v)).unwrap_or_default();
    if cleaned.is_empty() {
        placeholder(field, position)
    } else {
        cleaned
    }
}

fn placeholder(field: Field, position: usize) -> String {
    match field {
        Field::Question => format!("AI Generated Question {}", position),
        Field::Hint => format!("Hint for question {}", position),
        Field::Answer => format!("Answer for question {}", position),
    }
}

/// Normalize one field value: strip exactly one wrapping quote layer,
/// drop a leading field label, unescape literal \n and \" sequences,
/// and trim
fn clean_text(text: &str) -> String {
    let mut cleaned = text.to_string();

    let bytes = cleaned.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            cleaned = cleaned[1..cleaned.len() - 1].to_string();
        }
    }

    let label = Regex::new(r"(?i)^(question|hint|answer):\s*").unwrap();
    cleaned = label.replace(&cleaned, "").to_string();

    cleaned = cleaned.replace("\\n", "\n").replace("\\\"", "\"");
    cleaned.trim().to_string()
}
