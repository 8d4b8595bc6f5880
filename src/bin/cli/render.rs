/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Render one flashcard as indented terminal lines. An empty hint is
/// skipped.
pub fn render_card(
    index: usize,
    question: &str,
    hint: &str,
    answer: &str,
    use_color: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    let lead = format!("{:>2}. ", index);
    push_field(&mut lines, &lead, "Q: ", question, Color::BOLD, use_color);
    if !hint.is_empty() {
        push_field(&mut lines, "    ", "Hint: ", hint, Color::DIM, use_color);
    }
    push_field(&mut lines, "    ", "A: ", answer, Color::GREEN, use_color);

    lines
}

fn push_field(
    lines: &mut Vec<String>,
    lead: &str,
    label: &str,
    text: &str,
    color: &str,
    use_color: bool,
) {
    let prefix = format!("{}{}", lead, label);
    let hang = " ".repeat(prefix.len());
    let width = 80usize.saturating_sub(prefix.len());

    for (i, line) in wrap_text(text, width).into_iter().enumerate() {
        let head = if i == 0 { prefix.as_str() } else { hang.as_str() };
        if use_color {
            lines.push(format!("{}{}{}{}", head, color, line, Color::RESET));
        } else {
            lines.push(format!("{}{}", head, line));
        }
    }
}

/// Simple word-wrapping for terminal output
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for line in text.lines() {
        if line.len() <= max_width {
            lines.push(line.to_string());
        } else {
            let words: Vec<&str> = line.split_whitespace().collect();
            let mut current = String::new();
            for word in words {
                if current.is_empty() {
                    current = word.to_string();
                } else if current.len() + 1 + word.len() <= max_width {
                    current.push(' ');
                    current.push_str(word);
                } else {
                    lines.push(current);
                    current = word.to_string();
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
    }

    // A blank field still gets its label line
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
