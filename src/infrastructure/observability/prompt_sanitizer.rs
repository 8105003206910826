const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens text sent to a model so it can be logged, and masks anything
/// that looks like a credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, total)
    } else {
        trimmed.to_string()
    };

    SECRET_MARKERS
        .iter()
        .fold(visible, |text, marker| redact_after(&text, marker))
}

fn redact_after(text: &str, marker: &str) -> String {
    let Some(idx) = text.find(marker) else {
        return text.to_string();
    };
    let value_start = idx + marker.len();
    let value_end = text[value_start..]
        .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
        .map(|i| value_start + i)
        .unwrap_or(text.len());
    format!("{}[REDACTED]{}", &text[..value_start], &text[value_end..])
}
