use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```(?:json)?").unwrap());
static REPEATED_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*,+").unwrap());
static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\s*[}\]])").unwrap());

/// Cuts the JSON object out of a chat response and repairs the mistakes
/// models commonly make: code fences, leading prose, `//` comments, trailing
/// commas and unbalanced braces. Returns `None` when there is no object.
pub fn clean_json_response(raw: &str) -> Option<String> {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    let start = unfenced.find('{')?;
    let body = match unfenced.rfind('}') {
        Some(end) if end > start => &unfenced[start..=end],
        _ => &unfenced[start..],
    };

    let body = strip_line_comments(body);
    let body = REPEATED_COMMA.replace_all(&body, ",");
    let body = TRAILING_COMMA.replace_all(&body, "$1");
    Some(balance_braces(body.trim()))
}

/// Parses a chat response into a JSON object.
pub fn parse_json_object(raw: &str) -> Result<Value, String> {
    let cleaned =
        clean_json_response(raw).ok_or_else(|| "no JSON object in response".to_string())?;
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("response is not a JSON object".to_string()),
        Err(e) => Err(format!("{} in {:?}", e, preview(&cleaned))),
    }
}

/// Rewrites a score given as text, such as `"7.5/10"` or `"8"`, into a number.
pub fn normalize_score(value: &mut Value, key: &str) {
    let Some(slot) = value.get_mut(key) else {
        return;
    };
    let Some(text) = slot.as_str() else {
        return;
    };
    let numeric = text.split('/').next().unwrap_or_default().trim();
    if let Some(number) = numeric
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
    {
        *slot = Value::Number(number);
    }
}

/// Drops `//` comments that start outside a string literal, up to the end
/// of their line.
fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(ch);
            continue;
        }
        match ch {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&next| next != '\n').is_some() {}
                continue;
            }
            _ => {}
        }
        out.push(ch);
    }
    out
}

fn balance_braces(text: &str) -> String {
    let mut depth: i64 = 0;
    let mut extra_closers = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' if depth == 0 => extra_closers.push(idx),
            '}' => depth -= 1,
            _ => {}
        }
    }

    let mut balanced: String = text
        .char_indices()
        .filter(|(idx, _)| !extra_closers.contains(idx))
        .map(|(_, ch)| ch)
        .collect();
    if in_string {
        balanced.push('"');
    }
    for _ in 0..depth {
        balanced.push('}');
    }
    balanced
}

fn preview(text: &str) -> String {
    text.chars().take(80).collect()
}
