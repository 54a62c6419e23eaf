use chrono::{DateTime, Local};

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let end = s
            .char_indices()
            .nth(max_len.saturating_sub(3))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}

/// Wrap text to lines of at most `width` characters, breaking at word boundaries.
/// A single word longer than `width` keeps a line of its own.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Word-wrap `text` and keep at most `max_lines`, ending the last kept line
/// with "..." when something was cut.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = word_wrap(text, width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(3);
            let head: String = last.chars().take(keep).collect();
            *last = format!("{}...", head.trim_end());
        }
    }
    lines
}

pub fn format_updated(ts: &DateTime<Local>) -> String {
    format!("Actualizado: {}", ts.format("%H:%M:%S"))
}

/// Render `publishedAt` in local time when it is RFC 3339, else as given.
pub fn format_published(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%d %b %Y  %H:%M")
            .to_string(),
        Err(_) => raw.trim().to_string(),
    }
}
