//! Terminal output sanitization for message content
//!
//! Conversation exports are untrusted input. Message text printed by the CLI
//! is passed through [`sanitize`] first so embedded ANSI escape sequences
//! cannot recolor, clear or move around the user's terminal.

/// Remove ANSI CSI sequences and control characters
///
/// With `single_line`, newlines and tabs become single spaces and runs of
/// whitespace collapse, for one-line previews.
///
/// # Examples
///
/// ```
/// use chat_search::utils::terminal::sanitize;
///
/// assert_eq!(sanitize("\x1b[31mred\x1b[0m\nnext", true), "red next");
/// ```
pub fn sanitize(text: &str, single_line: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        // ESC [ params final-byte
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if single_line && ch.is_whitespace() {
            if !out.ends_with(' ') && !out.is_empty() {
                out.push(' ');
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        out.push(ch);
    }

    if single_line {
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
    }

    out
}

/// Shorten to at most `max_chars` characters, marking the cut with `…`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
