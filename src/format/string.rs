//! `System.String` extraction and C-style escaping.

use widestring::U16Str;

use crate::{value::StringValue, Result};

/// Copies the UTF-16 contents of a string value and converts them to UTF-8.
///
/// Unpaired surrogates are replaced with U+FFFD.
///
/// # Errors
/// Returns [`crate::Error::Target`] if the length or contents cannot be read.
pub fn read_string(value: &dyn StringValue) -> Result<String> {
    let length = value.length()? as usize;

    // One extra unit for the terminator the debugging interface may append
    let mut buffer = vec![0u16; length + 1];
    let returned = value.read(&mut buffer)? as usize;
    buffer.truncate(returned.min(length));

    Ok(U16Str::from_slice(&buffer).to_string_lossy())
}

/// Escapes `text` for display inside `quote` characters.
///
/// Backslash, the active quote and the control characters `\0 \a \b \f \n \r \t \v` are
/// rewritten to their two-character escapes. The other quote character and everything else is
/// left untouched.
#[must_use]
pub fn escape(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' | '"' if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\0' => escaped.push_str("\\0"),
            '\u{07}' => escaped.push_str("\\a"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0C}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0B}' => escaped.push_str("\\v"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes `text` for a double-quoted literal and wraps it in quotes.
#[must_use]
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text, '"'))
}
