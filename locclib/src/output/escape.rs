//! String escaping for the report formats.
//!
//! Each format has its own rules. The functions return `Cow` so values that
//! need no escaping (the vast majority) are passed through without copying.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Escape a CSV field.
///
/// A field containing a comma is wrapped in double quotes. A field containing a
/// double quote has the quotes doubled and is wrapped. `None` becomes an empty
/// field.
pub fn csv_escape(field: Option<&str>) -> Cow<'_, str> {
    let Some(field) = field else {
        return Cow::Borrowed("");
    };

    if field.contains('"') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else if field.contains(',') {
        Cow::Owned(format!("\"{field}\""))
    } else {
        Cow::Borrowed(field)
    }
}

fn needs_markup_escape(text: &str, quote: bool) -> bool {
    text.chars().any(|ch| {
        !matches!(ch, '\n' | '\t' | '\r' | ' '..='~') || matches!(ch, '&' | '<' | '>') || (quote && ch == '"')
    })
}

fn html_escape_into(text: &str, quote: bool) -> Cow<'_, str> {
    if !needs_markup_escape(text, quote) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quote => escaped.push_str("&quot;"),
            '\n' | '\t' | '\r' | ' '..='~' => escaped.push(ch),
            '\u{7F}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}' => {
                let _ = write!(escaped, "&#x{:X};", ch as u32);
            }
            _ => {}
        }
    }
    Cow::Owned(escaped)
}

/// Escape text for an HTML element body.
///
/// `&`, `<` and `>` become named entities, newline, tab and carriage return are
/// kept, printable ASCII passes through, other C0 controls and the noncharacters
/// U+FFFE/U+FFFF are dropped, and everything else becomes a `&#xHEX;` reference.
pub fn html_escape(text: &str) -> Cow<'_, str> {
    html_escape_into(text, false)
}

/// Escape text for a double quoted HTML attribute value.
pub fn html_attribute_escape(text: &str) -> Cow<'_, str> {
    html_escape_into(text, true)
}

fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | ' '..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text for a double quoted XML attribute value.
///
/// Markup characters become entities, whitespace controls become numeric
/// references so attribute normalization keeps them, and characters not
/// allowed in XML 1.0 are dropped.
pub fn xml_attribute_escape(text: &str) -> Cow<'_, str> {
    let clean = text
        .chars()
        .all(|ch| is_xml_char(ch) && !matches!(ch, '&' | '<' | '>' | '"' | '\'' | '\t' | '\n' | '\r'));
    if clean {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            _ if is_xml_char(ch) => escaped.push(ch),
            _ => {}
        }
    }
    Cow::Owned(escaped)
}

/// Escape text for an XML element body.
pub fn xml_text_escape(text: &str) -> Cow<'_, str> {
    if text.chars().all(|ch| is_xml_char(ch) && !matches!(ch, '&' | '<' | '>')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ if is_xml_char(ch) => escaped.push(ch),
            _ => {}
        }
    }
    Cow::Owned(escaped)
}

/// YAML scalar quoting styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    None,
    Single,
    Double,
}

const YAML_INDICATORS: &str = "#,[]{}&*!|>%@?:-/";

/// Decide how a YAML scalar must be quoted.
///
/// Anything needing a backslash escape must be double quoted. Otherwise a
/// string containing an indicator character, or one that starts or ends with
/// a space, starts with `---` or ends with `...`, is single quoted. The empty
/// string is single quoted so it does not read as null.
pub fn yaml_requires_quotes(text: &str) -> Quoting {
    if text.is_empty() {
        return Quoting::Single;
    }

    let mut needs_single = text.starts_with(' ')
        || text.ends_with(' ')
        || text.starts_with("---")
        || text.ends_with("...");

    for ch in text.chars() {
        if YAML_INDICATORS.contains(ch) {
            needs_single = true;
        } else if !(' '..='~').contains(&ch) || matches!(ch, '"' | '\'' | '\\') {
            return Quoting::Double;
        }
    }

    if needs_single {
        Quoting::Single
    } else {
        Quoting::None
    }
}

/// Write a YAML scalar, quoted and escaped as [`yaml_requires_quotes`] decides.
pub fn yaml_write_escaped<W: Write + ?Sized>(out: &mut W, text: &str) -> fmt::Result {
    match yaml_requires_quotes(text) {
        Quoting::None => out.write_str(text),
        Quoting::Single => write!(out, "'{text}'"),
        Quoting::Double => {
            out.write_char('"')?;
            for ch in text.chars() {
                match ch {
                    '\0' => out.write_str("\\0")?,
                    '\u{07}' => out.write_str("\\a")?,
                    '\u{08}' => out.write_str("\\b")?,
                    '\t' => out.write_str("\\t")?,
                    '\n' => out.write_str("\\n")?,
                    '\u{0B}' => out.write_str("\\v")?,
                    '\r' => out.write_str("\\r")?,
                    '"' => out.write_str("\\\"")?,
                    '/' => out.write_str("\\/")?,
                    '\\' => out.write_str("\\\\")?,
                    '\u{85}' => out.write_str("\\N")?,
                    '\u{A0}' => out.write_str("\\_")?,
                    '\u{2028}' => out.write_str("\\L")?,
                    '\u{2029}' => out.write_str("\\P")?,
                    '\0'..='\u{1F}' => write!(out, "\\x{:02X}", ch as u32)?,
                    ' '..='~' => out.write_char(ch)?,
                    '\u{7F}'..='\u{FF}' => write!(out, "\\x{:02X}", ch as u32)?,
                    '\u{100}'..='\u{FFFF}' => write!(out, "\\u{:04X}", ch as u32)?,
                    _ => write!(out, "\\U{:08X}", ch as u32)?,
                }
            }
            out.write_char('"')
        }
    }
}

/// Quote and escape a YAML scalar into a new string.
pub fn yaml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    // Writing to a String cannot fail.
    let _ = yaml_write_escaped(&mut escaped, text);
    escaped
}
