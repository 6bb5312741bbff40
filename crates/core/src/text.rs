//! Rich-text labels for titles, names, lore and chat messages.
//!
//! Rendering belongs to the engine. A [`Text`] only keeps the markup source and
//! knows enough about the tag syntax to produce a plain-text fallback for logs
//! and tests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Style aliases understood on top of the standard colour/decoration tags.
pub const STYLE_ALIASES: &[(&str, &str)] = &[
    ("green", "#28A745"),
    ("g", "#28A745"),
    ("description", "#A0A0A0"),
    ("d", "#A0A0A0"),
    ("warning", "#FF5733"),
    ("warn", "#FF5733"),
];

/// Placeholders that expand to a glyph prefix.
const PLACEHOLDERS: &[(&str, &str)] = &[("error", "⚠ "), ("success", "✔ "), ("info", "ℹ ")];

/// Which syntax the source string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    /// Angle-bracket tags, e.g. `<red>Shop</red>`.
    Markup,
    /// Ampersand colour codes, e.g. `&aShop`.
    Legacy,
}

/// A rich-text label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    source: String,
    format: TextFormat,
    /// Labels render upright unless the markup asks for italics.
    italic: bool,
}

impl Text {
    /// Tag-based markup.
    pub fn markup(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format: TextFormat::Markup,
            italic: false,
        }
    }

    /// Legacy ampersand-coded text.
    pub fn legacy(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format: TextFormat::Legacy,
            italic: false,
        }
    }

    /// Empty label.
    pub fn empty() -> Self {
        Self::markup("")
    }

    /// Raw source string.
    pub fn as_markup(&self) -> &str {
        &self.source
    }

    /// Source syntax.
    pub fn format(&self) -> TextFormat {
        self.format
    }

    /// Whether the label is rendered in italics by default.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Whether the source is empty.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Text with all formatting removed.
    pub fn to_plain(&self) -> String {
        match self.format {
            TextFormat::Markup => strip_markup(&self.source),
            TextFormat::Legacy => strip_legacy(&self.source),
        }
    }

    /// Markup with every style alias rewritten to its hex colour tag, ready for a
    /// renderer that only knows the standard tags. Legacy text is returned as is.
    pub fn resolved_markup(&self) -> String {
        match self.format {
            TextFormat::Markup => resolve_aliases(&self.source),
            TextFormat::Legacy => self.source.clone(),
        }
    }
}

/// Hex colour a style alias stands for.
pub fn style_alias(name: &str) -> Option<&'static str> {
    STYLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, hex)| *hex)
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::markup(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::markup(value)
    }
}

fn strip_markup(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find(['<', '\\']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(escaped) = tail.strip_prefix("\\<") {
            out.push('<');
            rest = escaped;
            continue;
        }
        if tail.starts_with('\\') {
            out.push('\\');
            rest = &tail[1..];
            continue;
        }

        match tail[1..].find('>') {
            Some(end) if is_tag(&tail[1..=end]) => {
                let tag = &tail[1..=end];
                if let Some((_, glyph)) = PLACEHOLDERS.iter().find(|(name, _)| *name == tag) {
                    out.push_str(glyph);
                }
                rest = &tail[end + 2..];
            }
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn resolve_aliases(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find(['<', '\\']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(escaped) = tail.strip_prefix("\\<") {
            out.push_str("\\<");
            rest = escaped;
            continue;
        }
        if tail.starts_with('\\') {
            out.push('\\');
            rest = &tail[1..];
            continue;
        }

        match tail[1..].find('>') {
            Some(end) if is_tag(&tail[1..=end]) => {
                let inner = &tail[1..=end];
                let (close, name) = match inner.strip_prefix('/') {
                    Some(name) => ("/", name),
                    None => ("", inner),
                };
                match style_alias(name) {
                    Some(hex) => {
                        out.push('<');
                        out.push_str(close);
                        out.push_str(hex);
                        out.push('>');
                    }
                    None => out.push_str(&tail[..end + 2]),
                }
                rest = &tail[end + 2..];
            }
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_tag(inner: &str) -> bool {
    let name = inner.strip_prefix('/').unwrap_or(inner);
    !name.is_empty()
        && !name.starts_with(char::is_whitespace)
        && !name.contains('<')
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '#' || c == '!')
}

fn strip_legacy(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            if let Some(&code) = chars.peek() {
                if matches!(code.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r') {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
