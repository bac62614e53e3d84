//! Narrow interface to rich-text markup.
//!
//! The editing collaborator hands the core serialized markup; nothing
//! here attempts to model a rich-text document. These helpers exist to
//! answer two questions: "does this body contain any actual text?" and
//! "what snippet do we show in a list?".

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Extract the plain text of a markup body: tags replaced by spaces,
/// common entities decoded.
pub fn plain_text(markup: &str) -> String {
    let stripped = tag_pattern().replace_all(markup, " ");
    decode_entities(&stripped)
}

/// Whether the markup contains any non-whitespace text content.
pub fn has_text(markup: &str) -> bool {
    !plain_text(markup).trim().is_empty()
}

/// Single-line plain-text snippet, whitespace collapsed, truncated to
/// `max_chars` characters.
pub fn preview(markup: &str, max_chars: usize) -> String {
    let text = plain_text(markup);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
