//! Entity normalization ahead of XML tokenization.
//!
//! Authored HTML uses named entities that XML does not define, and often a
//! bare `&` or `<` in running text. These are rewritten before the fragment
//! reaches `quick-xml`: named HTML entities become their Unicode characters,
//! bare ampersands become `&amp;` and a `<` that cannot open a tag becomes
//! `&lt;`. The five XML entities and numeric references pass through for the
//! tokenizer to resolve.

use std::sync::LazyLock;

use regex::Regex;

/// An ampersand, optionally starting an entity reference.
static AMPERSAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+;|#[xX][0-9a-fA-F]+;|[a-zA-Z][a-zA-Z0-9]*;)?")
        .expect("invalid entity regex")
});

/// A `<` followed by something other than a tag name, `/`, `!` or `?`.
static BARE_LT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^A-Za-z/!?]|$)").expect("invalid bare lt regex"));

/// Rewrite HTML-only entities, bare ampersands and bare `<` into XML-safe text.
pub(crate) fn normalize_entities(html: &str) -> String {
    let html = BARE_LT_PATTERN.replace_all(html, "&lt;$1");
    AMPERSAND_PATTERN
        .replace_all(&html, |caps: &regex::Captures| {
            let Some(reference) = caps.get(1) else {
                return "&amp;".to_owned();
            };
            let name = reference.as_str().trim_end_matches(';');
            if name.starts_with('#') || is_xml_entity(name) {
                return caps[0].to_owned();
            }
            entity_to_unicode(name).map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
        .into_owned()
}

/// Resolve an entity reference reported by the tokenizer.
///
/// Unknown names are kept verbatim as text.
pub(crate) fn decode_reference(name: &str) -> String {
    let resolved = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        s if s.starts_with("#x") || s.starts_with("#X") => {
            u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
        }
        s if s.starts_with('#') => s[1..].parse::<u32>().ok().and_then(char::from_u32),
        _ => None,
    };
    resolved.map_or_else(|| format!("&{name};"), |c| c.to_string())
}

fn is_xml_entity(name: &str) -> bool {
    matches!(name, "lt" | "gt" | "amp" | "apos" | "quot")
}

fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "shy" => "\u{00ad}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "times" => "\u{00d7}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "deg" => "\u{00b0}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "middot" => "\u{00b7}",
        _ => return None,
    })
}
