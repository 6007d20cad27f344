//! Label to class-name normalization.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-z]").expect("invalid class name regex"));

static DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("invalid dash run regex"));

/// Normalize an authored label into an id- and class-safe token.
///
/// Lowercases, replaces every character outside `[0-9a-z]` with `-`,
/// collapses dash runs and trims dashes from both ends.
///
/// # Examples
///
/// ```
/// use eb_blocks::to_class_name;
///
/// assert_eq!(to_class_name("Specs & Sizes"), "specs-sizes");
/// assert_eq!(to_class_name("  --FAQ--  "), "faq");
/// ```
pub fn to_class_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let dashed = NON_ALPHANUMERIC.replace_all(&lower, "-");
    let collapsed = DASH_RUN.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_owned()
}
