//! Display name cleanup

use std::sync::LazyLock;

use regex::Regex;

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*").expect("valid parenthesized pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strip serving annotations from a food name
///
/// "Chicken Breast (grilled, 4 oz)" becomes "Chicken Breast".
pub fn canonicalize(name: &str) -> String {
    let stripped = PARENTHESIZED.replace_all(name, " ");
    WHITESPACE_RUN.replace_all(stripped.trim(), " ").into_owned()
}
