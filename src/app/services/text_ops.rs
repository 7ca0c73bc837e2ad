use once_cell::sync::Lazy;
use regex_lite::Regex;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("invalid tag pattern"));

/// Strip markup tags from serialized content, leaving the visible text.
/// Best-effort: only `&nbsp;` is decoded among entities.
pub fn strip_tags(content: &str) -> String {
    TAG_PATTERN
        .replace_all(content, "")
        .replace("&nbsp;", " ")
}

/// Wrap newline-delimited footnote suggestions as markup paragraphs,
/// skipping blank lines.
pub fn footnote_markup(suggestions: &str) -> String {
    suggestions
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p class=\"footnote\">{}</p>", line))
        .collect()
}
