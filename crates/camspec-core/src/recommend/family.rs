//! Engine family matching
//!
//! Family names are free text ("SBF Windsor (221/260/289/302/351W)",
//! "Gen III/IV LS (4.8/5.3/...)"). Two families match when their token sets
//! intersect.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static PARENTHETICAL: OnceLock<Regex> = OnceLock::new();
static SEPARATORS: OnceLock<Regex> = OnceLock::new();

/// Words too generic to identify a family
fn stopwords() -> &'static HashSet<&'static str> {
    STOPWORDS.get_or_init(|| {
        [
            "engine", "family", "series", "block", "blocks", "small", "big", "gen", "iii", "iv",
            "v", "vi", "ls", "lt", "ohv", "ohc", "sohc", "dohc",
        ]
        .into_iter()
        .collect()
    })
}

fn parenthetical_regex() -> &'static Regex {
    PARENTHETICAL.get_or_init(|| Regex::new(r"\(.*?\)").unwrap())
}

fn separator_regex() -> &'static Regex {
    SEPARATORS.get_or_init(|| Regex::new(r"[\s/,&-]+").unwrap())
}

/// Drop parenthesized displacement lists and surrounding whitespace
pub fn strip_parenthetical(value: &str) -> String {
    parenthetical_regex().replace_all(value, " ").trim().to_string()
}

/// Search tokens for a family name: lowercase alphanumerics, at least three
/// characters, not purely numeric, not a stopword.
pub fn family_tokens(value: &str) -> Vec<String> {
    let stripped = strip_parenthetical(value).to_lowercase();
    separator_regex()
        .split(&stripped)
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|token| {
            token.len() >= 3
                && !token.chars().all(|c| c.is_ascii_digit())
                && !stopwords().contains(token.as_str())
        })
        .collect()
}

/// True when two family names share a token. If either side has no tokens
/// the trimmed, lowercased names must be equal.
pub fn families_overlap(a: &str, b: &str) -> bool {
    let a_tokens = family_tokens(a);
    let b_tokens = family_tokens(b);
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return a.trim().to_lowercase() == b.trim().to_lowercase();
    }
    a_tokens.iter().any(|token| b_tokens.contains(token))
}
