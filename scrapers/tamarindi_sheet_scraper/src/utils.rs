use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn score_pair_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("valid score regex"))
}

/// Parse a strict `"<int>-<int>"` score.
pub fn parse_score(score: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = score.split('-').collect();
    if parts.len() != 2 {
        anyhow::bail!("Invalid score format: {}", score);
    }

    let home = parse_goals(parts[0]).with_context(|| format!("Invalid home score: {}", parts[0]))?;
    let away = parse_goals(parts[1]).with_context(|| format!("Invalid away score: {}", parts[1]))?;

    Ok((home, away))
}

fn parse_goals(part: &str) -> Result<u32> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("not a number");
    }
    Ok(part.parse::<u32>()?)
}

/// The last `<int>-<int>` pair in a free-text cell, e.g. `"0-0 (dcr 4-3)"` -> `(4, 3)`.
pub fn last_score_pair(text: &str) -> Option<(u32, u32)> {
    score_pair_regex()
        .captures_iter(text)
        .last()
        .and_then(|cap| Some((cap[1].parse().ok()?, cap[2].parse().ok()?)))
}

/// Title-case the way the club's spreadsheets are normalized: every run of
/// letters starts upper-case and continues lower-case, so `"D'ANGELO (2)"`
/// becomes `"D'Angelo (2)"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a date-shaped cell text to `YYYY-MM-DD`. Anything after the first
/// space (a rendered time of day) is dropped; unparseable text is returned
/// as-is so the row still sorts roughly where it belongs.
pub fn normalize_date_text(text: &str) -> String {
    let date_part = text.trim().split(' ').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| date_part.to_string())
}

/// Remove every occurrence of `needle`, ignoring ASCII case.
pub fn remove_ignore_case(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let lower_haystack = haystack.to_ascii_lowercase();
    let lower_needle = needle.to_ascii_lowercase();

    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (idx, _) in lower_haystack.match_indices(&lower_needle) {
        out.push_str(&haystack[last..idx]);
        last = idx + needle.len();
    }
    out.push_str(&haystack[last..]);
    out
}

pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}
