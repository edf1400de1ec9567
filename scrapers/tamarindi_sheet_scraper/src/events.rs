use regex::Regex;
use std::sync::OnceLock;

use crate::seasons::EVENT_SKIP_WORDS;
use crate::utils::{collapse_whitespace, title_case};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SavedPenalty,
    RedCard,
    YellowCard,
    PenaltyGoal,
}

/// Outcome of classifying one event cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventClass {
    SavedPenalty(String),
    RedCard(String),
    YellowCard(String),
    /// Scorer label, already suffixed with `" (Pen)"` for penalties.
    Goal(String),
    /// Team or competition label.
    Skipped,
    Unrecognized,
}

struct MarkerRule {
    kind: EventKind,
    /// Upper-case substrings that trigger the rule.
    triggers: &'static [&'static str],
    /// Upper-case substrings removed to leave the player name.
    strip: &'static [&'static str],
}

// Most specific first: a saved-penalty cell also contains an "R".
const MARKER_RULES: &[MarkerRule] = &[
    MarkerRule {
        kind: EventKind::SavedPenalty,
        triggers: &["R PARATO"],
        strip: &["[R PARATO]", "(R PARATO)", "R PARATO"],
    },
    MarkerRule {
        kind: EventKind::RedCard,
        triggers: &["[R]", "(R)"],
        strip: &["[R]", "(R)"],
    },
    MarkerRule {
        kind: EventKind::YellowCard,
        triggers: &["[Y]", "(Y)"],
        strip: &["[Y]", "(Y)"],
    },
    MarkerRule {
        kind: EventKind::PenaltyGoal,
        triggers: &["[P]", "(P)"],
        strip: &["[P]", "(P)"],
    },
];

fn goal_count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\d+\)").expect("valid goal count regex"))
}

impl MarkerRule {
    fn matches(&self, upper: &str) -> bool {
        self.triggers.iter().any(|t| upper.contains(t))
    }

    fn classify(&self, upper: &str) -> EventClass {
        let name = self
            .strip
            .iter()
            .fold(upper.to_string(), |acc, marker| acc.replace(marker, ""));
        let name = title_case(collapse_whitespace(&name).as_str());
        if name.is_empty() {
            return EventClass::Unrecognized;
        }
        match self.kind {
            EventKind::SavedPenalty => EventClass::SavedPenalty(name),
            EventKind::RedCard => EventClass::RedCard(name),
            EventKind::YellowCard => EventClass::YellowCard(name),
            EventKind::PenaltyGoal => EventClass::Goal(format!("{} (Pen)", name)),
        }
    }
}

/// A plain goal needs a goal-count annotation like `(2)` or a leading letter.
fn classify_plain_goal(cleaned: &str) -> EventClass {
    let label = title_case(cleaned);
    let starts_with_letter = label.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if goal_count_regex().is_match(&label) || starts_with_letter {
        EventClass::Goal(label)
    } else {
        EventClass::Unrecognized
    }
}

/// Classify the text of one event cell.
pub fn classify_event(raw: &str) -> EventClass {
    let cleaned = collapse_whitespace(raw);
    if cleaned.is_empty() {
        return EventClass::Skipped;
    }
    if EVENT_SKIP_WORDS.iter().any(|w| cleaned.contains(w)) {
        return EventClass::Skipped;
    }

    let upper = cleaned.to_uppercase();
    MARKER_RULES
        .iter()
        .find(|rule| rule.matches(&upper))
        .map(|rule| rule.classify(&upper))
        .unwrap_or_else(|| classify_plain_goal(&cleaned))
}
