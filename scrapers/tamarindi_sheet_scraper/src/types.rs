use serde::{Deserialize, Serialize};

pub const UNKNOWN_OPPONENT: &str = "Unknown";
pub const UNKNOWN_SCORE: &str = "?-?";
pub const MISSING_STAT: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeStatus {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "W(SO)")]
    ShootoutWin,
    #[serde(rename = "L(SO)")]
    ShootoutLoss,
    #[serde(rename = "?")]
    Unknown,
}

impl MatchResult {
    pub fn from_scores(club: u32, opponent: u32) -> Self {
        match club.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub date: String,
    pub opponent: String,
    pub score: String,
    pub result: MatchResult,
    pub home_status: HomeStatus,
    pub scorers: Vec<String>,
    pub yellow_card_recipients: Vec<String>,
    pub red_card_recipients: Vec<String>,
    pub saved_penalty_goalkeepers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shootout_score: Option<String>,
    pub season: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl MatchRecord {
    pub fn is_complete(&self) -> bool {
        !self.opponent.is_empty()
            && self.opponent != UNKNOWN_OPPONENT
            && self.score != UNKNOWN_SCORE
            && self.score != "?"
    }
}

/// A roster stat column: an integer, or `"-"` when the season never tracked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Count(i64),
    Missing,
}

impl Serialize for StatValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Count(n) => serializer.serialize_i64(*n),
            StatValue::Missing => serializer.serialize_str(MISSING_STAT),
        }
    }
}

impl<'de> Deserialize<'de> for StatValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(StatValue::Count)
                .ok_or_else(|| serde::de::Error::custom(format!("expected integer, got {}", n))),
            serde_json::Value::String(s) if s == MISSING_STAT => Ok(StatValue::Missing),
            other => Err(serde::de::Error::custom(format!(
                "expected integer or \"-\", got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub number: String,
    pub apps: StatValue,
    pub goals: StatValue,
    pub assists: StatValue,
    pub yellow_cards: StatValue,
    pub red_cards: StatValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub name: String,
    pub role: String,
    pub total_apps: i64,
    pub total_goals: i64,
    pub total_assists: i64,
}
