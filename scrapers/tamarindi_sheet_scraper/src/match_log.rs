//! Match-log extraction.
//!
//! A season sheet lists fixtures top to bottom. A row whose first cell is a
//! date opens a fixture; the rows below it, up to the next date row, carry
//! that fixture's events (scorers, cards, saved penalties) in the column of
//! the club's side, plus an optional penalty-shootout marker. The scan is a
//! fold over the rows with an explicit accumulator.

use tracing::debug;

use crate::events::{classify_event, EventClass};
use crate::grid::{row_cell, CellValue, Grid};
use crate::seasons::{
    LayoutFamily, MatchColumns, ScoreCells, SeasonConfig, CLUB_KEYWORD, CLUB_NAME_VARIANTS,
};
use crate::types::{HomeStatus, MatchRecord, MatchResult, UNKNOWN_OPPONENT, UNKNOWN_SCORE};
use crate::utils::{
    last_score_pair, normalize_date_text, parse_score, remove_ignore_case,
    starts_with_ignore_case,
};

/// What a single row means to the scan.
#[derive(Debug, PartialEq)]
enum RowKind {
    MatchHeader { date: String },
    Shootout { text: String },
    Event { text: String },
}

#[derive(Debug, Default)]
struct ScanState {
    finished: Vec<MatchRecord>,
    current: Option<MatchRecord>,
}

impl ScanState {
    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            self.finished.push(record);
        }
    }

    fn finish(mut self) -> Vec<MatchRecord> {
        self.flush();
        self.finished
    }
}

pub struct MatchLogExtractor {
    season_key: String,
    columns: MatchColumns,
    layout: LayoutFamily,
}

impl MatchLogExtractor {
    pub fn new(season: &SeasonConfig) -> Self {
        Self::with_layout(season.key, season.layout)
    }

    pub fn with_layout(season_key: &str, layout: LayoutFamily) -> Self {
        Self {
            season_key: season_key.to_string(),
            columns: layout.columns(),
            layout,
        }
    }

    /// Scan the whole grid and return the season's complete fixtures in sheet order.
    pub fn extract(&self, grid: &Grid) -> Vec<MatchRecord> {
        let scanned = grid
            .rows()
            .iter()
            .fold(ScanState::default(), |state, row| self.step(state, row))
            .finish();

        let total = scanned.len();
        let matches: Vec<MatchRecord> = scanned.into_iter().filter(|m| m.is_complete()).collect();
        debug!(
            "{}: {} fixtures found, {} kept ({:?} layout)",
            self.season_key,
            total,
            matches.len(),
            self.layout
        );
        matches
    }

    fn step(&self, mut state: ScanState, row: &[CellValue]) -> ScanState {
        let in_match = state.current.as_ref().map(|m| m.home_status);

        match self.classify_row(row, in_match) {
            Some(RowKind::MatchHeader { date }) => {
                state.flush();
                state.current = Some(self.open_match(row, date));
            }
            Some(RowKind::Shootout { text }) => {
                if let Some(record) = state.current.as_mut() {
                    apply_shootout(record, &text);
                }
            }
            Some(RowKind::Event { text }) => {
                if let Some(record) = state.current.as_mut() {
                    record_event(record, classify_event(&text));
                }
            }
            None => {}
        }
        state
    }

    fn classify_row(&self, row: &[CellValue], in_match: Option<HomeStatus>) -> Option<RowKind> {
        if let Some(date) = match_date(row_cell(row, self.columns.date)) {
            return Some(RowKind::MatchHeader { date });
        }

        // Rows above the first fixture are headers or roster lines.
        let home_status = in_match?;

        let marker = row_cell(row, self.columns.shootout_marker).text();
        if is_shootout_marker(&marker) {
            return Some(RowKind::Shootout { text: marker });
        }

        let event_col = match home_status {
            HomeStatus::Home => self.columns.home_events,
            HomeStatus::Away => self.columns.away_events,
        };
        let text = row_cell(row, event_col).text();
        if text.is_empty() {
            return None;
        }
        Some(RowKind::Event { text })
    }

    fn open_match(&self, row: &[CellValue], date: String) -> MatchRecord {
        let home_label = row_cell(row, self.columns.home_label).text();
        let away_label = row_cell(row, self.columns.away_label).text();

        // Falls back to "away" when neither label names the club.
        let (home_status, opponent) = if is_club_label(&home_label) {
            (HomeStatus::Home, away_label)
        } else if is_club_label(&away_label) {
            (HomeStatus::Away, home_label)
        } else {
            (HomeStatus::Away, home_label)
        };

        let score = self.read_score(row);
        let result = parse_score(&score)
            .map(|(home, away)| match home_status {
                HomeStatus::Home => MatchResult::from_scores(home, away),
                HomeStatus::Away => MatchResult::from_scores(away, home),
            })
            .unwrap_or(MatchResult::Unknown);

        MatchRecord {
            date,
            opponent: clean_opponent(&opponent),
            score,
            result,
            home_status,
            scorers: Vec::new(),
            yellow_card_recipients: Vec::new(),
            red_card_recipients: Vec::new(),
            saved_penalty_goalkeepers: Vec::new(),
            shootout_score: None,
            season: self.season_key.clone(),
            video_id: None,
        }
    }

    fn read_score(&self, row: &[CellValue]) -> String {
        match self.columns.score {
            ScoreCells::Single(col) => {
                let cell = row_cell(row, col);
                if cell.is_empty() {
                    UNKNOWN_SCORE.to_string()
                } else {
                    cell.text()
                }
            }
            ScoreCells::Split { home, away } => {
                let (home, away) = (row_cell(row, home), row_cell(row, away));
                if home.is_empty() || away.is_empty() {
                    UNKNOWN_SCORE.to_string()
                } else {
                    format!("{}-{}", home.text(), away.text())
                }
            }
        }
    }
}

/// A fixture starts on a native date cell or on date-shaped text
/// (`YYYY-MM-DD…` / `YYYY/MM/DD…`).
fn match_date(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Date(dt) => Some(dt.format("%Y-%m-%d").to_string()),
        CellValue::Text(_) => {
            let text = cell.text();
            let looks_like_date = text.chars().count() >= 10
                && text.chars().take(4).all(|c| c.is_ascii_digit())
                && (text.contains('-') || text.contains('/'));
            looks_like_date.then(|| normalize_date_text(&text))
        }
        _ => None,
    }
}

fn is_club_label(label: &str) -> bool {
    CLUB_NAME_VARIANTS
        .iter()
        .any(|variant| starts_with_ignore_case(label, variant))
}

fn clean_opponent(raw: &str) -> String {
    let stripped = CLUB_NAME_VARIANTS
        .iter()
        .chain(std::iter::once(&CLUB_KEYWORD))
        .fold(raw.to_string(), |acc, name| remove_ignore_case(&acc, name));
    let stripped = stripped.trim();
    if stripped.is_empty() && raw.trim().is_empty() {
        UNKNOWN_OPPONENT.to_string()
    } else {
        stripped.to_string()
    }
}

fn is_shootout_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("dcr") || lower.contains("d.c.r")
}

/// Override the regulation result with the shootout outcome. The shootout
/// pair is the last `a-b` after the last `+` in the marker cell.
fn apply_shootout(record: &mut MatchRecord, text: &str) {
    record.shootout_score = Some(text.to_string());

    let tail = text.rsplit('+').next().unwrap_or(text);
    let Some((home, away)) = last_score_pair(tail) else {
        debug!("Unparseable shootout marker '{}' on {}", text, record.date);
        return;
    };

    let (club, opponent) = match record.home_status {
        HomeStatus::Home => (home, away),
        HomeStatus::Away => (away, home),
    };
    if club > opponent {
        record.result = MatchResult::ShootoutWin;
    } else if club < opponent {
        record.result = MatchResult::ShootoutLoss;
    }
}

fn record_event(record: &mut MatchRecord, event: EventClass) {
    match event {
        EventClass::SavedPenalty(name) => record.saved_penalty_goalkeepers.push(name),
        EventClass::RedCard(name) => record.red_card_recipients.push(name),
        EventClass::YellowCard(name) => record.yellow_card_recipients.push(name),
        EventClass::Goal(label) => record.scorers.push(label),
        EventClass::Skipped | EventClass::Unrecognized => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> CellValue {
        CellValue::text_value(s)
    }

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    /// Standard layout row: date | _ | home | _ | score | away
    fn header(d: CellValue, home: &str, score: &str, away: &str) -> Vec<CellValue> {
        vec![d, CellValue::Empty, t(home), CellValue::Empty, t(score), t(away)]
    }

    fn event(home_side: &str, marker: &str, away_side: &str) -> Vec<CellValue> {
        vec![
            CellValue::Empty,
            CellValue::Empty,
            t(home_side),
            CellValue::Empty,
            t(marker),
            t(away_side),
        ]
    }

    fn standard(rows: Vec<Vec<CellValue>>) -> Vec<MatchRecord> {
        MatchLogExtractor::with_layout("season_24_25", LayoutFamily::Standard)
            .extract(&Grid::from_rows(rows))
    }

    #[test]
    fn test_home_win_with_events() {
        let matches = standard(vec![
            vec![t("Nome"), CellValue::Empty, t("Squadra")],
            header(date(2024, 10, 5), "Tamarindi FC", "3-1", "Real Gnocchi"),
            event("ROSSI (2)", "", "Verdi"),
            event("BIANCHI [P]", "", ""),
            event("Neri [Y]", "", "Gialli [R]"),
            event("Tamarindi FC", "", ""),
        ]);

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.date, "2024-10-05");
        assert_eq!(m.opponent, "Real Gnocchi");
        assert_eq!(m.home_status, HomeStatus::Home);
        assert_eq!(m.result, MatchResult::Win);
        assert_eq!(m.scorers, vec!["Rossi (2)", "Bianchi (Pen)"]);
        assert_eq!(m.yellow_card_recipients, vec!["Neri"]);
        assert!(m.red_card_recipients.is_empty());
        assert_eq!(m.season, "season_24_25");
    }

    #[test]
    fn test_draw_and_away_loss() {
        let matches = standard(vec![
            header(date(2024, 10, 5), "Tamarindi F.C.", "1-1", "Lazio"),
            header(date(2024, 10, 12), "Roma", "2-0", "Tamarindi FC"),
            event("Totti", "", "Rossi [Y]"),
        ]);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].result, MatchResult::Draw);
        assert_eq!(matches[1].home_status, HomeStatus::Away);
        assert_eq!(matches[1].opponent, "Roma");
        assert_eq!(matches[1].result, MatchResult::Loss);
        // Only the club's side is read.
        assert!(matches[1].scorers.is_empty());
        assert_eq!(matches[1].yellow_card_recipients, vec!["Rossi"]);
    }

    #[test]
    fn test_unmatched_labels_fall_back_to_away() {
        let matches = standard(vec![header(
            date(2024, 11, 1),
            "Atletico Madrid",
            "0-2",
            "Tamarindi",
        )]);
        assert_eq!(matches[0].home_status, HomeStatus::Away);
        assert_eq!(matches[0].opponent, "Atletico Madrid");
        assert_eq!(matches[0].result, MatchResult::Win);
    }

    #[test]
    fn test_shootout_override() {
        let matches = standard(vec![
            header(date(2025, 1, 20), "Tamarindi FC", "0-0", "Sporting Pizza"),
            event("", "0-0 (dcr 4-3)", ""),
            event("Rossi [R PARATO]", "", ""),
        ]);

        let m = &matches[0];
        assert_eq!(m.result, MatchResult::ShootoutWin);
        assert_eq!(m.shootout_score.as_deref(), Some("0-0 (dcr 4-3)"));
        assert_eq!(m.saved_penalty_goalkeepers, vec!["Rossi"]);
        assert!(m.red_card_recipients.is_empty());
    }

    #[test]
    fn test_shootout_after_plus_away_loss() {
        let matches = standard(vec![
            header(date(2025, 2, 1), "Dinamo Kebab", "2-2", "Tamarindi FC"),
            event("", "2-2 d.c.r. + 5-4", ""),
        ]);
        assert_eq!(matches[0].result, MatchResult::ShootoutLoss);
    }

    #[test]
    fn test_unparseable_score_keeps_unknown_result() {
        let matches = standard(vec![header(date(2024, 9, 1), "Tamarindi FC", "rinviata", "Lazio")]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].result, MatchResult::Unknown);
    }

    #[test]
    fn test_incomplete_fixtures_are_dropped() {
        let matches = standard(vec![
            header(date(2024, 9, 1), "Tamarindi FC", "", "Lazio"),
            header(date(2024, 9, 8), "Tamarindi FC", "1-0", ""),
            header(date(2024, 9, 15), "Tamarindi FC", "1-0", "Tamarindi FC B"),
        ]);
        // Only the last one survives, with a stripped (non-empty) opponent.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opponent, "B");
    }

    #[test]
    fn test_string_dates_and_events_before_first_match() {
        let matches = standard(vec![
            event("Orphan Scorer", "", ""),
            header(t("2023-04-02 00:00:00"), "Tamarindi FC", "4-0", "Lazio"),
            header(t("2023/04/09"), "Tamarindi FC", "0-1", "Roma"),
        ]);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].date, "2023-04-02");
        assert!(matches[0].scorers.is_empty());
        assert_eq!(matches[1].date, "2023-04-09");
        assert_eq!(matches[1].result, MatchResult::Loss);
    }

    #[test]
    fn test_legacy_layout() {
        // date | _ | home | _ | home goals / home events | _ | away goals / away events | away
        let row = |cells: [CellValue; 8]| cells.to_vec();
        let e = || CellValue::Empty;
        let grid = Grid::from_rows(vec![
            row([date(2019, 11, 3), e(), t("Bar Sport"), e(), CellValue::Number(1.0), t("-"), CellValue::Number(2.0), t("Tamarindi F.C.")]),
            row([e(), e(), e(), e(), t("Scorer Home"), e(), t("ROSSI (2)"), e()]),
            row([e(), e(), e(), e(), e(), e(), t("Bianchi [Y]"), e()]),
            row([date(2019, 11, 10), e(), t("Tamarindi F.C."), e(), CellValue::Number(0.0), t("-"), e(), t("Osteria")]),
        ]);

        let matches = MatchLogExtractor::with_layout("season_19_20", LayoutFamily::Legacy2019).extract(&grid);
        // The second fixture has no away score and is dropped.
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.score, "1-2");
        assert_eq!(m.home_status, HomeStatus::Away);
        assert_eq!(m.opponent, "Bar Sport");
        assert_eq!(m.result, MatchResult::Win);
        assert_eq!(m.scorers, vec!["Rossi (2)"]);
        assert_eq!(m.yellow_card_recipients, vec!["Bianchi"]);
    }

    #[test]
    fn test_match_date_detection() {
        assert_eq!(match_date(&t("2024-05-01")), Some("2024-05-01".to_string()));
        assert_eq!(match_date(&t("Giornata 3")), None);
        assert_eq!(match_date(&t("2024")), None);
        assert_eq!(match_date(&CellValue::Number(45000.0)), None);
    }

    #[test]
    fn test_clean_opponent() {
        assert_eq!(clean_opponent("Tamarindi FC Academy"), "Academy");
        assert_eq!(clean_opponent("  Lazio "), "Lazio");
        assert_eq!(clean_opponent(""), UNKNOWN_OPPONENT);
    }
}
