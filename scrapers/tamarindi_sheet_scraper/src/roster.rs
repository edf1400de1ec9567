use tracing::debug;

use crate::grid::{row_cell, CellValue, Grid};
use crate::seasons::{RosterField, SeasonConfig};
use crate::types::{RosterEntry, StatValue, MISSING_STAT};
use crate::utils::title_case;

/// Name fragments that mark competition headers and team rows rather than players.
const NON_PLAYER_WORDS: &[&str] = &[
    "Amichevoli",
    "Torneo",
    "Spring",
    "Cup",
    "Coppa",
    "Playoff",
    "Playout",
    "Gironi",
    "Ottavi",
    "Quarti",
    "Semifinale",
    "Finale",
    "Tamarindi",
];

pub struct RosterExtractor<'a> {
    season: &'a SeasonConfig,
}

impl<'a> RosterExtractor<'a> {
    pub fn new(season: &'a SeasonConfig) -> Self {
        Self { season }
    }

    pub fn extract(&self, grid: &Grid) -> Vec<RosterEntry> {
        let players: Vec<RosterEntry> = grid
            .rows()
            .iter()
            .skip(self.season.skip)
            .filter(|row| self.is_real_player(row))
            .map(|row| self.to_entry(row))
            .collect();
        debug!("{}: {} roster entries", self.season.key, players.len());
        players
    }

    fn field<'r>(&self, row: &'r [CellValue], field: RosterField) -> Option<&'r CellValue> {
        self.season.column_of(field).map(|col| row_cell(row, col))
    }

    fn is_real_player(&self, row: &[CellValue]) -> bool {
        let Some(name_cell) = self.field(row, RosterField::Name) else {
            return false;
        };
        if name_cell.is_empty() {
            return false;
        }

        // Fixture rows start with a date in the name column.
        let name = name_cell.text();
        if ["200", "201", "202"].iter().any(|p| name.starts_with(p)) {
            return false;
        }
        if NON_PLAYER_WORDS.iter().any(|w| name.contains(w)) {
            return false;
        }

        self.field(row, RosterField::Apps)
            .is_some_and(|apps| !apps.is_empty())
    }

    fn to_entry(&self, row: &[CellValue]) -> RosterEntry {
        let name = self
            .field(row, RosterField::Name)
            .map(|c| title_case(&c.text()))
            .unwrap_or_default();

        let number = match self.field(row, RosterField::Number) {
            Some(cell) if !cell.is_empty() => cell.text().replace(".0", ""),
            _ => MISSING_STAT.to_string(),
        };

        RosterEntry {
            name,
            number,
            apps: self.stat(row, RosterField::Apps),
            goals: self.stat(row, RosterField::Goals),
            assists: self.stat(row, RosterField::Assists),
            yellow_cards: self.stat(row, RosterField::YellowCards),
            red_cards: self.stat(row, RosterField::RedCards),
        }
    }

    /// Untracked assists render as `"-"`; any other absent or non-numeric stat is 0.
    fn stat(&self, row: &[CellValue], field: RosterField) -> StatValue {
        match self.field(row, field) {
            Some(cell) => StatValue::Count(coerce_count(cell)),
            None if field == RosterField::Assists => StatValue::Missing,
            None => StatValue::Count(0),
        }
    }
}

pub(crate) fn coerce_count(cell: &CellValue) -> i64 {
    cell.as_f64().map(|n| n.trunc() as i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seasons::find_season;
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> CellValue {
        CellValue::text_value(s)
    }

    fn n(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn padded(cells: &[(usize, CellValue)], width: usize) -> Vec<CellValue> {
        let mut row = vec![CellValue::Empty; width];
        for (col, value) in cells {
            row[*col] = value.clone();
        }
        row
    }

    #[test]
    fn test_standard_season_roster() {
        let season = find_season("season_24_25").unwrap();
        let grid = Grid::from_rows(vec![
            vec![t("ROSA")],
            vec![t("")],
            vec![t("Nome"), CellValue::Empty, CellValue::Empty, t("N")],
            padded(
                &[(0, t("MARIO ROSSI")), (3, n(10.0)), (6, n(12.0)), (12, n(7.0)), (18, n(3.0)), (21, n(2.0)), (22, n(0.0))],
                23,
            ),
            padded(&[(0, t("Luigi Verdi")), (6, t("5")), (12, t("x"))], 23),
            padded(&[(0, t("Torneo Primavera")), (6, n(1.0))], 23),
            padded(&[(0, t("2024-10-05 00:00:00")), (6, n(1.0))], 23),
            padded(&[(0, t("Panchina")), (3, n(99.0))], 23),
        ]);

        let roster = RosterExtractor::new(season).extract(&grid);
        assert_eq!(roster.len(), 2);
        assert_eq!(
            roster[0],
            RosterEntry {
                name: "Mario Rossi".to_string(),
                number: "10".to_string(),
                apps: StatValue::Count(12),
                goals: StatValue::Count(7),
                assists: StatValue::Count(3),
                yellow_cards: StatValue::Count(2),
                red_cards: StatValue::Count(0),
            }
        );
        assert_eq!(roster[1].number, "-");
        assert_eq!(roster[1].apps, StatValue::Count(5));
        assert_eq!(roster[1].goals, StatValue::Count(0));
    }

    #[test]
    fn test_season_without_assists() {
        let season = find_season("season_19_20").unwrap();
        let mut rows = vec![vec![CellValue::Empty]; season.skip];
        rows.push(padded(&[(0, t("Rossi")), (3, n(1.0)), (7, n(20.0)), (9, n(11.0))], 14));
        rows.push(padded(&[(0, t("Bianchi")), (3, n(2.0)), (7, n(18.0)), (12, n(1.0))], 14));

        let roster = RosterExtractor::new(season).extract(&Grid::from_rows(rows));
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|p| p.assists == StatValue::Missing));
        assert_eq!(roster[1].yellow_cards, StatValue::Count(1));
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(&n(2.7)), 2);
        assert_eq!(coerce_count(&t("4")), 4);
        assert_eq!(coerce_count(&t("-")), 0);
        assert_eq!(coerce_count(&CellValue::Empty), 0);
    }
}
