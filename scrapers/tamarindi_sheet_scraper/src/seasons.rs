//! Static per-season sheet layouts.

/// Spellings of the club's own name found in the team-label cells.
pub const CLUB_NAME_VARIANTS: &[&str] = &["Tamarindi F.C.", "Tamarindi FC"];

/// Bare club word, stripped from opponent names after the full spellings.
pub const CLUB_KEYWORD: &str = "Tamarindi";

/// Event cells containing any of these are team or competition labels.
pub const EVENT_SKIP_WORDS: &[&str] = &[CLUB_KEYWORD, "FC", "Club", "Torneo"];

pub const ALL_TIME_FILENAME: &str = "STATS TOTALI.xlsx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterField {
    Name,
    Number,
    Apps,
    Goals,
    Assists,
    YellowCards,
    RedCards,
}

/// Where a match header keeps its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCells {
    /// One `"h-a"` text cell.
    Single(usize),
    /// Home and away goals in separate cells.
    Split { home: usize, away: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchColumns {
    pub date: usize,
    pub home_label: usize,
    pub away_label: usize,
    pub score: ScoreCells,
    pub home_events: usize,
    pub away_events: usize,
    pub shootout_marker: usize,
}

/// Column conventions of the match log. 2019-20 is the only legacy sheet:
/// it splits the score over two cells and keeps player events under them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFamily {
    Standard,
    Legacy2019,
}

impl LayoutFamily {
    pub const fn columns(self) -> MatchColumns {
        match self {
            LayoutFamily::Standard => MatchColumns {
                date: 0,
                home_label: 2,
                away_label: 5,
                score: ScoreCells::Single(4),
                home_events: 2,
                away_events: 5,
                shootout_marker: 4,
            },
            LayoutFamily::Legacy2019 => MatchColumns {
                date: 0,
                home_label: 2,
                away_label: 7,
                score: ScoreCells::Split { home: 4, away: 6 },
                home_events: 4,
                away_events: 6,
                shootout_marker: 4,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonConfig {
    pub key: &'static str,
    pub filename: &'static str,
    /// Header rows above the first roster line.
    pub skip: usize,
    pub columns: &'static [(usize, RosterField)],
    pub layout: LayoutFamily,
}

impl SeasonConfig {
    pub fn column_of(&self, field: RosterField) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, f)| *f == field)
            .map(|(col, _)| *col)
    }
}

use RosterField::*;

const COLS_23_TO_26: &[(usize, RosterField)] = &[
    (0, Name),
    (3, Number),
    (6, Apps),
    (12, Goals),
    (18, Assists),
    (21, YellowCards),
    (22, RedCards),
];

const COLS_22_23: &[(usize, RosterField)] = &[
    (0, Name),
    (3, Number),
    (6, Apps),
    (11, Goals),
    (18, Assists),
    (21, YellowCards),
    (22, RedCards),
];

const COLS_21_22: &[(usize, RosterField)] = &[
    (0, Name),
    (3, Number),
    (6, Apps),
    (11, Goals),
    (16, Assists),
    (19, YellowCards),
    (20, RedCards),
];

const COLS_20_21: &[(usize, RosterField)] = &[
    (0, Name),
    (3, Number),
    (7, Apps),
    (12, Goals),
    (14, Assists),
    (17, YellowCards),
    (18, RedCards),
];

// No assists column in 2019-20.
const COLS_19_20: &[(usize, RosterField)] = &[
    (0, Name),
    (3, Number),
    (7, Apps),
    (9, Goals),
    (12, YellowCards),
    (13, RedCards),
];

/// Every known season, newest first.
pub const SEASONS: &[SeasonConfig] = &[
    SeasonConfig {
        key: "season_25_26",
        filename: "STATS 25-26.xlsx",
        skip: 3,
        columns: COLS_23_TO_26,
        layout: LayoutFamily::Standard,
    },
    SeasonConfig {
        key: "season_24_25",
        filename: "STATS 24-25.xlsx",
        skip: 3,
        columns: COLS_23_TO_26,
        layout: LayoutFamily::Standard,
    },
    SeasonConfig {
        key: "season_23_24",
        filename: "STATS 23-24.xlsx",
        skip: 3,
        columns: COLS_23_TO_26,
        layout: LayoutFamily::Standard,
    },
    SeasonConfig {
        key: "season_22_23",
        filename: "STATS 2022-23.xlsx",
        skip: 3,
        columns: COLS_22_23,
        layout: LayoutFamily::Standard,
    },
    SeasonConfig {
        key: "season_21_22",
        filename: "STATS 2021-22.xlsx",
        skip: 3,
        columns: COLS_21_22,
        layout: LayoutFamily::Standard,
    },
    SeasonConfig {
        key: "season_20_21",
        filename: "Rosa e Stats 2020-2021.xlsx",
        skip: 7,
        columns: COLS_20_21,
        layout: LayoutFamily::Standard,
    },
    SeasonConfig {
        key: "season_19_20",
        filename: "statistiche calci8 2019-2020.xlsx",
        skip: 4,
        columns: COLS_19_20,
        layout: LayoutFamily::Legacy2019,
    },
];

pub fn find_season(key: &str) -> Option<&'static SeasonConfig> {
    SEASONS.iter().find(|s| s.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_2019_20_is_legacy() {
        let legacy: Vec<_> = SEASONS
            .iter()
            .filter(|s| s.layout == LayoutFamily::Legacy2019)
            .map(|s| s.key)
            .collect();
        assert_eq!(legacy, vec!["season_19_20"]);
    }

    #[test]
    fn test_seasons_declared_newest_first() {
        let keys: Vec<_> = SEASONS.iter().map(|s| s.key).collect();
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_column_lookup() {
        let season = find_season("season_21_22").unwrap();
        assert_eq!(season.column_of(Assists), Some(16));
        let legacy = find_season("season_19_20").unwrap();
        assert_eq!(legacy.column_of(Assists), None);
        assert_eq!(legacy.column_of(Goals), Some(9));
        assert!(find_season("season_18_19").is_none());
    }

    #[test]
    fn test_layout_columns() {
        let standard = LayoutFamily::Standard.columns();
        assert_eq!(standard.score, ScoreCells::Single(4));
        assert_eq!((standard.home_events, standard.away_events), (2, 5));

        let legacy = LayoutFamily::Legacy2019.columns();
        assert_eq!(legacy.score, ScoreCells::Split { home: 4, away: 6 });
        assert_eq!(legacy.away_label, 7);
        assert_eq!((legacy.home_events, legacy.away_events), (4, 6));
    }
}
