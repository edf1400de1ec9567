use tracing::debug;

use crate::grid::{row_cell, CellValue, Grid};
use crate::roster::coerce_count;
use crate::types::AggregateEntry;
use crate::utils::title_case;

const HEADER_ROWS: usize = 3;
const NAME_COL: usize = 0;
const ROLE_COL: usize = 2;
const TOTAL_APPS_COL: usize = 11;
const TOTAL_GOALS_COL: usize = 20;
const TOTAL_ASSISTS_COL: usize = 29;
const DEFAULT_ROLE: &str = "Player";

/// Hall of Fame rows from the all-time totals sheet. Rows without a numeric
/// appearance total (section headers, notes) are dropped.
pub fn extract_all_time(grid: &Grid) -> Vec<AggregateEntry> {
    let entries: Vec<AggregateEntry> = grid
        .rows()
        .iter()
        .skip(HEADER_ROWS)
        .filter_map(|row| to_entry(row))
        .collect();
    debug!("all_time: {} entries", entries.len());
    entries
}

fn to_entry(row: &[CellValue]) -> Option<AggregateEntry> {
    let name = row_cell(row, NAME_COL);
    if name.is_empty() {
        return None;
    }
    let total_apps = row_cell(row, TOTAL_APPS_COL).as_f64()?;

    let role = row_cell(row, ROLE_COL).text();
    let role = if role.is_empty() {
        DEFAULT_ROLE.to_string()
    } else {
        role
    };

    Some(AggregateEntry {
        name: title_case(&name.text()),
        role,
        total_apps: total_apps.trunc() as i64,
        total_goals: coerce_count(row_cell(row, TOTAL_GOALS_COL)),
        total_assists: coerce_count(row_cell(row, TOTAL_ASSISTS_COL)),
    })
}
