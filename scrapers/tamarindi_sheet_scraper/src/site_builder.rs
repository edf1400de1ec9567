use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::{
    all_time::extract_all_time,
    config::BuildConfig,
    grid::{load_grid, Grid},
    match_log::MatchLogExtractor,
    roster::RosterExtractor,
    seasons::{SeasonConfig, ALL_TIME_FILENAME, SEASONS},
    types::{AggregateEntry, MatchRecord, RosterEntry},
    video_linker::enrich_with_videos,
};

/// The website document. Serializes as one map: every season key in
/// declared order, then `all_time`, then `matches`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteData {
    pub seasons: Vec<(String, Vec<RosterEntry>)>,
    pub all_time: Vec<AggregateEntry>,
    pub matches: Vec<MatchRecord>,
}

impl SiteData {
    pub fn roster(&self, season_key: &str) -> Option<&[RosterEntry]> {
        self.seasons
            .iter()
            .find(|(key, _)| key == season_key)
            .map(|(_, roster)| roster.as_slice())
    }
}

impl Serialize for SiteData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.seasons.len() + 2))?;
        for (key, roster) in &self.seasons {
            map.serialize_entry(key, roster)?;
        }
        map.serialize_entry("all_time", &self.all_time)?;
        map.serialize_entry("matches", &self.matches)?;
        map.end()
    }
}

pub struct SiteBuilder<'a> {
    config: &'a BuildConfig,
    seasons: &'a [SeasonConfig],
}

impl<'a> SiteBuilder<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
            seasons: SEASONS,
        }
    }

    fn data_path(&self, filename: &str) -> PathBuf {
        self.config.paths.data_dir.join(filename)
    }

    /// Never fails: unreadable inputs degrade to empty collections.
    pub fn build(&self, fetch_videos: bool) -> SiteData {
        let mut data = SiteData::default();

        for season in self.seasons {
            let (roster, matches) = match self.process_season(season) {
                Ok(extracted) => extracted,
                Err(e) => {
                    error!("Error processing {}: {:#}", season.key, e);
                    (Vec::new(), Vec::new())
                }
            };
            info!(
                "{}: {} players, {} matches",
                season.key,
                roster.len(),
                matches.len()
            );
            data.seasons.push((season.key.to_string(), roster));
            data.matches.extend(matches);
        }

        data.all_time = match self.process_all_time() {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error processing all-time stats: {:#}", e);
                Vec::new()
            }
        };

        if fetch_videos {
            enrich_with_videos(&mut data.matches, self.config);
        } else {
            warn!("Video linking disabled, skipping video fetch");
        }

        sort_matches(&mut data.matches);
        info!(
            "Built site data: {} seasons, {} all-time entries, {} matches",
            data.seasons.len(),
            data.all_time.len(),
            data.matches.len()
        );
        data
    }

    fn process_season(&self, season: &SeasonConfig) -> Result<(Vec<RosterEntry>, Vec<MatchRecord>)> {
        let Some(grid) = load_optional(&self.data_path(season.filename))? else {
            return Ok((Vec::new(), Vec::new()));
        };
        let roster = RosterExtractor::new(season).extract(&grid);
        let matches = MatchLogExtractor::new(season).extract(&grid);
        Ok((roster, matches))
    }

    fn process_all_time(&self) -> Result<Vec<AggregateEntry>> {
        Ok(load_optional(&self.data_path(ALL_TIME_FILENAME))?
            .map(|grid| extract_all_time(&grid))
            .unwrap_or_default())
    }

    /// Match log of a single season. A missing file is an error here.
    pub fn season_matches(&self, season: &SeasonConfig) -> Result<Vec<MatchRecord>> {
        let path = self.data_path(season.filename);
        let grid = load_grid(&path).with_context(|| format!("Failed to load {}", season.key))?;
        Ok(MatchLogExtractor::new(season).extract(&grid))
    }
}

fn load_optional(path: &Path) -> Result<Option<Grid>> {
    if !path.exists() {
        info!("{:?} not found, skipping", path);
        return Ok(None);
    }
    let grid = load_grid(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(Some(grid))
}

/// Newest first. Stable, so equal dates keep season then sheet order.
pub fn sort_matches(matches: &mut [MatchRecord]) {
    matches.sort_by(|a, b| b.date.cmp(&a.date));
}
