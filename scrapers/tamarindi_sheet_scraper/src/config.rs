use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_file: PathBuf::from("data/website_data_cache.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoConfig {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
    pub api_base_url: String,
    /// Max days between match date and publish date.
    pub window_days: i64,
    /// Uploads older than this are never fetched.
    pub since: NaiveDate,
    pub title_keywords: Vec<String>,
}

impl VideoConfig {
    /// Both credentials, or `None` when the video step must be skipped.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.channel_id.as_deref()) {
            (Some(key), Some(channel)) if !key.is_empty() && !channel.is_empty() => {
                Some((key, channel))
            }
            _ => None,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            channel_id: None,
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            window_days: 1,
            since: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap_or(NaiveDate::MIN),
            title_keywords: vec!["tamarindi".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimits {
    pub requests_per_second: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            requests_per_second: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; TamarindiStats/1.0)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    pub paths: PathsConfig,
    pub video: VideoConfig,
    pub rate_limits: RateLimits,
    pub scraping: ScrapingConfig,
}

impl BuildConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("DATA_DIR") {
            config.paths.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("OUTPUT_FILE") {
            config.paths.output_file = PathBuf::from(file);
        }

        config.video.api_key = lookup("YOUTUBE_API_KEY").filter(|v| !v.trim().is_empty());
        config.video.channel_id = lookup("TORNEICONTI_CHANNEL_ID").filter(|v| !v.trim().is_empty());
        if let Some(url) = lookup("YOUTUBE_API_BASE_URL") {
            config.video.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(days) = lookup("VIDEO_DATE_WINDOW_DAYS").and_then(|d| d.parse::<i64>().ok()) {
            config.video.window_days = days;
        }
        if let Some(since) = lookup("VIDEO_SINCE")
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        {
            config.video.since = since;
        }
        if let Some(keywords) = lookup("VIDEO_TITLE_KEYWORDS") {
            let keywords: Vec<String> = keywords
                .split(',')
                .map(|k| k.trim().to_lowercase().replace(' ', ""))
                .filter(|k| !k.is_empty())
                .collect();
            if !keywords.is_empty() {
                config.video.title_keywords = keywords;
            }
        }

        if let Some(rps) = lookup("RATE_LIMIT_RPS").and_then(|r| r.parse::<u32>().ok()) {
            config.rate_limits.requests_per_second = rps;
        }
        if let Some(user_agent) = lookup("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = lookup("SCRAPER_TIMEOUT_SECS").and_then(|t| t.parse::<u64>().ok()) {
            config.scraping.request_timeout_secs = timeout;
        }

        config
    }
}
