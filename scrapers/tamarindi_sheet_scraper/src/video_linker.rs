use chrono::{DateTime, NaiveDate, Utc};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::{num::NonZeroU32, thread, time::Duration};
use tracing::{debug, info, warn};

use crate::config::{BuildConfig, VideoConfig};
use crate::error::VideoError;
use crate::types::MatchRecord;

const PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub title: String,
    pub video_id: String,
    pub published_at: DateTime<Utc>,
}

/// Anything that can list a channel's uploads, newest first.
pub trait VideoSource {
    fn list_videos(&self, channel_id: &str, since: NaiveDate) -> Result<Vec<Video>, VideoError>;
}

#[derive(Debug, Deserialize)]
struct ChannelList {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItems {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    published_at: String,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

/// YouTube Data API v3 client over a blocking, rate-limited HTTP client.
pub struct YouTubeClient {
    client: reqwest::blocking::Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(config: &BuildConfig, api_key: &str) -> Result<Self, VideoError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(Duration::from_secs(config.scraping.request_timeout_secs))
            .build()?;

        let rps = config.rate_limits.requests_per_second;
        let quota = Quota::per_second(NonZeroU32::new(rps).ok_or(VideoError::RateLimit(rps))?);

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
            base_url: config.video.api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn wait_for_permit(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, VideoError> {
        self.wait_for_permit();

        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VideoError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>()?)
    }

    fn uploads_playlist(&self, channel_id: &str) -> Result<String, VideoError> {
        let channels: ChannelList =
            self.get_json("channels", &[("part", "contentDetails"), ("id", channel_id)])?;
        channels
            .items
            .into_iter()
            .next()
            .map(|c| c.content_details.related_playlists.uploads)
            .ok_or_else(|| VideoError::NoUploadsPlaylist(channel_id.to_string()))
    }
}

impl VideoSource for YouTubeClient {
    fn list_videos(&self, channel_id: &str, since: NaiveDate) -> Result<Vec<Video>, VideoError> {
        let playlist_id = self.uploads_playlist(channel_id)?;
        info!("Listing uploads of playlist {}", playlist_id);

        let page_size = PAGE_SIZE.to_string();
        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_number = 1;

        'pages: loop {
            let mut query = vec![
                ("part", "snippet"),
                ("maxResults", page_size.as_str()),
                ("playlistId", playlist_id.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }
            let page: PlaylistItems = self.get_json("playlistItems", &query)?;
            debug!("Page {}: {} items", page_number, page.items.len());

            for item in page.items {
                let published_at = DateTime::parse_from_rfc3339(&item.snippet.published_at)
                    .map_err(|_| VideoError::Timestamp(item.snippet.published_at.clone()))?
                    .with_timezone(&Utc);

                // Uploads come newest first.
                if published_at.date_naive() < since {
                    break 'pages;
                }
                videos.push(Video {
                    title: item.snippet.title,
                    video_id: item.snippet.resource_id.video_id,
                    published_at,
                });
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
            page_number += 1;
        }

        Ok(videos)
    }
}

fn normalize_title(title: &str) -> String {
    title.to_lowercase().replace(' ', "")
}

/// Attach the first video published within the date window whose title
/// contains a keyword. Returns how many matches got a video.
pub fn link_videos(matches: &mut [MatchRecord], videos: &[Video], config: &VideoConfig) -> usize {
    let titles: Vec<String> = videos.iter().map(|v| normalize_title(&v.title)).collect();
    let mut linked = 0;

    for record in matches.iter_mut() {
        let Ok(match_date) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
            continue;
        };

        let hit = videos.iter().zip(&titles).find(|(video, title)| {
            let delta = (video.published_at.date_naive() - match_date).num_days().abs();
            delta <= config.window_days
                && config.title_keywords.iter().any(|k| title.contains(k.as_str()))
        });

        if let Some((video, _)) = hit {
            debug!("{} vs {} -> {}", record.date, record.opponent, video.video_id);
            record.video_id = Some(video.video_id.clone());
            linked += 1;
        }
    }
    linked
}

/// Best-effort enrichment: never fails the build.
pub fn enrich_with_videos(matches: &mut [MatchRecord], config: &BuildConfig) {
    let Some((api_key, channel_id)) = config.video.credentials() else {
        warn!("YOUTUBE_API_KEY or TORNEICONTI_CHANNEL_ID not set, skipping video fetch");
        return;
    };

    let client = match YouTubeClient::new(config, api_key) {
        Ok(client) => client,
        Err(e) => {
            warn!("Could not create YouTube client, skipping video fetch: {}", e);
            return;
        }
    };
    enrich_from_source(matches, &client, channel_id, &config.video);
}

pub fn enrich_from_source<S: VideoSource>(
    matches: &mut [MatchRecord],
    source: &S,
    channel_id: &str,
    config: &VideoConfig,
) {
    match source.list_videos(channel_id, config.since) {
        Ok(videos) => {
            info!("Found {} potential videos. Linking to matches...", videos.len());
            let linked = link_videos(matches, &videos, config);
            info!("Linked {} matches to highlight videos", linked);
        }
        Err(e) => warn!("Video fetch failed, matches left without videos: {}", e),
    }
}
