use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open workbook {path:?}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook {0:?} has no worksheets")]
    NoWorksheet(PathBuf),
}

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Channel {0} has no uploads playlist")]
    NoUploadsPlaylist(String),

    #[error("Invalid publish timestamp '{0}'")]
    Timestamp(String),

    #[error("Invalid requests_per_second value: {0}")]
    RateLimit(u32),
}
