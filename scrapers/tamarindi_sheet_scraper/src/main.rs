use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tamarindi_sheet_scraper::{
    config::BuildConfig,
    output::{to_pretty_json, write_document},
    seasons::{find_season, SEASONS},
    site_builder::SiteBuilder,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the website data document from every season workbook
    Build {
        /// Directory holding the season workbooks
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Where to write the JSON document
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Do not query YouTube for highlight videos
        #[arg(long)]
        skip_videos: bool,
    },
    /// Print one season's match log as JSON
    Matches {
        /// Season key, e.g. season_24_25
        #[arg(short, long)]
        season: String,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = BuildConfig::from_env();

    match cli.command {
        Commands::Build {
            data_dir,
            output,
            skip_videos,
        } => {
            if let Some(dir) = data_dir {
                config.paths.data_dir = dir;
            }
            if let Some(file) = output {
                config.paths.output_file = file;
            }
            info!("Reading workbooks from {:?}", config.paths.data_dir);

            let data = SiteBuilder::new(&config).build(!skip_videos);
            write_document(&data, &config.paths.output_file)
                .context("Failed to write site data")?;
        }
        Commands::Matches { season, data_dir } => {
            if let Some(dir) = data_dir {
                config.paths.data_dir = dir;
            }
            let season = find_season(&season).with_context(|| {
                let keys: Vec<_> = SEASONS.iter().map(|s| s.key).collect();
                format!("Unknown season '{}', expected one of {}", season, keys.join(", "))
            })?;

            let matches = SiteBuilder::new(&config).season_matches(season)?;
            println!("{}", String::from_utf8(to_pretty_json(&matches)?)?);
        }
    }

    Ok(())
}
