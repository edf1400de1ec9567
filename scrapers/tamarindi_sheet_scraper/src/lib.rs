pub mod all_time;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod match_log;
pub mod output;
pub mod roster;
pub mod seasons;
pub mod site_builder;
pub mod types;
pub mod utils;
pub mod video_linker;
