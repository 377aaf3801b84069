//! YouTube Music search integration
//!
//! Resolves "title artist" queries to video ids that yt-dlp can download.

pub mod dto;
mod adapter;
mod client;

pub use client::YtMusicClient;
