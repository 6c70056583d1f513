//! Spotify Web API integration
//!
//! Client-credentials authentication plus batch track lookups.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod auth;
mod client;

pub use auth::{DEFAULT_TOKEN_URL, SpotifyAuthClient};
pub use client::{DEFAULT_TRACKS_URL, SpotifyCatalogClient};

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
