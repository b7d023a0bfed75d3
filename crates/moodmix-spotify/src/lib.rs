//! Adapter del catálogo y del publicador sobre la Web API de Spotify.

mod client;
mod config;
mod dto;
mod error;

pub use client::SpotifyClient;
pub use config::{SpotifyConfig, TOKEN_ENV};
pub use error::SpotifyError;
