//! Spotify Web API snapshot source

mod auth;
mod client;
mod error;
mod model;

pub use auth::{Credentials, TokenCache};
pub use client::{Endpoints, SpotifyClient};
pub use error::SpotifyError;
pub use model::CurrentlyPlaying;
