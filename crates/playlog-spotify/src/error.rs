use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Please set {} environment variables.", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Token cache error: {0}")]
    TokenCache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
