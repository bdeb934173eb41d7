use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlaylogError>;
