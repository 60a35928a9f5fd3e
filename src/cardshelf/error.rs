use thiserror::Error;

/// Message shown when a required card field is blank.
pub const FILL_ALL_FIELDS: &str = "Please fill out all fields.";

#[derive(Error, Debug)]
pub enum CardsError {
    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CardsError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CardsError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CardsError>;
