
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpacewaysError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Referential error: {0}")]
    Referential(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Data corruption: {message}")]
    DataCorruption { message: String },
}

pub type Result<T> = std::result::Result<T, SpacewaysError>;

// Helper conversions
impl From<rusqlite::Error> for SpacewaysError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            // a stored value that no longer parses is corruption, not a
            // storage failure
            rusqlite::Error::FromSqlConversionFailure(_, _, source) => Self::DataCorruption {
                message: source.to_string(),
            },
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for SpacewaysError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
