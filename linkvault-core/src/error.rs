use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid '{name}' pattern: {source}")]
    Pattern {
        name: &'static str,
        source: regex::Error,
    },

    #[error("invalid parameter type for '{param}': {value}")]
    InvalidParameterType {
        param: &'static str,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
