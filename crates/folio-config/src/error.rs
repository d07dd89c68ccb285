//! Errors raised while loading `FolioConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed to read, or a value did not deserialize.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A value parsed but is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}
