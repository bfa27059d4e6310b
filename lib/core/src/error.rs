use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed metadata for item {item}: {reason}")]
    MalformedMetadata { item: usize, reason: String },

    #[error("Malformed collection document: {0}")]
    MalformedCollection(String),

    #[error("Declared total {declared} does not match {actual} items in result")]
    TotalMismatch { declared: u64, actual: usize },

    #[error("Trait not found in index: {0}")]
    UnknownTrait(String),

    #[error("Value '{value}' was never observed for trait '{trait_type}'")]
    UnknownValue { trait_type: String, value: String },

    #[error("Rarity weight undefined for '{trait_type}' = '{value}' (occurrence count {count})")]
    UndefinedWeight {
        trait_type: String,
        value: String,
        count: i64,
    },

    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn malformed(item: usize, reason: impl Into<String>) -> Self {
        Error::MalformedMetadata {
            item,
            reason: reason.into(),
        }
    }
}
