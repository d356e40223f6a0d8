use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Reply not found: {0}")]
    ReplyNotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    /// True for the variants that mean "the referenced record does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ThreadNotFound(_) | Self::ReplyNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
