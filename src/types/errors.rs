use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClosetError {
    #[error("Database error: {0}")]
    Database(String),
    /// `score` was called with a non-top in the top slot or a non-bottom in the bottom slot.
    #[error("Invalid pair: {0}")]
    InvalidPair(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Duplicate: {0}")]
    Duplicate(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Tagging failed: {0}")]
    Tagging(String),
    #[error("Chat error: {0}")]
    Chat(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Operation in progress. Please wait.")]
    Busy,
}

impl From<sqlx::Error> for ClosetError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ClosetError::Duplicate(db.message().to_string())
            }
            _ => ClosetError::Database(error.to_string()),
        }
    }
}

impl Serialize for ClosetError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CommandResult<T> = Result<T, ClosetError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
