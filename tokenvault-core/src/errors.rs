use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("a record for this sde already exists")]
    AlreadyExists,
    #[error("{entity} not found")]
    NotFound { entity: String },
    #[error("invalid token material: {0}")]
    InvalidToken(String),
}
