use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions or mine count out of range")]
    InvalidSize,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Cell already holds a mine")]
    DuplicateMine,
    #[error("Mine template rows are malformed")]
    MalformedTemplate,
}

pub type Result<T> = core::result::Result<T, GameError>;
