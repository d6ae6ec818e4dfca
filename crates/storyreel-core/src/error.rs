use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Story deck has no collections")]
    EmptyDeck,

    #[error("Store collection has no items: {0}")]
    EmptyCollection(String),

    #[error("Duplicate story item id: {0}")]
    DuplicateItem(String),

    #[error("Deck parsing error: {0}")]
    DeckParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
