mod deck;
mod models;

pub use deck::StoryDeck;
pub use models::{MediaKind, Product, StoreCollection, StoryItem};
