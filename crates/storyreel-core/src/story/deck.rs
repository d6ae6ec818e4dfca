use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::models::{StoreCollection, StoryItem};
use crate::{Error, Result};

/// On-disk deck layout (`[[collections]]` with nested `[[collections.items]]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeckFile {
    #[serde(default)]
    collections: Vec<StoreCollection>,
}

/// Validated, non-empty set of store collections
///
/// Every collection holds at least one item, so any in-range
/// `(collection, item)` pair points at a real story item.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDeck {
    collections: Vec<StoreCollection>,
}

impl StoryDeck {
    /// Validate collections and build a deck
    pub fn new(collections: Vec<StoreCollection>) -> Result<Self> {
        if collections.is_empty() {
            return Err(Error::EmptyDeck);
        }
        if let Some(empty) = collections.iter().find(|c| c.items.is_empty()) {
            return Err(Error::EmptyCollection(empty.store_id.clone()));
        }
        // Media events are matched by item id across the whole deck
        let mut seen = HashSet::new();
        for item in collections.iter().flat_map(|c| &c.items) {
            if !seen.insert(item.id.as_str()) {
                return Err(Error::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { collections })
    }

    /// Load a deck from a TOML or JSON file
    ///
    /// Relative media paths are resolved against the deck file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut deck: DeckFile = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content).map_err(|e| Error::DeckParse(e.to_string()))?
        };

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for collection in &mut deck.collections {
            if let Some(avatar) = collection.avatar.as_mut() {
                *avatar = resolve_source(base_dir, avatar);
            }
            for item in &mut collection.items {
                item.source = resolve_source(base_dir, &item.source);
            }
        }

        debug!(
            path = %path.display(),
            collections = deck.collections.len(),
            "Loaded story deck"
        );

        Self::new(deck.collections)
    }

    pub fn collections(&self) -> &[StoreCollection] {
        &self.collections
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Always false for a constructed deck; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn collection(&self, index: usize) -> Option<&StoreCollection> {
        self.collections.get(index)
    }

    pub fn item(&self, collection: usize, item: usize) -> Option<&StoryItem> {
        self.collections.get(collection)?.items.get(item)
    }

    /// Total number of items across all collections
    pub fn item_count(&self) -> usize {
        self.collections.iter().map(|c| c.items.len()).sum()
    }

    /// Index of the collection owned by `store_id`
    pub fn position_of_store(&self, store_id: &str) -> Option<usize> {
        self.collections.iter().position(|c| c.store_id == store_id)
    }
}

/// Resolve a media reference relative to the deck directory
///
/// URLs and absolute paths are kept as-is.
fn resolve_source(base_dir: &Path, source: &str) -> String {
    if source.contains("://") {
        return source.to_string();
    }
    let path = PathBuf::from(source);
    if path.is_absolute() {
        source.to_string()
    } else {
        base_dir.join(path).to_string_lossy().into_owned()
    }
}
