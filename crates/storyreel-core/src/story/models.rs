use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of media a story item plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Static image, completion is owned by the coarse timer
    Image,
    /// Autoplaying clip, completion arrives as a media event
    Clip,
}

/// Product attached to a story item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Display price, already formatted by the catalog (e.g. "$24.99")
    pub price: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub orders: u32,
    /// Product page opened on "view product"
    #[serde(default)]
    pub url: Option<String>,
}

/// One playable unit of a store's story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryItem {
    pub id: String,
    pub kind: MediaKind,
    /// Media reference (file path or URL)
    pub source: String,
    /// Explicit duration; images fall back to the configured default
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

impl StoryItem {
    pub fn is_clip(&self) -> bool {
        self.kind == MediaKind::Clip
    }

    pub fn has_product(&self) -> bool {
        self.product.is_some()
    }

    /// Duration used for timing this item
    ///
    /// A zero duration is treated as missing so the progress fraction
    /// never divides by zero.
    pub fn effective_duration(&self, default_image: Duration, default_clip: Duration) -> Duration {
        match self.duration_ms.filter(|ms| *ms > 0) {
            Some(ms) => Duration::from_millis(ms),
            None => match self.kind {
                MediaKind::Image => default_image,
                MediaKind::Clip => default_clip,
            },
        }
    }
}

/// Ordered story items belonging to one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCollection {
    pub store_id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub items: Vec<StoryItem>,
}

impl StoreCollection {
    pub fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: MediaKind, duration_ms: Option<u64>) -> StoryItem {
        StoryItem {
            id: "a1".to_string(),
            kind,
            source: "a1.png".to_string(),
            duration_ms,
            product: None,
            caption: None,
            posted_at: None,
        }
    }

    #[test]
    fn test_effective_duration_defaults() {
        let image = Duration::from_millis(5000);
        let clip = Duration::from_millis(15000);

        assert_eq!(item(MediaKind::Image, None).effective_duration(image, clip), image);
        assert_eq!(item(MediaKind::Clip, None).effective_duration(image, clip), clip);
        assert_eq!(
            item(MediaKind::Image, Some(2500)).effective_duration(image, clip),
            Duration::from_millis(2500)
        );
    }

    #[test]
    fn test_zero_duration_falls_back() {
        let image = Duration::from_millis(5000);
        let clip = Duration::from_millis(15000);
        assert_eq!(item(MediaKind::Image, Some(0)).effective_duration(image, clip), image);
    }
}
