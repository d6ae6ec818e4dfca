use std::path::Path;

use anyhow::{Context, Result};

use storyreel_core::story::{MediaKind, StoryDeck, StoryItem};
use storyreel_core::PlaybackConfig;

pub fn run(deck_path: &Path, playback: &PlaybackConfig) -> Result<()> {
    let deck = StoryDeck::load(deck_path)
        .with_context(|| format!("Failed to load deck {}", deck_path.display()))?;

    println!(
        "Stores ({}), {} stories:\n",
        deck.len(),
        deck.item_count()
    );

    for (index, collection) in deck.collections().iter().enumerate() {
        println!(
            "  [{}] {} ({}) - {} stories",
            index,
            collection.name,
            collection.store_id,
            collection.items.len()
        );
        for (position, item) in collection.items.iter().enumerate() {
            println!("    {}. {}", position, describe_item(item, playback));
        }
        println!();
    }

    println!("To play from a store, run:");
    println!("  storyreel play {} -c <N>", deck_path.display());

    Ok(())
}

/// One-line summary: kind, id, duration and product
fn describe_item(item: &StoryItem, playback: &PlaybackConfig) -> String {
    let kind = match item.kind {
        MediaKind::Image => "image",
        MediaKind::Clip => "clip ",
    };
    let duration = item.effective_duration(playback.image_duration(), playback.default_clip_duration());
    let mut line = format!("{} {} ({:.1}s)", kind, item.id, duration.as_secs_f64());
    if let Some(product) = &item.product {
        line.push_str(&format!(" - {} {}", product.name, product.price));
    }
    if let Some(posted) = item.posted_at {
        line.push_str(&format!(" [{}]", posted.format("%Y-%m-%d %H:%M")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyreel_core::story::Product;

    fn item(kind: MediaKind, duration_ms: Option<u64>, product: bool) -> StoryItem {
        StoryItem {
            id: "look-2".to_string(),
            kind,
            source: "look-2.png".to_string(),
            duration_ms,
            product: product.then(|| Product {
                id: "sku-2".to_string(),
                name: "Canvas Tote".to_string(),
                price: "$18.00".to_string(),
                sizes: vec![],
                likes: 0,
                orders: 0,
                url: None,
            }),
            caption: None,
            posted_at: None,
        }
    }

    #[test]
    fn test_describe_image_with_product() {
        let line = describe_item(&item(MediaKind::Image, None, true), &PlaybackConfig::default());
        assert_eq!(line, "image look-2 (5.0s) - Canvas Tote $18.00");
    }

    #[test]
    fn test_describe_clip_default_length() {
        let line = describe_item(&item(MediaKind::Clip, None, false), &PlaybackConfig::default());
        assert_eq!(line, "clip  look-2 (15.0s)");

        let line = describe_item(&item(MediaKind::Clip, Some(7_500), false), &PlaybackConfig::default());
        assert_eq!(line, "clip  look-2 (7.5s)");
    }
}
