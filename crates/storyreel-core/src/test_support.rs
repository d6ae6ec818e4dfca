//! Shared fixtures for unit tests

use crate::host::StoryHost;
use crate::story::{MediaKind, Product, StoreCollection, StoryDeck, StoryItem};

fn image_item(id: String) -> StoryItem {
    StoryItem {
        product: Some(Product {
            id: format!("sku-{}", id),
            name: format!("Product {}", id),
            price: "$10.00".to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            likes: 4,
            orders: 2,
            url: None,
        }),
        source: format!("{}.png", id),
        id,
        kind: MediaKind::Image,
        duration_ms: None,
        caption: None,
        posted_at: None,
    }
}

/// Deck of image items; `("a", 2)` yields store "a" with items "a-0", "a-1"
pub fn deck(shape: &[(&str, usize)]) -> StoryDeck {
    let collections = shape
        .iter()
        .map(|(store, count)| StoreCollection {
            store_id: store.to_string(),
            name: format!("Store {}", store),
            avatar: None,
            items: (0..*count).map(|i| image_item(format!("{}-{}", store, i))).collect(),
        })
        .collect();
    StoryDeck::new(collections).expect("fixture deck is valid")
}

/// One collection: a 3s clip ("clip-1") followed by an image ("img-2")
pub fn clip_deck() -> StoryDeck {
    let clip = StoryItem {
        id: "clip-1".to_string(),
        kind: MediaKind::Clip,
        source: "clip-1.mp4".to_string(),
        duration_ms: Some(3000),
        product: None,
        caption: Some("Behind the scenes".to_string()),
        posted_at: None,
    };
    StoryDeck::new(vec![StoreCollection {
        store_id: "c".to_string(),
        name: "Clip Store".to_string(),
        avatar: None,
        items: vec![clip, image_item("img-2".to_string())],
    }])
    .expect("fixture deck is valid")
}

/// Host that records every callback
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub closes: u32,
    pub carts: Vec<String>,
    pub products: Vec<String>,
    pub stores: Vec<String>,
}

impl StoryHost for RecordingHost {
    fn on_close(&mut self) {
        self.closes += 1;
    }

    fn on_add_to_cart(&mut self, product_id: &str) {
        self.carts.push(product_id.to_string());
    }

    fn on_view_product(&mut self, product_id: &str) {
        self.products.push(product_id.to_string());
    }

    fn on_view_store(&mut self, store_id: &str) {
        self.stores.push(store_id.to_string());
    }
}
