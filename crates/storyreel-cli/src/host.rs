use std::collections::HashMap;

use storyreel_core::story::StoryDeck;
use storyreel_core::StoryHost;
use tracing::{info, warn};

type Opener = fn(&str) -> std::io::Result<()>;

fn open_in_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

/// Host callbacks for the terminal player
///
/// Cart additions are only recorded; the summary is printed when the
/// viewer exits.
pub struct CliHost {
    product_urls: HashMap<String, String>,
    opener: Opener,
    pub cart: Vec<String>,
    pub stores_viewed: Vec<String>,
    pub closed: bool,
}

impl CliHost {
    pub fn for_deck(deck: &StoryDeck) -> Self {
        Self::with_opener(deck, open_in_browser)
    }

    fn with_opener(deck: &StoryDeck, opener: Opener) -> Self {
        let product_urls = deck
            .collections()
            .iter()
            .flat_map(|c| &c.items)
            .filter_map(|item| item.product.as_ref())
            .filter_map(|p| p.url.as_ref().map(|url| (p.id.clone(), url.clone())))
            .collect();
        Self {
            product_urls,
            opener,
            cart: Vec::new(),
            stores_viewed: Vec::new(),
            closed: false,
        }
    }

    /// Lines printed after the terminal is restored
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.cart.is_empty() {
            lines.push(format!("Added to cart ({}):", self.cart.len()));
            for product_id in &self.cart {
                lines.push(format!("  {}", product_id));
            }
        }
        if !self.stores_viewed.is_empty() {
            lines.push(format!("Stores visited: {}", self.stores_viewed.join(", ")));
        }
        lines
    }
}

impl StoryHost for CliHost {
    fn on_close(&mut self) {
        self.closed = true;
    }

    fn on_add_to_cart(&mut self, product_id: &str) {
        info!(product = product_id, "Added to cart");
        self.cart.push(product_id.to_string());
    }

    fn on_view_product(&mut self, product_id: &str) {
        match self.product_urls.get(product_id) {
            Some(url) => {
                info!(product = product_id, url = %url, "Opening product page");
                if let Err(e) = (self.opener)(url) {
                    warn!(product = product_id, "Failed to open product page: {}", e);
                }
            }
            None => info!(product = product_id, "Product has no page to open"),
        }
    }

    fn on_view_store(&mut self, store_id: &str) {
        info!(store = store_id, "View store");
        if !self.stores_viewed.iter().any(|s| s == store_id) {
            self.stores_viewed.push(store_id.to_string());
        }
    }
}
