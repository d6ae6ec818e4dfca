//! Composition root for the story viewer
//!
//! Wires the gesture classifier, the playback controller and the content
//! presenter together. Input flows in through [`StoryViewer::pointer`],
//! [`StoryViewer::command`] and the media callbacks; renderers read the
//! projections ([`HeaderView`], [`FooterView`], segments) after each call.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::PlaybackConfig;
use crate::gesture::{self, Bounds, Command, GestureInput};
use crate::host::StoryHost;
use crate::playback::{Cursor, PlaybackController, PlaybackState, TickOutcome};
use crate::presenter::ContentPresenter;
use crate::progress::{self, SegmentState};
use crate::story::{StoreCollection, StoryDeck, StoryItem};

/// Header overlay data: store identity and the current item's stats
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub store_id: String,
    pub store_name: String,
    pub avatar: Option<String>,
    pub likes: Option<u32>,
    pub orders: Option<u32>,
    pub posted_at: Option<DateTime<Utc>>,
    /// 1-based item position within the collection
    pub item_position: usize,
    pub item_count: usize,
    /// 1-based collection position within the deck
    pub collection_position: usize,
    pub collection_count: usize,
}

/// Footer overlay data: the current item's product call to action
#[derive(Debug, Clone, PartialEq)]
pub struct FooterView {
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub sizes: Vec<String>,
}

/// Full-screen story viewer
pub struct StoryViewer<H: StoryHost> {
    controller: PlaybackController<H>,
    presenter: ContentPresenter,
    bounds: Bounds,
}

impl<H: StoryHost> StoryViewer<H> {
    /// Open the viewer at the given indices (clamped into range)
    pub fn open(
        deck: StoryDeck,
        collection: usize,
        item: usize,
        config: &PlaybackConfig,
        host: H,
        now: Instant,
    ) -> Self {
        let controller =
            PlaybackController::new(deck, collection, item, config.clone(), host, now);
        let mut presenter = ContentPresenter::new(config.default_clip_duration());
        if let Some(item) = controller.current_item() {
            presenter.mount(item, now);
        }
        Self {
            controller,
            presenter,
            bounds: Bounds::default(),
        }
    }

    /// Update the content area used for tap zones
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn controller(&self) -> &PlaybackController<H> {
        &self.controller
    }

    pub fn presenter(&self) -> &ContentPresenter {
        &self.presenter
    }

    pub fn host(&self) -> &H {
        self.controller.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.controller.host_mut()
    }

    pub fn cursor(&self) -> Cursor {
        self.controller.cursor()
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn progress(&self) -> f64 {
        self.controller.progress()
    }

    pub fn is_closed(&self) -> bool {
        self.controller.is_closed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    pub fn current_collection(&self) -> Option<&StoreCollection> {
        self.controller.deck().collection(self.cursor().collection)
    }

    pub fn current_item(&self) -> Option<&StoryItem> {
        self.controller.current_item()
    }

    /// Classify pointer input against the content bounds and apply it
    pub fn pointer(&mut self, input: GestureInput, now: Instant) -> Option<Command> {
        let has_product = self.current_item().is_some_and(StoryItem::has_product);
        let command = gesture::classify(input, self.bounds, has_product)?;
        self.command(command, now);
        Some(command)
    }

    /// Apply a command and keep the presenter in step with the controller
    pub fn command(&mut self, command: Command, now: Instant) {
        let before = self.cursor();
        self.controller.apply(command, now);
        match (command, self.state()) {
            (Command::HoldStart, PlaybackState::Paused) => self.presenter.pause(now),
            (Command::HoldEnd, PlaybackState::Playing) => self.presenter.resume(now),
            _ => {}
        }
        self.sync_presenter(before, now);
    }

    pub fn close(&mut self) {
        self.controller.close();
        self.presenter.unmount();
    }

    /// Media for `item_id` finished loading
    pub fn media_ready(&mut self, item_id: &str) -> bool {
        self.presenter.ready(item_id)
    }

    /// Media for `item_id` failed; treated as completion of that item
    pub fn media_failed(&mut self, item_id: &str, reason: &str, now: Instant) {
        let before = self.cursor();
        if let Some(event) = self.presenter.fail(item_id, reason) {
            self.controller.on_media(event, now);
            self.sync_presenter(before, now);
        }
    }

    /// Drive clip completion and the playback timers
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.is_closed() {
            return TickOutcome::Idle;
        }
        let before = self.cursor();

        if let Some(event) = self.presenter.poll(now) {
            self.controller.on_media(event, now);
            self.sync_presenter(before, now);
            return if self.is_closed() {
                TickOutcome::Closed
            } else {
                TickOutcome::Advanced
            };
        }

        if let (Some(item_id), Some(fraction)) =
            (self.presenter.item_id(), self.presenter.clip_fraction(now))
        {
            let item_id = item_id.to_string();
            self.controller.report_clip_position(&item_id, fraction);
        }

        let outcome = self.controller.tick(now);
        self.sync_presenter(before, now);
        outcome
    }

    /// Add the current item's product to the cart
    pub fn add_to_cart(&mut self) -> Option<String> {
        let product_id = self.footer()?.product_id;
        debug!(product = %product_id, "Add to cart");
        self.controller.host_mut().on_add_to_cart(&product_id);
        Some(product_id)
    }

    /// Open the current item's product detail
    pub fn view_product(&mut self) {
        self.controller.open_product();
    }

    /// Open the current store
    pub fn view_store(&mut self) -> Option<String> {
        let store_id = self.current_collection()?.store_id.clone();
        debug!(store = %store_id, "View store");
        self.controller.host_mut().on_view_store(&store_id);
        Some(store_id)
    }

    /// Progress segments for the current collection
    pub fn segments(&self) -> Vec<SegmentState> {
        let count = self.current_collection().map_or(0, |c| c.items.len());
        progress::segments(count, self.cursor().item, self.progress())
    }

    pub fn header(&self) -> Option<HeaderView> {
        let cursor = self.cursor();
        let collection = self.current_collection()?;
        let item = collection.items.get(cursor.item)?;
        let product = item.product.as_ref();
        Some(HeaderView {
            store_id: collection.store_id.clone(),
            store_name: collection.name.clone(),
            avatar: collection.avatar.clone(),
            likes: product.map(|p| p.likes),
            orders: product.map(|p| p.orders),
            posted_at: item.posted_at,
            item_position: cursor.item + 1,
            item_count: collection.items.len(),
            collection_position: cursor.collection + 1,
            collection_count: self.controller.deck().len(),
        })
    }

    pub fn footer(&self) -> Option<FooterView> {
        let product = self.current_item()?.product.as_ref()?;
        Some(FooterView {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.clone(),
            sizes: product.sizes.clone(),
        })
    }

    /// Remount media after the cursor moved; unmount once closed
    fn sync_presenter(&mut self, before: Cursor, now: Instant) {
        if self.controller.is_closed() {
            self.presenter.unmount();
            return;
        }
        if self.controller.cursor() != before {
            if let Some(item) = self.controller.current_item() {
                self.presenter.mount(item, now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::gesture::Point;
    use crate::presenter::MediaStatus;
    use crate::test_support::{clip_deck, deck, RecordingHost};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn viewer(shape: &[(&str, usize)], collection: usize, item: usize) -> (StoryViewer<RecordingHost>, Instant) {
        let start = Instant::now();
        let mut viewer = StoryViewer::open(
            deck(shape),
            collection,
            item,
            &PlaybackConfig::default(),
            RecordingHost::default(),
            start,
        );
        viewer.set_bounds(Bounds::new(0.0, 0.0, 300.0, 600.0));
        (viewer, start)
    }

    #[test]
    fn test_tap_navigation() {
        let (mut v, start) = viewer(&[("a", 3)], 0, 1);

        assert_eq!(
            v.pointer(GestureInput::Tap(Point::new(260.0, 100.0)), start),
            Some(Command::Next)
        );
        assert_eq!(v.cursor(), Cursor::new(0, 2));

        assert_eq!(
            v.pointer(GestureInput::Tap(Point::new(50.0, 100.0)), start),
            Some(Command::Previous)
        );
        assert_eq!(v.cursor(), Cursor::new(0, 1));

        assert_eq!(v.pointer(GestureInput::Tap(Point::new(150.0, 100.0)), start), None);
        assert_eq!(v.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_navigation_remounts_presenter() {
        let (mut v, start) = viewer(&[("a", 2)], 0, 0);
        assert_eq!(v.presenter().item_id(), Some("a-0"));
        v.command(Command::Next, start);
        assert_eq!(v.presenter().item_id(), Some("a-1"));
    }

    #[test]
    fn test_swipe_down_closes_viewer() {
        let (mut v, start) = viewer(&[("a", 2)], 0, 0);
        let swipe = GestureInput::Swipe {
            start: Point::new(110.0, 380.0),
            end: Point::new(100.0, 500.0),
        };
        assert_eq!(v.pointer(swipe, start), Some(Command::SwipeClose));
        assert!(v.is_closed());
        assert_eq!(v.host().closes, 1);
        assert!(v.presenter().item_id().is_none());
    }

    #[test]
    fn test_swipe_up_opens_product() {
        let (mut v, start) = viewer(&[("a", 2)], 0, 1);
        let swipe = GestureInput::Swipe {
            start: Point::new(90.0, 520.0),
            end: Point::new(100.0, 400.0),
        };
        assert_eq!(v.pointer(swipe, start), Some(Command::SwipeOpenProduct));
        assert_eq!(v.host().products, vec!["sku-a-1".to_string()]);
    }

    #[test]
    fn test_hold_pauses_clip_and_timers() {
        let start = Instant::now();
        let mut v = StoryViewer::open(
            clip_deck(),
            0,
            0,
            &PlaybackConfig::default(),
            RecordingHost::default(),
            start,
        );
        v.tick(start + ms(1500));
        v.pointer(GestureInput::PressStart, start + ms(1500));
        assert_eq!(v.state(), PlaybackState::Paused);
        let frozen = v.progress();
        assert!((frozen - 0.5).abs() < 1e-9);

        // The clip would have ended at 3000ms if it kept playing
        assert_eq!(v.tick(start + ms(10_000)), TickOutcome::Idle);
        assert_eq!(v.cursor(), Cursor::new(0, 0));

        v.pointer(GestureInput::PressEnd, start + ms(10_000));
        assert_eq!(v.progress(), frozen);
        assert_eq!(v.tick(start + ms(11_000)), TickOutcome::Progressed);
        assert_eq!(v.cursor(), Cursor::new(0, 0));
        assert_eq!(v.tick(start + ms(11_500)), TickOutcome::Advanced);
        assert_eq!(v.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_media_failure_skips_item() {
        let (mut v, start) = viewer(&[("a", 2)], 0, 0);
        v.media_failed("a-0", "file not found", start);
        assert_eq!(v.cursor(), Cursor::new(0, 1));
        assert_eq!(v.presenter().status(), &MediaStatus::Loading);

        // Late failure for the old item is ignored
        v.media_failed("a-0", "file not found", start);
        assert_eq!(v.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_overlay_projections() {
        let (mut v, start) = viewer(&[("a", 2), ("b", 1)], 0, 1);
        let header = v.header().unwrap();
        assert_eq!(header.store_id, "a");
        assert_eq!(header.item_position, 2);
        assert_eq!(header.item_count, 2);
        assert_eq!(header.collection_count, 2);
        assert_eq!(header.likes, Some(4));

        let footer = v.footer().unwrap();
        assert_eq!(footer.product_id, "sku-a-1");
        assert_eq!(footer.sizes, vec!["S".to_string(), "M".to_string()]);

        v.command(Command::Next, start);
        assert_eq!(v.header().unwrap().store_name, "Store b");
        assert_eq!(v.segments(), vec![SegmentState::Active(0.0)]);
    }

    #[test]
    fn test_callbacks_reach_host() {
        let (mut v, _) = viewer(&[("a", 1)], 0, 0);
        assert_eq!(v.add_to_cart(), Some("sku-a-0".to_string()));
        assert_eq!(v.view_store(), Some("a".to_string()));
        v.view_product();

        let host = v.host();
        assert_eq!(host.carts, vec!["sku-a-0".to_string()]);
        assert_eq!(host.stores, vec!["a".to_string()]);
        assert_eq!(host.products, vec!["sku-a-0".to_string()]);
        assert_eq!(host.closes, 0);
    }

    #[test]
    fn test_segments_follow_progress() {
        let (mut v, start) = viewer(&[("a", 3)], 0, 1);
        v.tick(start + ms(2500));
        let track = v.segments();
        assert_eq!(track.len(), 3);
        assert_eq!(track[0], SegmentState::Completed);
        assert!((track[1].fill() - 0.5).abs() < 1e-9);
        assert_eq!(track[2], SegmentState::Pending);
    }
}
