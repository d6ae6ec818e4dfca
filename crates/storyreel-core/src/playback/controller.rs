use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::cursor::{Cursor, Step};
use super::timer::TimerSlot;
use crate::config::PlaybackConfig;
use crate::gesture::Command;
use crate::host::StoryHost;
use crate::presenter::MediaEvent;
use crate::story::{StoryDeck, StoryItem};

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Terminal: no further cursor or timer activity
    Closed,
}

/// What a call to [`PlaybackController::tick`] changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer was due
    Idle,
    /// Fine ticker updated the progress fraction
    Progressed,
    /// Coarse timer moved the cursor to a new item
    Advanced,
    /// Coarse timer ran past the last item and closed the viewer
    Closed,
}

/// Playback state machine
///
/// Owns the cursor, the progress fraction, and one timer slot per timer
/// kind. Time is passed in by the caller so the same code runs under a
/// terminal event loop and under tests with synthetic instants.
pub struct PlaybackController<H: StoryHost> {
    deck: StoryDeck,
    cursor: Cursor,
    state: PlaybackState,
    /// Elapsed fraction of the current item in [0, 1]
    fraction: f64,
    /// Reference start: fraction = (now - origin) / duration
    origin: Instant,
    /// Timing length of the current item
    duration: Duration,
    /// Latest clip position reported by the presenter
    reported: Option<f64>,
    /// Coarse timer: fires `advance()` for image items
    advance_timer: TimerSlot,
    /// Fine ticker: recomputes the fraction for rendering only
    ticker: TimerSlot,
    config: PlaybackConfig,
    host: H,
    close_notified: bool,
}

impl<H: StoryHost> PlaybackController<H> {
    /// Open playback at the given indices (clamped into range)
    pub fn new(
        deck: StoryDeck,
        collection: usize,
        item: usize,
        config: PlaybackConfig,
        host: H,
        now: Instant,
    ) -> Self {
        let cursor = Cursor::clamped(&deck, collection, item);
        let mut controller = Self {
            deck,
            cursor,
            state: PlaybackState::Playing,
            fraction: 0.0,
            origin: now,
            duration: config.image_duration(),
            reported: None,
            advance_timer: TimerSlot::new(),
            ticker: TimerSlot::new(),
            config,
            host,
            close_notified: false,
        };
        controller.start_item(now);
        info!(
            collection = cursor.collection,
            item = cursor.item,
            "Story playback opened"
        );
        controller
    }

    pub fn deck(&self) -> &StoryDeck {
        &self.deck
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == PlaybackState::Closed
    }

    /// Elapsed fraction of the current item
    pub fn progress(&self) -> f64 {
        self.fraction
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_item(&self) -> Option<&StoryItem> {
        self.deck.item(self.cursor.collection, self.cursor.item)
    }

    /// Earliest pending timer deadline, for sizing the host loop's wait
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.advance_timer.deadline(), self.ticker.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Move to the next item, the next collection, or close at the end
    pub fn advance(&mut self, now: Instant) {
        if self.is_closed() {
            return;
        }
        match self.cursor.next(&self.deck) {
            Step::Moved(cursor) => {
                debug!(
                    from_collection = self.cursor.collection,
                    from_item = self.cursor.item,
                    to_collection = cursor.collection,
                    to_item = cursor.item,
                    "Advance"
                );
                self.move_to(cursor, now);
            }
            Step::Boundary => {
                debug!("Advance past last item");
                self.close();
            }
        }
    }

    /// Move to the previous item or the last item of the previous collection
    ///
    /// At the very first item this is a no-op.
    pub fn retreat(&mut self, now: Instant) {
        if self.is_closed() {
            return;
        }
        match self.cursor.previous(&self.deck) {
            Step::Moved(cursor) => {
                debug!(
                    to_collection = cursor.collection,
                    to_item = cursor.item,
                    "Retreat"
                );
                self.move_to(cursor, now);
            }
            Step::Boundary => debug!("Retreat at first item ignored"),
        }
    }

    /// Pause: cancel both timers and freeze the fraction
    pub fn hold_start(&mut self, now: Instant) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.sample(now);
        self.cancel_timers();
        self.state = PlaybackState::Paused;
        debug!(fraction = self.fraction, "Hold started");
    }

    /// Resume from the frozen fraction
    ///
    /// The reference start is moved back by the already-elapsed share so the
    /// fraction continues exactly where it stopped.
    pub fn hold_end(&mut self, now: Instant) {
        if self.state != PlaybackState::Paused {
            return;
        }
        let elapsed = self.duration.mul_f64(self.fraction);
        self.origin = now.checked_sub(elapsed).unwrap_or(now);
        self.state = PlaybackState::Playing;
        self.arm_timers(now);
        debug!(fraction = self.fraction, "Hold ended");
    }

    /// Close the viewer, notifying the host once
    pub fn close(&mut self) {
        self.cancel_timers();
        self.state = PlaybackState::Closed;
        if !self.close_notified {
            self.close_notified = true;
            info!(
                collection = self.cursor.collection,
                item = self.cursor.item,
                "Story playback closed"
            );
            self.host.on_close();
        }
    }

    /// Apply a classified gesture or key command
    pub fn apply(&mut self, command: Command, now: Instant) {
        if self.is_closed() {
            return;
        }
        match command {
            Command::Previous => self.retreat(now),
            Command::Next => self.advance(now),
            Command::HoldStart => self.hold_start(now),
            Command::HoldEnd => self.hold_end(now),
            Command::SwipeClose | Command::Close => self.close(),
            Command::SwipeOpenProduct => self.open_product(),
        }
    }

    /// Open the current item's product, if any
    pub fn open_product(&mut self) {
        let product_id = self
            .current_item()
            .and_then(|item| item.product.as_ref())
            .map(|product| product.id.clone());
        if let Some(product_id) = product_id {
            debug!(product = %product_id, "Open product");
            self.host.on_view_product(&product_id);
        }
    }

    /// React to a completion signal from the presenter
    ///
    /// Events for any item other than the current one are stale and ignored.
    /// A load failure counts as completion so playback never stalls.
    pub fn on_media(&mut self, event: MediaEvent, now: Instant) {
        if self.is_closed() {
            return;
        }
        let is_current = self
            .current_item()
            .is_some_and(|item| item.id == event.item_id());
        if !is_current {
            debug!(item = event.item_id(), "Ignoring stale media event");
            return;
        }
        if let MediaEvent::Failed { item_id, reason } = &event {
            warn!(item = %item_id, reason = %reason, "Skipping item after media failure");
        }
        self.fraction = 1.0;
        self.advance(now);
    }

    /// Record the clip's playback position for the progress bar
    pub fn report_clip_position(&mut self, item_id: &str, fraction: f64) {
        let is_current = self
            .current_item()
            .is_some_and(|item| item.is_clip() && item.id == item_id);
        if is_current {
            self.reported = Some(fraction.clamp(0.0, 1.0));
        }
    }

    /// Run whichever timers are due at `now`
    ///
    /// The fine ticker only refreshes the fraction; only the coarse timer
    /// moves the cursor.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.is_closed() {
            return TickOutcome::Idle;
        }

        let mut outcome = TickOutcome::Idle;
        if self.ticker.poll(now).is_some() {
            self.sample(now);
            outcome = TickOutcome::Progressed;
        }

        if self.advance_timer.poll(now).is_some() {
            self.fraction = 1.0;
            self.advance(now);
            outcome = if self.is_closed() {
                TickOutcome::Closed
            } else {
                TickOutcome::Advanced
            };
        }

        outcome
    }

    fn move_to(&mut self, cursor: Cursor, now: Instant) {
        self.cursor = cursor;
        self.state = PlaybackState::Playing;
        self.start_item(now);
    }

    /// Reset progress and re-arm timers for the item under the cursor
    fn start_item(&mut self, now: Instant) {
        self.cancel_timers();
        self.fraction = 0.0;
        self.reported = None;
        self.origin = now;
        self.duration = self
            .current_item()
            .map(|item| {
                item.effective_duration(
                    self.config.image_duration(),
                    self.config.default_clip_duration(),
                )
            })
            .unwrap_or_else(|| self.config.image_duration());
        self.arm_timers(now);
    }

    fn arm_timers(&mut self, now: Instant) {
        self.cancel_timers();
        let is_clip = self.current_item().is_some_and(StoryItem::is_clip);
        if !is_clip {
            let remaining = self.duration.mul_f64(1.0 - self.fraction);
            self.advance_timer.arm(now, remaining);
        }
        self.ticker.arm_interval(now, self.config.ticker_period());
    }

    fn cancel_timers(&mut self) {
        self.advance_timer.cancel();
        self.ticker.cancel();
    }

    /// Recompute the fraction; never moves backwards within an item
    fn sample(&mut self, now: Instant) {
        let fraction = match self.reported {
            Some(reported) => reported,
            None if self.duration.is_zero() => 1.0,
            None => {
                let elapsed = now.saturating_duration_since(self.origin);
                (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            }
        };
        self.fraction = self.fraction.max(fraction);
    }
}
