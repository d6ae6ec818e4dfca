use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use storyreel_core::gesture::{Command, GestureInput};
use storyreel_core::playback::{Cursor, PlaybackState, Step, TickOutcome};
use storyreel_core::presenter::MediaStatus;
use storyreel_core::{AppConfig, StoryHost, StoryViewer};
use tracing::debug;

use crate::input::Action;
use crate::keymap::Keymap;
use crate::media::{ImageCache, ImageLoadResult, LoadRequest};
use crate::pointer::{CellGeometry, GestureTracker};
use crate::theme::Theme;

/// Application state
pub struct App<H: StoryHost> {
    /// The story viewer being driven
    pub viewer: StoryViewer<H>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub keymap: Keymap,
    /// Decoded images for the current and upcoming item
    pub images: ImageCache,
    pub tracker: GestureTracker,
    pub geometry: CellGeometry,
    /// The current pause was started by a pointer press
    pointer_hold: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl<H: StoryHost> App<H> {
    pub fn new(viewer: StoryViewer<H>, config: Arc<AppConfig>, theme: Theme) -> Self {
        let keymap = Keymap::from_config(&config.keymap);
        let geometry = CellGeometry::from_config(&config.ui);
        Self {
            viewer,
            config,
            theme,
            keymap,
            images: ImageCache::new(),
            tracker: GestureTracker::new(),
            geometry,
            pointer_hold: false,
            should_quit: false,
            status_message: None,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Content area in cells, as laid out by the last draw
    pub fn set_content_area(&mut self, area: Rect) {
        self.viewer.set_bounds(self.geometry.bounds(area));
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        let before = self.viewer.cursor();
        match action {
            Action::Quit => self.viewer.command(Command::Close, now),
            Action::Previous => self.viewer.command(Command::Previous, now),
            Action::Next => self.viewer.command(Command::Next, now),
            Action::ToggleHold => {
                let command = if self.viewer.state() == PlaybackState::Paused {
                    Command::HoldEnd
                } else {
                    Command::HoldStart
                };
                self.pointer_hold = false;
                self.viewer.command(command, now);
            }
            Action::ViewProduct => match self.viewer.footer() {
                Some(footer) => {
                    self.viewer.view_product();
                    self.set_status(format!("Viewing {}", footer.name));
                }
                None => self.set_status("No product on this story"),
            },
            Action::AddToCart => match self.viewer.footer() {
                Some(footer) => {
                    self.viewer.add_to_cart();
                    self.set_status(format!("Added {} to cart", footer.name));
                }
                None => self.set_status("No product on this story"),
            },
            Action::ViewStore => {
                let name = self.viewer.current_collection().map(|c| c.name.clone());
                if let (Some(_), Some(name)) = (self.viewer.view_store(), name) {
                    self.set_status(format!("Store: {}", name));
                }
            }
            Action::None => {}
        }
        self.settle(before);
    }

    /// Feed primary-button mouse events through the gesture tracker
    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) {
        let point = self.geometry.point(event.column, event.row);
        let inputs = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.tracker.press(point, self.viewer.bounds())
            }
            MouseEventKind::Up(MouseButton::Left) => self.tracker.release(point),
            _ => Vec::new(),
        };
        self.apply_inputs(inputs, now);
    }

    /// Terminal resized: an in-flight press can no longer be trusted
    pub fn handle_resize(&mut self, now: Instant) {
        let inputs = self.tracker.cancel();
        self.apply_inputs(inputs, now);
    }

    fn apply_inputs(&mut self, inputs: Vec<GestureInput>, now: Instant) {
        let before = self.viewer.cursor();
        for input in inputs {
            // A release only resumes a pause that its own press started
            if input == GestureInput::PressEnd {
                if !self.pointer_hold {
                    continue;
                }
                self.pointer_hold = false;
            }
            let was_playing = self.viewer.state() == PlaybackState::Playing;
            if let Some(command) = self.viewer.pointer(input, now) {
                debug!(?input, ?command, "Gesture");
                if command == Command::HoldStart {
                    self.pointer_hold =
                        was_playing && self.viewer.state() == PlaybackState::Paused;
                }
                if command == Command::SwipeOpenProduct {
                    if let Some(footer) = self.viewer.footer() {
                        self.set_status(format!("Viewing {}", footer.name));
                    }
                }
            }
        }
        self.settle(before);
    }

    /// Drive the viewer's timers
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let before = self.viewer.cursor();
        let outcome = self.viewer.tick(now);
        self.settle(before);
        outcome
    }

    /// Store a finished decode and tell the viewer if it is on screen
    pub fn handle_image_result(&mut self, result: ImageLoadResult, now: Instant) {
        let item_id = result.item_id().to_string();
        self.images.finish(result);
        let on_screen = self.viewer.current_item().is_some_and(|item| item.id == item_id);
        if on_screen {
            self.sync_current(now);
        }
    }

    /// Images that should start decoding: the current item and the next one
    ///
    /// Items whose result is already cached are reported to the viewer
    /// straight away, which may advance past failed items.
    pub fn media_requests(&mut self, now: Instant) -> Vec<LoadRequest> {
        let mut requests = Vec::new();
        let limit = self.viewer.controller().deck().item_count() + 1;

        for _ in 0..limit {
            let Some((item_id, source, is_clip)) = self
                .viewer
                .current_item()
                .map(|item| (item.id.clone(), item.source.clone(), item.is_clip()))
            else {
                break;
            };
            if is_clip || self.images.is_ready(&item_id) || self.images.failure(&item_id).is_some()
            {
                let before = self.viewer.cursor();
                self.sync_current(now);
                if self.viewer.cursor() == before || self.viewer.is_closed() {
                    break;
                }
                continue;
            }
            if self.images.start_loading(&item_id) {
                requests.push(LoadRequest { item_id, source });
            }
            break;
        }

        let upcoming = self.upcoming_image();
        if let Some(request) = upcoming {
            if self.images.start_loading(&request.item_id) {
                requests.push(request);
            }
        }

        let current = self.viewer.current_item().map(|item| item.id.clone());
        let next = self.upcoming_image().map(|request| request.item_id);
        let keep: Vec<&str> = [current.as_deref(), next.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        self.images.retain(&keep);

        requests
    }

    /// Report a cached decode result for the current item to the viewer
    fn sync_current(&mut self, now: Instant) {
        let Some(item_id) = self.viewer.current_item().map(|item| item.id.clone()) else {
            return;
        };
        let before = self.viewer.cursor();
        if self.images.is_ready(&item_id) {
            if *self.viewer.presenter().status() == MediaStatus::Loading {
                self.viewer.media_ready(&item_id);
            }
        } else if let Some(error) = self.images.failure(&item_id).map(str::to_string) {
            self.viewer.media_failed(&item_id, &error, now);
        }
        self.settle(before);
    }

    /// The next image item in playback order
    fn upcoming_image(&self) -> Option<LoadRequest> {
        let deck = self.viewer.controller().deck();
        let Step::Moved(next) = self.viewer.cursor().next(deck) else {
            return None;
        };
        let item = deck.item(next.collection, next.item)?;
        (!item.is_clip()).then(|| LoadRequest {
            item_id: item.id.clone(),
            source: item.source.clone(),
        })
    }

    fn settle(&mut self, before: Cursor) {
        if self.viewer.is_closed() {
            self.should_quit = true;
        } else if self.viewer.cursor() != before {
            self.clear_status();
        }
    }
}
