//! Media state for the item on screen
//!
//! Images have no completion signal of their own; the controller's coarse
//! timer ends them. Clips autoplay on mount and report natural completion as
//! a [`MediaEvent::Finished`], which is the only way a clip advances.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::story::{MediaKind, StoryItem};

/// Load/playback status of the mounted item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaStatus {
    /// Image still decoding
    Loading,
    /// Image decoded and on screen
    Ready,
    /// Clip playing
    Playing,
    /// Clip reached its end
    Finished,
    /// Media could not be loaded
    Failed(String),
}

/// Completion signal forwarded to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    Finished { item_id: String },
    Failed { item_id: String, reason: String },
}

impl MediaEvent {
    pub fn item_id(&self) -> &str {
        match self {
            MediaEvent::Finished { item_id } | MediaEvent::Failed { item_id, .. } => item_id,
        }
    }
}

/// Playback head of a clip, pausable without losing position
#[derive(Debug, Clone, Copy)]
struct ClipPlayback {
    length: Duration,
    /// Time played before the current run
    played: Duration,
    /// Start of the current run; `None` while paused
    resumed_at: Option<Instant>,
}

impl ClipPlayback {
    fn position(&self, now: Instant) -> Duration {
        let running = self
            .resumed_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or_default();
        (self.played + running).min(self.length)
    }

    fn pause(&mut self, now: Instant) {
        if self.resumed_at.is_some() {
            self.played = self.position(now);
            self.resumed_at = None;
        }
    }

    fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }
}

/// Presenter for the current item's media
#[derive(Debug)]
pub struct ContentPresenter {
    item_id: Option<String>,
    kind: MediaKind,
    status: MediaStatus,
    clip: Option<ClipPlayback>,
    default_clip_length: Duration,
}

impl ContentPresenter {
    pub fn new(default_clip_length: Duration) -> Self {
        Self {
            item_id: None,
            kind: MediaKind::Image,
            status: MediaStatus::Loading,
            clip: None,
            default_clip_length,
        }
    }

    /// Mount a new item, replacing whatever was on screen
    ///
    /// Clips start playing immediately.
    pub fn mount(&mut self, item: &StoryItem, now: Instant) {
        self.item_id = Some(item.id.clone());
        self.kind = item.kind;
        match item.kind {
            MediaKind::Image => {
                self.status = MediaStatus::Loading;
                self.clip = None;
            }
            MediaKind::Clip => {
                let length = item.effective_duration(self.default_clip_length, self.default_clip_length);
                self.status = MediaStatus::Playing;
                self.clip = Some(ClipPlayback {
                    length,
                    played: Duration::ZERO,
                    resumed_at: Some(now),
                });
            }
        }
        debug!(item = %item.id, kind = ?item.kind, "Mounted media");
    }

    pub fn unmount(&mut self) {
        self.item_id = None;
        self.clip = None;
        self.status = MediaStatus::Loading;
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn status(&self) -> &MediaStatus {
        &self.status
    }

    fn is_mounted(&self, item_id: &str) -> bool {
        self.item_id.as_deref() == Some(item_id)
    }

    /// Image finished decoding
    ///
    /// Returns false when the result belongs to an item no longer mounted.
    pub fn ready(&mut self, item_id: &str) -> bool {
        if !self.is_mounted(item_id) {
            debug!(item = item_id, "Ignoring load result for unmounted item");
            return false;
        }
        if self.status == MediaStatus::Loading {
            self.status = MediaStatus::Ready;
        }
        true
    }

    /// Media failed to load
    ///
    /// Returns the event to forward, or `None` for stale or repeated failures.
    pub fn fail(&mut self, item_id: &str, reason: impl Into<String>) -> Option<MediaEvent> {
        if !self.is_mounted(item_id) {
            return None;
        }
        if matches!(self.status, MediaStatus::Failed(_) | MediaStatus::Finished) {
            return None;
        }
        let reason = reason.into();
        warn!(item = item_id, reason = %reason, "Media failed to load");
        self.status = MediaStatus::Failed(reason.clone());
        if let Some(clip) = self.clip.as_mut() {
            clip.resumed_at = None;
        }
        Some(MediaEvent::Failed {
            item_id: item_id.to_string(),
            reason,
        })
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(clip) = self.clip.as_mut() {
            clip.pause(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.status != MediaStatus::Playing {
            return;
        }
        if let Some(clip) = self.clip.as_mut() {
            clip.resume(now);
        }
    }

    /// Clip position and length, `None` for images
    pub fn clip_position(&self, now: Instant) -> Option<(Duration, Duration)> {
        self.clip.map(|clip| (clip.position(now), clip.length))
    }

    /// Clip position as a fraction of its length
    pub fn clip_fraction(&self, now: Instant) -> Option<f64> {
        let (position, length) = self.clip_position(now)?;
        if length.is_zero() {
            return Some(1.0);
        }
        Some((position.as_secs_f64() / length.as_secs_f64()).clamp(0.0, 1.0))
    }

    /// Raise `Finished` once when a playing clip reaches its end
    pub fn poll(&mut self, now: Instant) -> Option<MediaEvent> {
        if self.kind != MediaKind::Clip || self.status != MediaStatus::Playing {
            return None;
        }
        let clip = self.clip.as_mut()?;
        if clip.position(now) < clip.length {
            return None;
        }
        clip.pause(now);
        self.status = MediaStatus::Finished;
        let item_id = self.item_id.clone()?;
        debug!(item = %item_id, "Clip finished");
        Some(MediaEvent::Finished { item_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn story(id: &str, kind: MediaKind, duration_ms: Option<u64>) -> StoryItem {
        StoryItem {
            id: id.to_string(),
            kind,
            source: format!("{}.bin", id),
            duration_ms,
            product: None,
            caption: None,
            posted_at: None,
        }
    }

    #[test]
    fn test_image_has_no_completion_signal() {
        let start = Instant::now();
        let mut presenter = ContentPresenter::new(ms(15000));
        presenter.mount(&story("img", MediaKind::Image, None), start);

        assert_eq!(presenter.status(), &MediaStatus::Loading);
        assert!(presenter.ready("img"));
        assert_eq!(presenter.status(), &MediaStatus::Ready);
        assert!(presenter.poll(start + ms(60_000)).is_none());
        assert!(presenter.clip_position(start).is_none());
    }

    #[test]
    fn test_clip_autoplays_and_finishes_once() {
        let start = Instant::now();
        let mut presenter = ContentPresenter::new(ms(15000));
        presenter.mount(&story("clip", MediaKind::Clip, Some(1000)), start);

        assert_eq!(presenter.status(), &MediaStatus::Playing);
        assert!(presenter.poll(start + ms(999)).is_none());
        assert_eq!(
            presenter.poll(start + ms(1000)),
            Some(MediaEvent::Finished {
                item_id: "clip".to_string()
            })
        );
        assert!(presenter.poll(start + ms(2000)).is_none());
    }

    #[test]
    fn test_clip_pause_keeps_position() {
        let start = Instant::now();
        let mut presenter = ContentPresenter::new(ms(15000));
        presenter.mount(&story("clip", MediaKind::Clip, Some(1000)), start);

        presenter.pause(start + ms(400));
        assert_eq!(presenter.clip_position(start + ms(5000)), Some((ms(400), ms(1000))));
        assert!(presenter.poll(start + ms(5000)).is_none());

        presenter.resume(start + ms(5000));
        assert_eq!(presenter.clip_fraction(start + ms(5100)), Some(0.5));
        assert!(presenter.poll(start + ms(5600)).is_some());
    }

    #[test]
    fn test_clip_without_length_uses_default() {
        let start = Instant::now();
        let mut presenter = ContentPresenter::new(ms(2000));
        presenter.mount(&story("clip", MediaKind::Clip, None), start);
        assert_eq!(presenter.clip_position(start), Some((Duration::ZERO, ms(2000))));
    }

    #[test]
    fn test_failure_forwarded_once_for_mounted_item() {
        let start = Instant::now();
        let mut presenter = ContentPresenter::new(ms(15000));
        presenter.mount(&story("img", MediaKind::Image, None), start);

        assert!(presenter.fail("other", "missing").is_none());
        let event = presenter.fail("img", "missing").unwrap();
        assert_eq!(event.item_id(), "img");
        assert!(presenter.fail("img", "again").is_none());
        assert!(matches!(presenter.status(), MediaStatus::Failed(_)));
    }

    #[test]
    fn test_stale_ready_is_ignored() {
        let start = Instant::now();
        let mut presenter = ContentPresenter::new(ms(15000));
        presenter.mount(&story("a", MediaKind::Image, None), start);
        presenter.mount(&story("b", MediaKind::Image, None), start);

        assert!(!presenter.ready("a"));
        assert_eq!(presenter.status(), &MediaStatus::Loading);
    }
}
