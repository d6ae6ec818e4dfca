use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
///
/// Polling is bounded by the viewer's next timer deadline so playback
/// timers fire on time even when the terminal is idle.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
        }
    }

    /// How long to wait for input before the next tick
    pub fn timeout(&self, deadline: Option<Instant>, now: Instant) -> Duration {
        match deadline {
            Some(deadline) => deadline.saturating_duration_since(now).min(self.tick_rate),
            None => self.tick_rate,
        }
    }

    /// Poll for the next event, returning `Tick` when `deadline` passes first
    pub fn next(&self, deadline: Option<Instant>) -> Result<Option<AppEvent>> {
        let timeout = self.timeout(deadline, Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button or drag
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// A timer deadline or the idle tick elapsed
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_without_deadline_uses_tick_rate() {
        let handler = EventHandler::new(100);
        assert_eq!(handler.timeout(None, Instant::now()), Duration::from_millis(100));
    }

    #[test]
    fn test_timeout_follows_nearer_deadline() {
        let handler = EventHandler::new(100);
        let now = Instant::now();
        assert_eq!(
            handler.timeout(Some(now + Duration::from_millis(16)), now),
            Duration::from_millis(16)
        );
        assert_eq!(
            handler.timeout(Some(now + Duration::from_secs(5)), now),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_timeout_for_past_deadline_is_zero() {
        let handler = EventHandler::new(100);
        let now = Instant::now();
        assert_eq!(handler.timeout(Some(now), now + Duration::from_millis(5)), Duration::ZERO);
    }
}
