//! Owned scheduling slots for the playback clock
//!
//! The controller holds exactly one [`TimerSlot`] per timer kind. Arming a
//! slot replaces whatever was scheduled before, and every arm or cancel bumps
//! the slot generation, so a [`TimerToken`] from a superseded schedule can
//! never be mistaken for the live one.

use std::time::{Duration, Instant};

/// Minimum interval period; keeps a zero-fps config from spinning
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies one arming of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Once,
    Every(Duration),
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    deadline: Instant,
    schedule: Schedule,
}

/// Single owned timer: at most one live schedule at a time
#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<Armed>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer firing `delay` after `now`
    pub fn arm(&mut self, now: Instant, delay: Duration) -> TimerToken {
        self.replace(Armed {
            deadline: now + delay,
            schedule: Schedule::Once,
        })
    }

    /// Arm a repeating timer firing every `period`, first at `now + period`
    pub fn arm_interval(&mut self, now: Instant, period: Duration) -> TimerToken {
        let period = period.max(MIN_PERIOD);
        self.replace(Armed {
            deadline: now + period,
            schedule: Schedule::Every(period),
        })
    }

    /// Drop the live schedule; outstanding tokens become stale
    pub fn cancel(&mut self) {
        if self.armed.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|a| a.deadline)
    }

    /// Whether `token` belongs to the schedule that is live right now
    pub fn is_current(&self, token: TimerToken) -> bool {
        self.armed.is_some() && token.generation == self.generation
    }

    /// Fire the timer if its deadline has passed
    ///
    /// One-shot slots disarm when they fire. Interval slots re-arm one period
    /// after `now`; ticks missed while the host loop was busy are skipped
    /// rather than replayed.
    pub fn poll(&mut self, now: Instant) -> Option<TimerToken> {
        let armed = self.armed?;
        if now < armed.deadline {
            return None;
        }

        let token = TimerToken {
            generation: self.generation,
        };
        match armed.schedule {
            Schedule::Once => {
                self.armed = None;
                self.generation += 1;
            }
            Schedule::Every(period) => {
                self.armed = Some(Armed {
                    deadline: now + period,
                    schedule: armed.schedule,
                });
            }
        }
        Some(token)
    }

    fn replace(&mut self, armed: Armed) -> TimerToken {
        self.generation += 1;
        self.armed = Some(armed);
        TimerToken {
            generation: self.generation,
        }
    }
}
