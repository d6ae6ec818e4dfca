mod controller;
mod cursor;
mod timer;

pub use controller::{PlaybackController, PlaybackState, TickOutcome};
pub use cursor::{Cursor, Step};
pub use timer::{TimerSlot, TimerToken};
