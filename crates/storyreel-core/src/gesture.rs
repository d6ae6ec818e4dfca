//! Pointer gesture classification
//!
//! Pure mapping from one input event plus the content area's geometry to a
//! navigation [`Command`]. Only displacement is considered; there is no
//! velocity or timing component.

/// Left/right tap zones as a fraction of content width
pub const TAP_EDGE_RATIO: f64 = 0.25;
/// Minimum vertical travel for a swipe, in logical pixels
pub const SWIPE_MIN_DISTANCE: f64 = 100.0;
/// Maximum horizontal drift still accepted as a vertical swipe
pub const SWIPE_MAX_DRIFT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Content area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Raw pointer input, already reduced to the four shapes the viewer knows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    /// Short press and release at a point
    Tap(Point),
    /// Pointer went down; starts a hold
    PressStart,
    /// Pointer released; ends a hold
    PressEnd,
    /// Touch start and end points of a drag
    Swipe { start: Point, end: Point },
}

/// Playback intent consumed by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Previous,
    Next,
    HoldStart,
    HoldEnd,
    /// Swipe down: close the viewer
    SwipeClose,
    /// Swipe up on an item with a product: open its detail page
    SwipeOpenProduct,
    /// Explicit close (keyboard, close button)
    Close,
}

/// Classify one input event
///
/// `has_product` gates the swipe-up gesture; without an attached product a
/// swipe up is inert.
pub fn classify(input: GestureInput, bounds: Bounds, has_product: bool) -> Option<Command> {
    match input {
        GestureInput::Tap(point) => classify_tap(point, bounds),
        GestureInput::PressStart => Some(Command::HoldStart),
        GestureInput::PressEnd => Some(Command::HoldEnd),
        GestureInput::Swipe { start, end } => classify_swipe(start, end, has_product),
    }
}

fn classify_tap(point: Point, bounds: Bounds) -> Option<Command> {
    if bounds.width <= 0.0 {
        return None;
    }
    let x = point.x - bounds.x;
    if x < bounds.width * TAP_EDGE_RATIO {
        Some(Command::Previous)
    } else if x > bounds.width * (1.0 - TAP_EDGE_RATIO) {
        Some(Command::Next)
    } else {
        // Middle band is reserved for on-screen controls
        None
    }
}

fn classify_swipe(start: Point, end: Point, has_product: bool) -> Option<Command> {
    let dy = start.y - end.y;
    let dx = start.x - end.x;

    if dx.abs() >= SWIPE_MAX_DRIFT {
        return None;
    }
    if dy < -SWIPE_MIN_DISTANCE {
        Some(Command::SwipeClose)
    } else if dy > SWIPE_MIN_DISTANCE && has_product {
        Some(Command::SwipeOpenProduct)
    } else {
        None
    }
}
