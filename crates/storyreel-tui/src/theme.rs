use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    /// Content backdrop
    pub background: Color,
    /// Chip and footer background
    pub surface: Color,
    pub foreground: Color,
    /// Secondary text (timestamps, hints)
    pub muted: Color,
    pub accent: Color,
    /// Unfilled progress segment
    pub track: Color,
    /// Filled progress segment
    pub track_fill: Color,
    pub price: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::midnight()
    }
}
