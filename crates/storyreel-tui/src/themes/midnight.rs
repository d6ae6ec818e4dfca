//! Midnight: dark backdrop with warm accents

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0x12, 0x12, 0x16),
        surface: Color::Rgb(0x24, 0x24, 0x2c),
        foreground: Color::Rgb(0xf2, 0xf0, 0xeb),
        muted: Color::Rgb(0x8c, 0x8a, 0x94),
        accent: Color::Rgb(0xff, 0x5a, 0x7a),
        track: Color::Rgb(0x4a, 0x4a, 0x55),
        track_fill: Color::Rgb(0xf2, 0xf0, 0xeb),
        price: Color::Rgb(0xff, 0xc8, 0x57),
        error: Color::Rgb(0xea, 0x69, 0x62),
    }
}
