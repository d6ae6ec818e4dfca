//! Daylight: light backdrop for bright terminals

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0xfa, 0xf8, 0xf5),
        surface: Color::Rgb(0xe8, 0xe4, 0xdd),
        foreground: Color::Rgb(0x22, 0x20, 0x1c),
        muted: Color::Rgb(0x7a, 0x76, 0x70),
        accent: Color::Rgb(0xd6, 0x33, 0x5a),
        track: Color::Rgb(0xc8, 0xc3, 0xbb),
        track_fill: Color::Rgb(0x22, 0x20, 0x1c),
        price: Color::Rgb(0xb3, 0x6b, 0x00),
        error: Color::Rgb(0xc0, 0x39, 0x2b),
    }
}
