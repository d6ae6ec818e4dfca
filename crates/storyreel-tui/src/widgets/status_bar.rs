use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use storyreel_core::config::KeymapConfig;
use storyreel_core::playback::PlaybackState;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: PlaybackState,
        status_message: Option<&str>,
        keymap: &KeymapConfig,
        theme: &Theme,
    ) {
        let mode_str = match state {
            PlaybackState::Playing => " PLAYING ",
            PlaybackState::Paused => " PAUSED ",
            PlaybackState::Closed => " CLOSED ",
        };

        let status_text = match status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {}/{} prev/next  {} hold  {} store  {} quit",
                keymap.previous, keymap.next, keymap.hold, keymap.view_store, keymap.quit
            ),
        };

        let padding_len = usize::from(area.width)
            .saturating_sub(mode_str.width() + status_text.width());

        let line = Line::from(vec![
            Span::styled(
                mode_str,
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                status_text,
                Style::default().fg(theme.foreground).bg(theme.surface),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.surface)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
