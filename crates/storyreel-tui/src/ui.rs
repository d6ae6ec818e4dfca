use std::time::Instant;

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use storyreel_core::playback::PlaybackState;
use storyreel_core::StoryHost;

use crate::app::App;
use crate::widgets::{
    ContentWidget, FooterWidget, HeaderWidget, ProgressTrackWidget, StatusBarWidget,
};

/// Screen regions of the story viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerLayout {
    pub track: Rect,
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
    pub status: Rect,
}

impl ViewerLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Progress track
                Constraint::Length(2), // Header chips
                Constraint::Min(1),    // Media
                Constraint::Length(2), // Product footer
                Constraint::Length(1), // Status bar
            ])
            .split(area);
        Self {
            track: rows[0],
            header: rows[1],
            content: rows[2],
            footer: rows[3],
            status: rows[4],
        }
    }
}

/// Draw one frame and record the content area for tap zones
pub fn render<H: StoryHost>(frame: &mut Frame, app: &mut App<H>, now: Instant) {
    let layout = ViewerLayout::new(frame.area());
    app.set_content_area(layout.content);

    let segments = app.viewer.segments();
    ProgressTrackWidget::render(frame, layout.track, &segments, &app.theme);

    if let Some(header) = app.viewer.header() {
        let paused = app.viewer.state() == PlaybackState::Paused;
        HeaderWidget::render(frame, layout.header, &header, paused, &app.theme, Utc::now());
    }

    ContentWidget::render(
        frame,
        layout.content,
        app.viewer.current_item(),
        app.viewer.presenter(),
        &mut app.images,
        app.config.ui.show_captions,
        &app.theme,
        now,
    );

    let footer = app.viewer.footer();
    FooterWidget::render(
        frame,
        layout.footer,
        footer.as_ref(),
        &app.config.keymap,
        &app.theme,
    );

    StatusBarWidget::render(
        frame,
        layout.status,
        app.viewer.state(),
        app.status_message.as_deref(),
        &app.config.keymap,
        &app.theme,
    );
}
