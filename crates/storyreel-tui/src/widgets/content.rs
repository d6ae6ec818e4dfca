use std::time::Instant;

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use storyreel_core::presenter::{ContentPresenter, MediaStatus};
use storyreel_core::story::StoryItem;

use super::text::{format_clock, truncate_to_width};
use crate::media::ImageCache;
use crate::theme::Theme;

pub struct ContentWidget;

impl ContentWidget {
    /// Render the mounted item's media with its caption overlaid at the bottom
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        item: Option<&StoryItem>,
        presenter: &ContentPresenter,
        images: &mut ImageCache,
        show_captions: bool,
        theme: &Theme,
        now: Instant,
    ) {
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(theme.background)),
            area,
        );
        let Some(item) = item else {
            return;
        };

        let caption = item.caption.as_deref().filter(|_| show_captions);
        let media_area = if caption.is_some() {
            Rect {
                height: area.height.saturating_sub(1),
                ..area
            }
        } else {
            area
        };

        match presenter.status() {
            MediaStatus::Failed(reason) => {
                Self::render_message(
                    frame,
                    media_area,
                    &format!("Could not load media: {}", reason),
                    Style::default().fg(theme.error),
                    theme,
                );
            }
            _ if item.is_clip() => Self::render_clip(frame, media_area, item, presenter, theme, now),
            MediaStatus::Ready => {
                match images.fit(&item.id, media_area.width, media_area.height) {
                    Some(pixels) => render_halfblocks(frame.buffer_mut(), media_area, pixels),
                    None => Self::render_message(
                        frame,
                        media_area,
                        "Image not loaded",
                        Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
                        theme,
                    ),
                }
            }
            _ => Self::render_message(
                frame,
                media_area,
                "Loading…",
                Style::default().fg(theme.muted).add_modifier(Modifier::BOLD),
                theme,
            ),
        }

        if let Some(caption) = caption {
            let caption_area = Rect {
                y: area.y + area.height.saturating_sub(1),
                height: area.height.min(1),
                ..area
            };
            let text = truncate_to_width(caption, usize::from(area.width.saturating_sub(2)));
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(theme.foreground),
                )))
                .style(Style::default().bg(theme.surface))
                .alignment(Alignment::Center),
                caption_area,
            );
        }
    }

    /// Placeholder frame for a clip: kind, file name and play head
    fn render_clip(
        frame: &mut Frame,
        area: Rect,
        item: &StoryItem,
        presenter: &ContentPresenter,
        theme: &Theme,
        now: Instant,
    ) {
        let (badge, badge_style) = match presenter.status() {
            MediaStatus::Playing => (
                "▶ CLIP",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            MediaStatus::Finished => ("■ CLIP", Style::default().fg(theme.muted)),
            _ => ("❚❚ CLIP", Style::default().fg(theme.accent)),
        };
        let name = item
            .source
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&item.source)
            .to_string();

        let mut lines = vec![
            Line::from(Span::styled(badge, badge_style)),
            Line::from(Span::styled(
                truncate_to_width(&name, usize::from(area.width.saturating_sub(2))),
                Style::default().fg(theme.muted),
            )),
        ];
        if let Some((position, length)) = presenter.clip_position(now) {
            let bar_width = usize::from(area.width.saturating_sub(14)).min(30);
            let fraction = if length.is_zero() {
                1.0
            } else {
                (position.as_secs_f64() / length.as_secs_f64()).clamp(0.0, 1.0)
            };
            let filled = (fraction * bar_width as f64).round() as usize;
            lines.push(Line::from(vec![
                Span::styled(format_clock(position), Style::default().fg(theme.foreground)),
                Span::raw(" "),
                Span::styled("━".repeat(filled), Style::default().fg(theme.track_fill)),
                Span::styled(
                    "━".repeat(bar_width - filled.min(bar_width)),
                    Style::default().fg(theme.track),
                ),
                Span::raw(" "),
                Span::styled(format_clock(length), Style::default().fg(theme.muted)),
            ]));
        }

        let height = lines.len() as u16;
        let centered = Rect {
            y: area.y + area.height.saturating_sub(height) / 2,
            height: height.min(area.height),
            ..area
        };
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().bg(theme.background))
                .alignment(Alignment::Center),
            centered,
        );
    }

    fn render_message(frame: &mut Frame, area: Rect, message: &str, style: Style, theme: &Theme) {
        if area.height == 0 {
            return;
        }
        let centered = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
                .style(Style::default().bg(theme.background))
                .alignment(Alignment::Center),
            centered,
        );
    }
}

/// Draw pre-scaled pixels centered in `area`, two pixels per cell
fn render_halfblocks(buf: &mut Buffer, area: Rect, pixels: &RgbaImage) {
    let (width, height) = pixels.dimensions();
    let rows = height.div_ceil(2);
    let x_offset = u32::from(area.width).saturating_sub(width) / 2;
    let y_offset = u32::from(area.height).saturating_sub(rows) / 2;

    for row in 0..rows.min(u32::from(area.height)) {
        let y = row * 2;
        for x in 0..width.min(u32::from(area.width)) {
            let top = pixels.get_pixel(x, y);
            let bottom = if y + 1 < height {
                pixels.get_pixel(x, y + 1)
            } else {
                top
            };
            let position = (
                area.x + (x_offset + x) as u16,
                area.y + (y_offset + row) as u16,
            );
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_symbol("▀")
                    .set_fg(Color::Rgb(top[0], top[1], top[2]))
                    .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use image::{DynamicImage, Rgba};
    use ratatui::{backend::TestBackend, Terminal};
    use storyreel_core::story::MediaKind;

    use crate::media::ImageLoadResult;

    fn item(kind: MediaKind, caption: Option<&str>) -> StoryItem {
        StoryItem {
            id: "s-1".to_string(),
            kind,
            source: "/media/spring/look-1.mp4".to_string(),
            duration_ms: Some(10_000),
            product: None,
            caption: caption.map(str::to_string),
            posted_at: None,
        }
    }

    fn text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    fn draw(
        item: &StoryItem,
        presenter: &ContentPresenter,
        images: &mut ImageCache,
        now: Instant,
    ) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                ContentWidget::render(
                    frame,
                    area,
                    Some(item),
                    presenter,
                    images,
                    true,
                    &theme,
                    now,
                )
            })
            .unwrap();
        terminal
    }

    #[test]
    fn test_clip_placeholder_shows_play_head() {
        let start = Instant::now();
        let clip = item(MediaKind::Clip, Some("Spring drop"));
        let mut presenter = ContentPresenter::new(Duration::from_secs(15));
        presenter.mount(&clip, start);

        let terminal = draw(&clip, &presenter, &mut ImageCache::new(), start + Duration::from_secs(4));
        let rendered = text(&terminal);
        assert!(rendered.contains("CLIP"));
        assert!(rendered.contains("look-1.mp4"));
        assert!(rendered.contains("0:04"));
        assert!(rendered.contains("0:10"));
        assert!(rendered.contains("Spring drop"));
    }

    #[test]
    fn test_loading_and_failed_states() {
        let start = Instant::now();
        let image = item(MediaKind::Image, None);
        let mut presenter = ContentPresenter::new(Duration::from_secs(15));
        presenter.mount(&image, start);

        let rendered = text(&draw(&image, &presenter, &mut ImageCache::new(), start));
        assert!(rendered.contains("Loading…"));

        presenter.fail("s-1", "file not found");
        let rendered = text(&draw(&image, &presenter, &mut ImageCache::new(), start));
        assert!(rendered.contains("Could not load media: file not found"));
    }

    #[test]
    fn test_ready_image_renders_halfblocks() {
        let start = Instant::now();
        let image = item(MediaKind::Image, None);
        let mut presenter = ContentPresenter::new(Duration::from_secs(15));
        presenter.mount(&image, start);
        presenter.ready("s-1");

        let mut images = ImageCache::new();
        images.finish(ImageLoadResult::Success {
            item_id: "s-1".to_string(),
            image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                20,
                20,
                Rgba([10, 200, 30, 255]),
            )),
        });

        let terminal = draw(&image, &presenter, &mut images, start);
        let buffer = terminal.backend().buffer();
        // 20x20 into 40x10 cells (40x20 pixels): 20 columns centered at x=10
        let center = buffer.cell((20, 5)).unwrap();
        assert_eq!(center.symbol(), "▀");
        assert!(matches!(center.fg, Color::Rgb(_, g, _) if g > 150));
        assert_eq!(buffer.cell((2, 5)).unwrap().symbol(), " ");
    }
}
