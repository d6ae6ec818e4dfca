use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use storyreel_core::HeaderView;
use unicode_width::UnicodeWidthStr;

use super::text::{relative_age, truncate_to_width};
use crate::theme::Theme;

pub struct HeaderWidget;

impl HeaderWidget {
    /// Store identity on the first row, engagement chips on the second
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        header: &HeaderView,
        paused: bool,
        theme: &Theme,
        now: DateTime<Utc>,
    ) {
        if area.height == 0 {
            return;
        }
        let base = Style::default().fg(theme.foreground).bg(theme.background);
        frame.render_widget(Paragraph::new("").style(base), area);

        let top = Rect { height: 1, ..area };
        let state = if paused {
            Span::styled(
                "❚❚ paused ",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        };
        let state_width = state.width() as u16;

        let age = header
            .posted_at
            .map(|posted| format!(" · {}", relative_age(posted, now)))
            .unwrap_or_default();
        let chip = format!(" {} ", avatar_initial(&header.store_name));
        let reserved = chip.width() + 1 + age.width() + usize::from(state_width);
        let name = truncate_to_width(
            &header.store_name,
            usize::from(area.width).saturating_sub(reserved + 1),
        );

        let identity = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                chip,
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(age, Style::default().fg(theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(identity).style(base), top);
        frame.render_widget(
            Paragraph::new(Line::from(state))
                .style(base)
                .alignment(Alignment::Right),
            Rect {
                x: top.x + top.width.saturating_sub(state_width),
                width: state_width.min(top.width),
                ..top
            },
        );

        if area.height < 2 {
            return;
        }
        let bottom = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        let chip_style = Style::default().fg(theme.foreground).bg(theme.surface);
        let mut chips = vec![Span::raw(" ")];
        if let Some(likes) = header.likes {
            chips.push(Span::styled(format!(" ♥ {} ", likes), chip_style));
            chips.push(Span::raw(" "));
        }
        if let Some(orders) = header.orders {
            chips.push(Span::styled(format!(" {} ordered ", orders), chip_style));
        }
        frame.render_widget(Paragraph::new(Line::from(chips)).style(base), bottom);

        let position = format!(
            "story {}/{} · store {}/{} ",
            header.item_position,
            header.item_count,
            header.collection_position,
            header.collection_count
        );
        let position_width = (position.width() as u16).min(bottom.width);
        frame.render_widget(
            Paragraph::new(Span::styled(position, Style::default().fg(theme.muted))).style(base),
            Rect {
                x: bottom.x + bottom.width - position_width,
                width: position_width,
                ..bottom
            },
        );
    }
}

/// Avatar stand-in: the store name's first letter
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn header() -> HeaderView {
        HeaderView {
            store_id: "kicks".to_string(),
            store_name: "kicks lab".to_string(),
            avatar: None,
            likes: Some(12),
            orders: Some(3),
            posted_at: None,
            item_position: 2,
            item_count: 5,
            collection_position: 1,
            collection_count: 3,
        }
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_avatar_initial() {
        assert_eq!(avatar_initial("kicks lab"), "K");
        assert_eq!(avatar_initial("  @ünique"), "Ü");
        assert_eq!(avatar_initial(""), "?");
    }

    #[test]
    fn test_render_identity_and_chips() {
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                HeaderWidget::render(
                    frame,
                    Rect::new(0, 0, 60, 2),
                    &header(),
                    true,
                    &theme,
                    Utc::now(),
                )
            })
            .unwrap();

        let top = row(&terminal, 0);
        assert!(top.contains(" K "));
        assert!(top.contains("kicks lab"));
        assert!(top.contains("paused"));

        let bottom = row(&terminal, 1);
        assert!(bottom.contains("♥ 12"));
        assert!(bottom.contains("3 ordered"));
        assert!(bottom.contains("story 2/5 · store 1/3"));
    }
}
