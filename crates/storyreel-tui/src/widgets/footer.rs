use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use storyreel_core::config::KeymapConfig;
use storyreel_core::FooterView;
use unicode_width::UnicodeWidthStr;

use super::text::truncate_to_width;
use crate::theme::Theme;

pub struct FooterWidget;

impl FooterWidget {
    /// Product call to action, or a close hint when the item has no product
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        footer: Option<&FooterView>,
        keymap: &KeymapConfig,
        theme: &Theme,
    ) {
        if area.height == 0 {
            return;
        }
        let base = Style::default().fg(theme.foreground).bg(theme.surface);
        frame.render_widget(Paragraph::new("").style(base), area);

        let Some(footer) = footer else {
            let hint = Line::from(Span::styled(
                format!("swipe down or {} to close", keymap.quit),
                Style::default().fg(theme.muted),
            ));
            frame.render_widget(
                Paragraph::new(hint).style(base).alignment(Alignment::Center),
                Rect {
                    y: area.y + area.height - 1,
                    height: 1,
                    ..area
                },
            );
            return;
        };

        let top = Rect { height: 1, ..area };
        let price = format!("{} ", footer.price);
        let name_width = usize::from(top.width).saturating_sub(price.width() + 2);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    truncate_to_width(&footer.name, name_width),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
            .style(base),
            top,
        );
        let price_area = right_aligned(top, price.width());
        frame.render_widget(
            Paragraph::new(Span::styled(
                price,
                Style::default().fg(theme.price).add_modifier(Modifier::BOLD),
            ))
            .style(base),
            price_area,
        );

        if area.height < 2 {
            return;
        }
        let bottom = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        let mut sizes = vec![Span::raw(" ")];
        for size in &footer.sizes {
            sizes.push(Span::styled(
                format!("[{}]", size),
                Style::default().fg(theme.muted),
            ));
            sizes.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(sizes)).style(base), bottom);

        let key = Style::default().fg(theme.accent);
        let label = Style::default().fg(theme.foreground);
        let actions = Line::from(vec![
            Span::styled(keymap.view_product.clone(), key),
            Span::styled(" view  ", label),
            Span::styled(keymap.add_to_cart.clone(), key),
            Span::styled(" add to cart ", label),
        ]);
        let actions_area = right_aligned(bottom, actions.width());
        frame.render_widget(Paragraph::new(actions).style(base), actions_area);
    }
}

/// The rightmost `width` columns of a one-row area
fn right_aligned(area: Rect, width: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    Rect {
        x: area.x + area.width - width,
        width,
        ..area
    }
}
