use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};
use storyreel_core::progress::SegmentState;

use crate::theme::Theme;

const BAR: &str = "━";

pub struct ProgressTrackWidget;

impl ProgressTrackWidget {
    /// Render one bar per item of the current collection
    pub fn render(frame: &mut Frame, area: Rect, segments: &[SegmentState], theme: &Theme) {
        Self::draw(frame.buffer_mut(), area, segments, theme);
    }

    fn draw(buf: &mut Buffer, area: Rect, segments: &[SegmentState], theme: &Theme) {
        if area.height == 0 {
            return;
        }
        let fill_style = Style::default().fg(theme.track_fill).bg(theme.background);
        let track_style = Style::default().fg(theme.track).bg(theme.background);
        buf.set_style(area, Style::default().bg(theme.background));

        for ((offset, width), segment) in segment_spans(area.width, segments.len())
            .into_iter()
            .zip(segments)
        {
            let filled = (segment.fill() * f64::from(width)).round() as u16;
            for i in 0..width {
                let style = if i < filled { fill_style } else { track_style };
                if let Some(cell) = buf.cell_mut((area.x + offset + i, area.y)) {
                    cell.set_symbol(BAR).set_style(style);
                }
            }
        }
    }
}

/// Offset and width of each segment, separated by one-cell gaps
///
/// Leftover columns go to the leading segments. Gaps are dropped when the
/// area is too narrow to fit them.
pub fn segment_spans(width: u16, count: usize) -> Vec<(u16, u16)> {
    if count == 0 || width == 0 {
        return Vec::new();
    }
    let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
    let gap = if width >= count_u16.saturating_mul(2).saturating_sub(1) { 1 } else { 0 };
    let usable = width - gap * (count_u16.saturating_sub(1)).min(width);
    let base = usable / count_u16;
    let extra = usable % count_u16;

    let mut spans = Vec::with_capacity(count);
    let mut offset = 0u16;
    for i in 0..count_u16 {
        let w = base + u16::from(i < extra);
        spans.push((offset, w));
        offset = offset.saturating_add(w + gap);
    }
    spans
}
