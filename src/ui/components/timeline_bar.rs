use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Gauge, Widget},
};

use crate::history::Cursor;
use crate::ui::components::{panel, ACCENT_PRIMARY, FOOTER_BG, TEXT_BRIGHT};

/// Playhead position over the history
pub struct TimelineBar {
    cursor: Cursor,
    len: usize,
    focused: bool,
}

impl TimelineBar {
    pub fn new(cursor: Cursor, len: usize) -> Self {
        Self {
            cursor,
            len,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// `applied / len`, e.g. `3 / 5`; `0 / 5` at the start.
    pub fn label(&self) -> String {
        format!("{} / {}", self.cursor.applied_len(), self.len)
    }

    pub fn ratio(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.cursor.applied_len() as f64 / self.len as f64
        }
    }
}

impl Widget for TimelineBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.cursor.is_start() {
            "Timeline (start)".to_string()
        } else if self.cursor.applied_len() == self.len {
            "Timeline (latest)".to_string()
        } else {
            "Timeline (rewound)".to_string()
        };
        let label = self.label();
        Gauge::default()
            .block(panel(&title, self.focused))
            .gauge_style(Style::default().fg(ACCENT_PRIMARY).bg(FOOTER_BG))
            .label(ratatui::text::Span::styled(
                label,
                Style::default().fg(TEXT_BRIGHT),
            ))
            .ratio(self.ratio())
            .render(area, buf);
    }
}
