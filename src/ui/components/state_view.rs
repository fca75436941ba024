use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::ui::components::{panel, TEXT_SECONDARY};

/// Pretty-printed state inspector snapshot
pub struct StateView<'a> {
    json: &'a str,
}

impl<'a> StateView<'a> {
    pub fn new(json: &'a str) -> Self {
        Self { json }
    }
}

impl Widget for StateView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel("State", false);
        let inner = block.inner(area);
        block.render(area, buf);
        let lines: Vec<Line> = self
            .json
            .lines()
            .take(usize::from(inner.height))
            .map(Line::raw)
            .collect();
        Paragraph::new(lines)
            .style(Style::default().fg(TEXT_SECONDARY))
            .render(inner, buf);
    }
}
