use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::ui::components::{panel, TEXT_BRIGHT, TEXT_FAINT, TEXT_SECONDARY};

/// Rendered component trees of every surface
pub struct Preview<'a> {
    lines: &'a [String],
}

impl<'a> Preview<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines }
    }
}

impl Widget for Preview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel("Preview", false);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .lines
            .iter()
            .take(usize::from(inner.height))
            .map(|line| {
                let color = if line.starts_with("Surface: ") {
                    TEXT_BRIGHT
                } else if line.trim_start().starts_with('(') || line.starts_with("No surfaces") {
                    TEXT_FAINT
                } else {
                    TEXT_SECONDARY
                };
                Line::styled(line.as_str(), Style::default().fg(color))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
