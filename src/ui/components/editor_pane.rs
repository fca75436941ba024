use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::input::EditorBuffer;
use crate::ui::components::{panel, ACCENT_ERROR, ACCENT_WARNING, TEXT_BRIGHT, TEXT_FAINT};

/// The message editor with its inline diagnostic.
///
/// `error` is the outcome of the last operation; `diagnostic` is the live
/// syntax check of the buffer. The error wins when both are present.
pub struct EditorPane<'a> {
    buffer: &'a EditorBuffer,
    error: Option<&'a str>,
    diagnostic: Option<String>,
    focused: bool,
}

impl<'a> EditorPane<'a> {
    pub fn new(buffer: &'a EditorBuffer) -> Self {
        Self {
            buffer,
            error: None,
            diagnostic: None,
            focused: false,
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn diagnostic(mut self, diagnostic: Option<String>) -> Self {
        self.diagnostic = diagnostic;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel("Editor", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let status = match (self.error, self.diagnostic) {
            (Some(error), _) => Some((error.to_string(), ACCENT_ERROR)),
            (None, Some(diagnostic)) => Some((diagnostic, ACCENT_WARNING)),
            (None, None) => None,
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(u16::from(status.is_some())),
            ])
            .split(inner);

        if self.buffer.is_blank() && !self.focused {
            Paragraph::new("Paste A2UI JSON here (Tab to focus)")
                .style(Style::default().fg(TEXT_FAINT))
                .render(chunks[0], buf);
        } else {
            // Only the visible tail is laid out; the buffer can be large.
            let height = usize::from(chunks[0].height.max(1));
            let mut lines: Vec<Line> = self
                .buffer
                .text()
                .rsplit('\n')
                .take(height)
                .map(Line::raw)
                .collect();
            if self.focused {
                if let Some(last) = lines.first_mut() {
                    last.push_span("▏");
                }
            }
            lines.reverse();
            Paragraph::new(lines)
                .style(Style::default().fg(TEXT_BRIGHT))
                .render(chunks[0], buf);
        }

        if let Some((message, color)) = status {
            Paragraph::new(message)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }
    }
}
