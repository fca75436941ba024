use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::stream::ConnectionState;
use crate::ui::components::{
    ACCENT_PRIMARY, ACCENT_SUCCESS, ACCENT_WARNING, TEXT_FAINT, TEXT_MUTED, TEXT_SECONDARY,
};

/// Title line with the live connection status
pub struct Header<'a> {
    connection: ConnectionState,
    url: &'a str,
    notice: Option<&'a str>,
}

impl<'a> Header<'a> {
    pub fn new(connection: ConnectionState, url: &'a str) -> Self {
        Self {
            connection,
            url,
            notice: None,
        }
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status_color = match self.connection {
            ConnectionState::Connected => ACCENT_SUCCESS,
            ConnectionState::Connecting => ACCENT_WARNING,
            ConnectionState::Disconnected => TEXT_FAINT,
        };

        let mut spans = vec![
            Span::styled(
                " A2UI Debugger ",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("● ", Style::default().fg(status_color)),
            Span::styled(self.connection.label(), Style::default().fg(TEXT_SECONDARY)),
            Span::styled(format!("  {}", self.url), Style::default().fg(TEXT_MUTED)),
        ];
        if let Some(notice) = self.notice {
            spans.push(Span::styled(
                format!("  {notice}"),
                Style::default().fg(TEXT_SECONDARY),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
