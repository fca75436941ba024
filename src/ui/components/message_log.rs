use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::history::{Cursor, HistoryEntry};
use crate::protocol::ProtocolMessage;
use crate::ui::components::{
    panel, ACCENT_ERROR, ACCENT_PRIMARY, BORDER_DEFAULT, KEY_BG, TEXT_FAINT, TEXT_MUTED,
    TEXT_SECONDARY,
};

/// The whole history, oldest first.
///
/// Entries past the cursor are dimmed. The selected row can be expanded to
/// show the full message JSON below the list.
pub struct MessageLog<'a> {
    entries: &'a [HistoryEntry],
    cursor: Cursor,
    selected: Option<usize>,
    expanded: bool,
}

impl<'a> MessageLog<'a> {
    pub fn new(entries: &'a [HistoryEntry], cursor: Cursor) -> Self {
        Self {
            entries,
            cursor,
            selected: None,
            expanded: false,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected.filter(|&index| index < self.entries.len());
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// The row the list keeps in view and the detail view shows.
    fn focus_row(&self) -> Option<usize> {
        self.selected.or(self.cursor.index())
    }

    /// Rows shown in a list of `height` lines: the tail, scrolled up far
    /// enough to keep the focused row visible.
    fn window(&self, height: u16) -> Range<usize> {
        let len = self.entries.len();
        let height = height as usize;
        let mut start = len.saturating_sub(height);
        if let Some(row) = self.focus_row() {
            start = start.min(row);
        }
        start..(start + height).min(len)
    }

    fn entry_line(&self, index: usize, entry: &HistoryEntry) -> Line<'static> {
        let message = entry.message();
        let pending = index >= self.cursor.applied_len();
        let label_color = match message {
            _ if pending => TEXT_FAINT,
            ProtocolMessage::Malformed { .. } => ACCENT_ERROR,
            ProtocolMessage::Unknown(_) => TEXT_MUTED,
            _ => ACCENT_PRIMARY,
        };
        let detail_color = if pending { TEXT_FAINT } else { TEXT_MUTED };
        let time = entry
            .timestamp()
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string();
        let marker = if self.selected == Some(index) { "›" } else { " " };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(ACCENT_PRIMARY)),
            Span::styled(format!("{index:>3} "), Style::default().fg(TEXT_FAINT)),
            Span::styled(format!("{time} "), Style::default().fg(detail_color)),
            Span::styled(message.label(), Style::default().fg(label_color)),
        ];
        if let Some(surface_id) = message.surface_id() {
            spans.push(Span::styled(
                format!(" {surface_id}"),
                Style::default().fg(detail_color),
            ));
        }

        let line = Line::from(spans);
        if self.selected == Some(index) {
            line.style(Style::default().bg(KEY_BG).add_modifier(Modifier::BOLD))
        } else {
            line
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .window(area.height)
            .map(|index| self.entry_line(index, &self.entries[index]))
            .collect();
        Paragraph::new(lines).render(area, buf);
    }

    fn render_detail(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(BORDER_DEFAULT));
        let Some(index) = self.focus_row() else {
            Paragraph::new("No entry selected")
                .style(Style::default().fg(TEXT_FAINT))
                .block(block)
                .render(area, buf);
            return;
        };

        let message = self.entries[index].message();
        let block = block.title(format!(" #{index} {} ", message.label()));
        let json = message.to_pretty_json();
        let lines: Vec<Line> = json.lines().map(|l| Line::from(l.to_string())).collect();
        Paragraph::new(lines)
            .style(Style::default().fg(TEXT_SECONDARY))
            .block(block)
            .render(area, buf);
    }
}

impl Widget for MessageLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            "Messages {}/{}",
            self.cursor.applied_len(),
            self.entries.len()
        );
        let block = panel(&title, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new("No messages yet")
                .style(Style::default().fg(TEXT_FAINT))
                .render(inner, buf);
            return;
        }

        if !self.expanded {
            self.render_list(inner, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(35), Constraint::Min(2)])
            .split(inner);
        self.render_list(chunks[0], buf);
        self.render_detail(chunks[1], buf);
    }
}
