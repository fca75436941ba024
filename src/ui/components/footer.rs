use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::components::{render_key_hints, KeyHintBarStyle};
use crate::ui::events::Focus;

/// Footer showing the shortcuts of the focused pane
pub struct Footer {
    hints: Vec<(&'static str, &'static str)>,
}

impl Footer {
    pub fn for_focus(focus: Focus) -> Self {
        let hints = match focus {
            Focus::Timeline => Self::timeline_hints(),
            Focus::Editor => Self::editor_hints(),
        };
        Self { hints }
    }

    pub fn timeline_hints() -> Vec<(&'static str, &'static str)> {
        vec![
            ("←/→", "step"),
            ("Home/End", "ends"),
            ("↑/↓", "select"),
            ("Enter", "jump"),
            ("d", "detail"),
            ("c", "connect"),
            ("x", "reset"),
            ("Tab", "editor"),
            ("q", "quit"),
        ]
    }

    pub fn editor_hints() -> Vec<(&'static str, &'static str)> {
        vec![
            ("C-s", "send"),
            ("C-l", "clear"),
            ("Esc", "timeline"),
            ("C-c", "quit"),
        ]
    }

    pub fn hints(&self) -> &[(&'static str, &'static str)] {
        &self.hints
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_key_hints(area, buf, &self.hints, KeyHintBarStyle::footer_bar());
    }
}
