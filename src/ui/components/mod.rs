mod editor_pane;
mod footer;
mod header;
mod key_hints;
mod message_log;
mod preview;
mod state_view;
mod timeline_bar;

use ratatui::style::Color;

pub use editor_pane::EditorPane;
pub use footer::Footer;
pub use header::Header;
pub use key_hints::{render_key_hints, KeyHintBarStyle};
pub use message_log::MessageLog;
pub use preview::Preview;
pub use state_view::StateView;
pub use timeline_bar::TimelineBar;

pub const ACCENT_PRIMARY: Color = Color::Rgb(52, 152, 219);
pub const ACCENT_SUCCESS: Color = Color::Rgb(46, 204, 113);
pub const ACCENT_WARNING: Color = Color::Rgb(241, 196, 15);
pub const ACCENT_ERROR: Color = Color::Rgb(231, 76, 60);
pub const TEXT_BRIGHT: Color = Color::Rgb(236, 240, 241);
pub const TEXT_SECONDARY: Color = Color::Rgb(189, 195, 199);
pub const TEXT_MUTED: Color = Color::Rgb(127, 140, 141);
pub const TEXT_FAINT: Color = Color::Rgb(88, 96, 105);
pub const BORDER_DEFAULT: Color = Color::Rgb(66, 73, 80);
pub const FOOTER_BG: Color = Color::Rgb(30, 33, 36);
pub const KEY_BG: Color = Color::Rgb(52, 58, 64);

/// Panel block with the border highlighted when focused.
pub(crate) fn panel(title: &str, focused: bool) -> ratatui::widgets::Block<'_> {
    use ratatui::style::Style;
    use ratatui::widgets::{Block, Borders};

    let border = if focused {
        ACCENT_PRIMARY
    } else {
        BORDER_DEFAULT
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(if focused { TEXT_BRIGHT } else { TEXT_SECONDARY }))
}
