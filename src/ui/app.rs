use std::io;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::console::Console;
use crate::inspect;
use crate::processor::SurfaceProcessor;
use crate::stream::{LiveStream, StreamEvent};
use crate::ui::components::{
    EditorPane, Footer, Header, MessageLog, Preview, StateView, TimelineBar,
};
use crate::ui::events::{action_for_key, Action, Focus};
use crate::ui::terminal_guard::TerminalGuard;

/// How often the derived panes were rebuilt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Preview and state snapshot rebuilds
    pub state_refreshes: u64,
    /// Editor diagnostic runs
    pub diagnostic_refreshes: u64,
}

/// Pane contents derived from the session and the editor.
///
/// The state panes are keyed on the session's change version, the
/// diagnostic on the editor revision.
#[derive(Debug, Default)]
struct ViewCache {
    version: Option<u64>,
    preview: Vec<String>,
    state_json: String,
    editor_revision: Option<u64>,
    diagnostic: Option<String>,
    stats: RenderStats,
}

/// Main application state
pub struct App {
    config: Config,
    console: Console<SurfaceProcessor>,
    focus: Focus,
    /// Highlighted row of the message log
    selected: Option<usize>,
    /// Whether the message log shows the selected message's JSON
    detail: bool,
    view: ViewCache,
    /// The open live stream, if any
    stream: Option<LiveStream>,
    /// Events of the open stream. Replaced on every connect so events from
    /// an earlier connection never reach the console.
    stream_rx: Option<mpsc::UnboundedReceiver<StreamEvent>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            console: Console::default(),
            focus: Focus::default(),
            selected: None,
            detail: false,
            view: ViewCache::default(),
            stream: None,
            stream_rx: None,
            should_quit: false,
        }
    }

    pub fn console(&self) -> &Console<SurfaceProcessor> {
        &self.console
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn detail(&self) -> bool {
        self.detail
    }

    pub fn render_stats(&self) -> RenderStats {
        self.view.stats
    }

    /// Replace the history with a recorded payload.
    pub fn load_history(&mut self, text: &str) -> Result<usize, String> {
        self.console.load(text)
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        if self.config.stream.auto_connect {
            self.toggle_connection();
        }

        let result = self.event_loop(&mut terminal).await;

        self.disconnect();
        guard.restore()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let tick = self.config.ui.tick;
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = tokio::time::sleep(tick) => {
                    while event::poll(std::time::Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key) => self.handle_key_event(key),
                            Event::Paste(text) => self.handle_paste(&text),
                            _ => {}
                        }
                    }
                }

                event = next_stream_event(&mut self.stream_rx) => {
                    match event {
                        Some(event) => self.handle_stream_event(event),
                        None => self.stream_rx = None,
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = action_for_key(self.focus, key) {
            self.dispatch(action);
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.focus = Focus::Editor;
        self.console.editor_mut().insert_str(text);
    }

    pub fn handle_stream_event(&mut self, event: StreamEvent) {
        let finished = matches!(event, StreamEvent::Failed(_) | StreamEvent::Closed);
        self.console.on_stream_event(event);
        if finished {
            self.stream = None;
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleFocus => self.focus = self.focus.toggle(),
            Action::FocusTimeline => self.focus = Focus::Timeline,
            Action::StepBack => {
                self.console.step_back();
            }
            Action::StepForward => {
                self.console.step_forward();
            }
            Action::JumpToStart => {
                self.console.jump_to_start();
            }
            Action::JumpToLatest => {
                self.console.jump_to_latest();
            }
            Action::SelectPrev => self.move_selection(-1),
            Action::SelectNext => self.move_selection(1),
            Action::JumpToSelected => {
                if let Some(index) = self.selection() {
                    self.console.jump_to(index as isize);
                }
            }
            Action::ToggleDetail => self.detail = !self.detail,
            Action::ToggleConnection => self.toggle_connection(),
            Action::Reset => self.console.reset(),
            Action::Submit => {
                self.console.submit_input();
            }
            Action::ClearEditor => self.console.editor_mut().clear(),
            Action::InsertChar(c) => self.console.editor_mut().insert_char(c),
            Action::InsertNewline => self.console.editor_mut().newline(),
            Action::Backspace => self.console.editor_mut().backspace(),
        }
    }

    /// Open the configured stream, or close the open one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle_connection(&mut self) {
        if self.stream.is_some() {
            self.disconnect();
            return;
        }
        if !self.console.begin_connect() {
            return;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        match LiveStream::connect(&self.config.stream.url, tx) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.stream_rx = Some(rx);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open live stream");
                self.console.on_stream_event(StreamEvent::Failed(e.to_string()));
            }
        }
    }

    /// The selected row, if it still exists.
    fn selection(&self) -> Option<usize> {
        self.selected.filter(|&index| index < self.console.session().len())
    }

    /// Move the log selection, starting from the playhead row.
    fn move_selection(&mut self, delta: isize) {
        let session = self.console.session();
        let Some(last) = session.len().checked_sub(1) else {
            self.selected = None;
            return;
        };
        self.selected = Some(match self.selection() {
            Some(index) => index.saturating_add_signed(delta).min(last),
            None => session.cursor().index().unwrap_or(0),
        });
    }

    /// Rebuild whatever changed since the last frame.
    fn refresh_view(&mut self) {
        let session = self.console.session();
        let version = session.version();
        if self.view.version != Some(version) {
            self.view.preview = inspect::preview_lines(session.surfaces());
            self.view.state_json = inspect::snapshot_json(session.surfaces());
            self.view.version = Some(version);
            self.view.stats.state_refreshes += 1;
        }

        let revision = self.console.editor().revision();
        if self.view.editor_revision != Some(revision) {
            self.view.diagnostic = self.console.diagnostic().map(|e| e.to_string());
            self.view.editor_revision = Some(revision);
            self.view.stats.diagnostic_refreshes += 1;
        }

        self.selected = self.selection();
    }

    fn disconnect(&mut self) {
        self.stream_rx = None;
        if let Some(stream) = self.stream.take() {
            stream.disconnect();
            self.console.disconnected();
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        self.refresh_view();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let session = self.console.session();

        f.render_widget(
            Header::new(self.console.connection(), &self.config.stream.url)
                .notice(self.console.notice()),
            rows[0],
        );
        f.render_widget(
            EditorPane::new(self.console.editor())
                .error(self.console.error())
                .diagnostic(self.view.diagnostic.clone())
                .focused(self.focus == Focus::Editor),
            left[0],
        );
        f.render_widget(
            MessageLog::new(session.history(), session.cursor())
                .selected(self.selected)
                .expanded(self.detail),
            left[1],
        );
        f.render_widget(Preview::new(&self.view.preview), right[0]);
        f.render_widget(StateView::new(&self.view.state_json), right[1]);
        f.render_widget(
            TimelineBar::new(session.cursor(), session.len())
                .focused(self.focus == Focus::Timeline),
            rows[2],
        );
        f.render_widget(Footer::for_focus(self.focus), rows[3]);
    }
}

async fn next_stream_event(
    rx: &mut Option<mpsc::UnboundedReceiver<StreamEvent>>,
) -> Option<StreamEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
