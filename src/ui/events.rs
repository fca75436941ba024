use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Timeline,
    Editor,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Timeline => Focus::Editor,
            Focus::Editor => Focus::Timeline,
        }
    }
}

/// What a key press asks the console to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleFocus,
    FocusTimeline,
    StepBack,
    StepForward,
    JumpToStart,
    JumpToLatest,
    /// Move the log selection up
    SelectPrev,
    /// Move the log selection down
    SelectNext,
    JumpToSelected,
    ToggleDetail,
    ToggleConnection,
    Reset,
    Submit,
    ClearEditor,
    InsertChar(char),
    InsertNewline,
    Backspace,
}

/// Map a key press to an action for the focused pane.
pub fn action_for_key(focus: Focus, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if key.code == KeyCode::Tab {
        return Some(Action::ToggleFocus);
    }

    match focus {
        Focus::Timeline => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::StepBack),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::StepForward),
            KeyCode::Home => Some(Action::JumpToStart),
            KeyCode::End => Some(Action::JumpToLatest),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Enter => Some(Action::JumpToSelected),
            KeyCode::Char('d') => Some(Action::ToggleDetail),
            KeyCode::Char('c') => Some(Action::ToggleConnection),
            KeyCode::Char('x') => Some(Action::Reset),
            KeyCode::Char('i') => Some(Action::ToggleFocus),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Focus::Editor => match key.code {
            KeyCode::Char('s') if ctrl => Some(Action::Submit),
            KeyCode::Char('l') if ctrl => Some(Action::ClearEditor),
            KeyCode::Esc => Some(Action::FocusTimeline),
            KeyCode::Enter => Some(Action::InsertNewline),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) if !ctrl => Some(Action::InsertChar(c)),
            _ => None,
        },
    }
}
