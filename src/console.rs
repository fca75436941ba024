//! The debugging console: session, live stream bookkeeping and editor wired
//! together behind the operations the UI calls.

use crate::history::{DebugSession, SessionError};
use crate::input::{parse_payload, validate, EditorBuffer, InputError};
use crate::processor::StateProcessor;
use crate::stream::{ConnectionState, StreamEvent, StreamReconciler};

/// Result of submitting the editor buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub committed: usize,
    pub cleared: bool,
}

#[derive(Debug)]
pub struct Console<P> {
    session: DebugSession<P>,
    reconciler: StreamReconciler,
    editor: EditorBuffer,
    error: Option<String>,
    notice: Option<String>,
}

impl<P: StateProcessor> Console<P> {
    pub fn new(processor: P) -> Self {
        Self {
            session: DebugSession::new(processor),
            reconciler: StreamReconciler::new(),
            editor: EditorBuffer::new(),
            error: None,
            notice: None,
        }
    }

    pub fn session(&self) -> &DebugSession<P> {
        &self.session
    }

    pub fn editor(&self) -> &EditorBuffer {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorBuffer {
        &mut self.editor
    }

    pub fn connection(&self) -> ConnectionState {
        self.reconciler.state()
    }

    /// Last operation error, shown until the next operation succeeds.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Inline syntax diagnostic for the current buffer.
    pub fn diagnostic(&self) -> Option<InputError> {
        validate(self.editor.text())
    }

    /// Parse the editor buffer and commit every message it yields.
    ///
    /// Committing stops at the first rejected message. The buffer is only
    /// cleared when everything parsed and applied.
    pub fn submit_input(&mut self) -> SubmitOutcome {
        let parsed = parse_payload(self.editor.text());
        let mut outcome = SubmitOutcome::default();
        let mut failure = parsed.error.map(|err| err.to_string());

        for message in parsed.messages {
            match self.session.commit(message) {
                Ok(_) => outcome.committed += 1,
                Err(err) => {
                    outcome.committed += 1;
                    failure = Some(err.to_string());
                    break;
                }
            }
        }

        tracing::debug!(
            committed = outcome.committed,
            failed = failure.is_some(),
            "Submitted editor payload"
        );

        if failure.is_none() {
            self.editor.clear();
            outcome.cleared = true;
        }
        self.error = failure;
        self.reconcile();
        outcome
    }

    /// Mark the stream as connecting. Returns false if one is already open.
    pub fn begin_connect(&mut self) -> bool {
        let started = self.reconciler.begin_connect();
        if started {
            self.notice = Some("Connecting...".to_string());
        }
        started
    }

    pub fn disconnected(&mut self) {
        self.reconciler.mark_disconnected();
        self.notice = Some("Disconnected".to_string());
    }

    pub fn on_stream_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Opened => {
                if self.reconciler.mark_connected() {
                    self.notice = Some("Connected".to_string());
                }
            }
            StreamEvent::Message(message) => {
                if !self.reconciler.state().is_connected() {
                    tracing::debug!("Dropping stream message received while not connected");
                    return;
                }
                let result = self.session.commit(message);
                self.record(result.map(|_| ()));
            }
            StreamEvent::Rejected { data, error } => {
                tracing::warn!(%error, data, "Dropping non-JSON stream payload");
                self.notice = Some(format!("Ignored non-JSON stream payload: {error}"));
            }
            StreamEvent::Failed(reason) => {
                self.reconciler.mark_disconnected();
                self.notice = Some(format!("Stream error: {reason}"));
            }
            StreamEvent::Closed => {
                if self.reconciler.state() != ConnectionState::Disconnected {
                    self.disconnected();
                }
            }
        }
        self.reconcile();
    }

    pub fn jump_to(&mut self, position: isize) -> bool {
        let result = self.session.jump_to(position);
        self.navigated(result)
    }

    pub fn step_back(&mut self) -> bool {
        let result = self.session.step_back();
        self.navigated(result)
    }

    pub fn step_forward(&mut self) -> bool {
        let result = self.session.step_forward();
        self.navigated(result)
    }

    pub fn jump_to_start(&mut self) -> bool {
        let result = self.session.jump_to_start();
        self.navigated(result)
    }

    pub fn jump_to_latest(&mut self) -> bool {
        let result = self.session.jump_to_latest();
        self.navigated(result)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.error = None;
        self.notice = Some("History cleared".to_string());
        self.reconcile();
    }

    /// Replace the session with previously recorded messages.
    pub fn load(&mut self, text: &str) -> Result<usize, String> {
        let parsed = parse_payload(text);
        if let Some(err) = parsed.error {
            return Err(err.to_string());
        }
        let count = parsed.messages.len();
        let result = self.session.load_history(parsed.messages);
        self.record(result);
        self.reconcile();
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(count),
        }
    }

    fn navigated(&mut self, result: Result<bool, SessionError>) -> bool {
        let moved = match result {
            Ok(moved) => {
                if moved {
                    self.error = None;
                }
                moved
            }
            Err(err) => {
                self.error = Some(err.to_string());
                true
            }
        };
        self.reconcile();
        moved
    }

    fn record(&mut self, result: Result<(), SessionError>) {
        self.error = result.err().map(|err| err.to_string());
    }

    fn reconcile(&mut self) {
        let fresh = self.reconciler.reconcile(self.session.history());
        if !fresh.is_empty() {
            self.editor
                .append_messages(fresh.iter().map(|entry| entry.message()));
        }
    }
}

impl<P: StateProcessor + Default> Default for Console<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}
