use crate::history::HistoryEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Connected => "Connected",
        }
    }

    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Tracks which committed entries the presentation layer has not seen yet.
///
/// The reconciler never touches the history itself: live messages are
/// committed like manual ones. It only remembers how long the history was
/// at the last pass, so that a pass while connected yields the entries added
/// since, and a pass after a reset or truncation yields nothing.
#[derive(Debug, Default)]
pub struct StreamReconciler {
    state: ConnectionState,
    last_reconciled_len: usize,
}

impl StreamReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn last_reconciled_len(&self) -> usize {
        self.last_reconciled_len
    }

    /// `Disconnected -> Connecting`. Returns false if already connecting or
    /// connected.
    pub fn begin_connect(&mut self) -> bool {
        if self.state != ConnectionState::Disconnected {
            return false;
        }
        self.state = ConnectionState::Connecting;
        true
    }

    /// `Connecting -> Connected`. A late open after a disconnect is ignored.
    pub fn mark_connected(&mut self) -> bool {
        if self.state != ConnectionState::Connecting {
            tracing::debug!(state = ?self.state, "Ignoring stream open outside of connect");
            return false;
        }
        self.state = ConnectionState::Connected;
        true
    }

    pub fn mark_disconnected(&mut self) {
        self.state = ConnectionState::Disconnected;
    }

    /// Return the entries committed since the last pass that should be
    /// presented, and remember the current length.
    pub fn reconcile<'a>(&mut self, history: &'a [HistoryEntry]) -> &'a [HistoryEntry] {
        let len = history.len();
        if len < self.last_reconciled_len {
            tracing::trace!(
                len,
                last = self.last_reconciled_len,
                "History shrank, skipping reconciliation"
            );
            self.last_reconciled_len = len;
            return &[];
        }

        let fresh: &'a [HistoryEntry] = if self.state.is_connected() {
            &history[self.last_reconciled_len..]
        } else {
            &[]
        };
        self.last_reconciled_len = len;
        fresh
    }
}
