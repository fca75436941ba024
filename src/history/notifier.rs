use tokio::sync::watch;

/// Version counter bumped after every history or cursor mutation.
///
/// The processor mutates in place, so readers key anything they derive from
/// it on [`ChangeNotifier::version`] and re-read after each change.
#[derive(Debug)]
pub struct ChangeNotifier {
    tx: watch::Sender<u64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Bump the version and wake subscribers. Returns the new version.
    pub fn notify(&self) -> u64 {
        self.tx.send_modify(|version| *version += 1);
        self.version()
    }

    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
