//! Property tests for cursor tracking, replay determinism and reconciliation

use super::common::fixtures::{begin_rendering, data_update, delete_surface, text_update};
use a2ui_debugger::{
    inspect, Cursor, DebugSession, HistoryEntry, ProtocolMessage, StreamReconciler,
    SurfaceProcessor,
};
use proptest::prelude::*;

fn message_strategy() -> impl Strategy<Value = ProtocolMessage> {
    let surface = prop::sample::select(vec!["main", "side"]);
    prop_oneof![
        surface.clone().prop_map(|s| begin_rendering(s, "root")),
        (surface.clone(), "[a-z]{1,6}").prop_map(|(s, text)| text_update(s, "root", &text)),
        (surface.clone(), 0i64..100).prop_map(|(s, n)| data_update(s, "count", n)),
        surface.prop_map(delete_surface),
    ]
}

fn session_from(messages: &[ProtocolMessage]) -> DebugSession<SurfaceProcessor> {
    let mut session = DebugSession::new(SurfaceProcessor::new());
    for message in messages {
        session.commit(message.clone()).unwrap();
    }
    session
}

proptest! {
    /// Commits alone keep the playhead on the newest entry
    #[test]
    fn test_commits_keep_cursor_at_tail(messages in prop::collection::vec(message_strategy(), 1..30)) {
        let mut session = DebugSession::new(SurfaceProcessor::new());
        for (n, message) in messages.into_iter().enumerate() {
            session.commit(message).unwrap();
            prop_assert_eq!(session.cursor(), Cursor::at(n));
            prop_assert_eq!(session.cursor().position(), session.len() as isize - 1);
        }
    }

    /// Jumping to an index matches a fresh session fed the same prefix
    #[test]
    fn test_jump_matches_fresh_replay(
        messages in prop::collection::vec(message_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut session = session_from(&messages);
        let target = pick.index(messages.len());
        prop_assert!(session.jump_to(target as isize).unwrap());

        let fresh = session_from(&messages[..=target]);
        prop_assert_eq!(
            inspect::snapshot(session.surfaces()),
            inspect::snapshot(fresh.surfaces())
        );
        prop_assert_eq!(session.applied().len(), target + 1);
    }

    /// Reconciliation never yields an entry twice, whatever the length does
    #[test]
    fn test_reconciler_yields_each_entry_once(lengths in prop::collection::vec(0usize..20, 1..20)) {
        let log: Vec<HistoryEntry> = (0..20)
            .map(|n| HistoryEntry::new(data_update("main", "n", n)))
            .collect();
        let mut reconciler = StreamReconciler::new();
        reconciler.begin_connect();
        reconciler.mark_connected();

        let mut last = 0usize;
        for len in lengths {
            let fresh = reconciler.reconcile(&log[..len]);
            if len < last {
                prop_assert!(fresh.is_empty());
            } else {
                prop_assert_eq!(fresh.len(), len - last);
            }
            prop_assert!(reconciler.reconcile(&log[..len]).is_empty());
            last = len;
        }
    }
}
