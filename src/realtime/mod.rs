//! The realtime push channel: a best-effort side signal for session
//! mutations. The wire contract is intentionally a dirty signal, not a
//! delta stream, so there is no payload to serialize — `notify` just wakes
//! every subscriber of a session, who then re-fetch the projection.

use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::domain::SessionId;

const CHANNEL_CAPACITY: usize = 64;

/// One broadcast channel per session. A fresh WebSocket subscriber that
/// arrives after a `notify` call will simply wait for the next one; the
/// initial HTTP/WS frame always carries a full projection, so missed
/// "changed" signals cannot cause stale state, only a delayed refresh.
#[derive(Clone, Default)]
pub struct SessionHub {
    channels: std::sync::Arc<DashMap<SessionId, broadcast::Sender<()>>>,
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to "changed" signals for `session_id`, creating the
    /// channel on first use.
    pub fn subscribe(&self, session_id: SessionId) -> broadcast::Receiver<()> {
        self.channels
            .entry(session_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Notifies all current subscribers of `session_id` that a committed
    /// mutation occurred. Called after the session lock is released, never
    /// while held; a send with zero subscribers is a no-op, matching the
    /// at-least-once-while-connected, best-effort contract.
    pub fn notify(&self, session_id: SessionId) {
        if let Some(sender) = self.channels.get(&session_id) {
            let _ = sender.send(());
        }
    }

    /// Drops the channel for a session that no longer exists (idle reaper,
    /// `end_game`).
    pub fn remove(&self, session_id: SessionId) {
        self.channels.remove(&session_id);
    }
}
