//! The idle-session reaper: interval tick, sweep, log, metric, repeat.

use std::time::Duration;

use chrono::Utc;

use super::GameServer;

impl GameServer {
    /// Periodically removes sessions that have had no activity for longer
    /// than `idle_timeout`. This is bookkeeping hygiene, not game logic: it
    /// never touches mortality, votes, or phase of a live session.
    pub async fn cleanup_task(&self, interval: Duration, idle_timeout: chrono::Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let now = Utc::now();
            let idle: Vec<_> = self
                .store
                .snapshot_activity()
                .await
                .into_iter()
                .filter(|(_, last_activity)| now - *last_activity > idle_timeout)
                .map(|(id, _)| id)
                .collect();

            if idle.is_empty() {
                continue;
            }

            for session_id in &idle {
                self.store.delete_session(*session_id).await;
                self.hub.remove(*session_id);
            }
            self.metrics.add_sessions_reaped(idle.len() as u64);
            tracing::info!(count = idle.len(), "reaped idle sessions");
        }
    }
}
