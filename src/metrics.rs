//! In-process metrics counters: commands by action and outcome, sessions
//! created, and sessions reaped by the idle cleaner.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::server::Action;

/// Process-lifetime counters. Cheap to clone-by-reference (`Arc<Metrics>`
/// in `GameServer`); every increment is a single atomic op.
#[derive(Default)]
pub struct Metrics {
    pub sessions_created: AtomicU64,
    pub sessions_reaped: AtomicU64,
    commands: Mutex<HashMap<(Action, &'static str), u64>>,
}

impl Metrics {
    pub fn record_session_created(&self) {
        self.sessions_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_sessions_reaped(&self, count: u64) {
        self.sessions_reaped.fetch_add(count, Ordering::Relaxed);
    }

    /// Increments `commands_total{action, outcome}`. `outcome` is `"ok"` or
    /// a `GameError::kind()` string.
    pub fn record_command(&self, action: Action, outcome: &'static str) {
        let mut commands = self
            .commands
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        *commands.entry((action, outcome)).or_insert(0) += 1;
    }

    /// Snapshot of `commands_total`, keyed by action and outcome. Backs
    /// `GET /metrics` (see [`render_prometheus_text`]).
    #[must_use]
    pub fn commands_snapshot(&self) -> Vec<(Action, &'static str, u64)> {
        let commands = self
            .commands
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        commands
            .iter()
            .map(|((action, outcome), count)| (*action, *outcome, *count))
            .collect()
    }

    /// Renders the counters in the text exposition format `GET /metrics`
    /// serves: two gauges plus one `commands_total` line per
    /// `(action, outcome)` pair seen so far.
    #[must_use]
    pub fn render_prometheus_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "sessions_created_total {}\n",
            self.sessions_created.load(Ordering::Relaxed)
        ));
        out.push_str(&format!(
            "sessions_reaped_total {}\n",
            self.sessions_reaped.load(Ordering::Relaxed)
        ));
        for (action, outcome, count) in self.commands_snapshot() {
            out.push_str(&format!(
                "commands_total{{action=\"{action:?}\",outcome=\"{outcome}\"}} {count}\n"
            ));
        }
        out
    }
}
