//! Session storage.
//!
//! One `Session` aggregate per game, held in a two-map-plus-lock-ordering
//! `InMemoryGameStore` with a per-id collision-retry loop for join codes.
//!
//! **`GameStore` is a trait-object-compatible read surface**, kept
//! `dyn`-safe (plain CRUD) for testability against an alternate backing.
//! The store's core requirement -- the dispatcher's entire
//! read-modify-write cycle for a command must run in one transaction with
//! no intervening I/O -- needs a generic `with_session<F, R>(id, f)`
//! method, and Rust trait objects cannot have generic methods. That
//! transactional helper is instead an inherent method on the concrete
//! `InMemoryGameStore`, used directly (never behind `dyn`) by
//! `crate::server`. See `DESIGN.md`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::ids::JoinCode;
use crate::domain::{GameError, Session, SessionId};

/// Object-safe session lookups, kept separate from the transactional
/// mutation path for testability against alternate backings.
/// Mutating flows go through `InMemoryGameStore::with_session` instead (see
/// module docs).
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get_session(&self, id: SessionId) -> Option<Session>;
    async fn get_session_by_code(&self, code: &JoinCode) -> Option<Session>;
    async fn session_exists_with_code(&self, code: &JoinCode) -> bool;
    async fn insert_session(&self, session: Session);
    async fn remove_session(&self, id: SessionId) -> Option<Session>;
    async fn session_count(&self) -> usize;
}

/// In-memory session store. Sessions live behind a per-session
/// `tokio::sync::Mutex` so that locking one session never blocks command
/// processing for another (parallel across sessions, serialized within
/// one).
///
/// Lock ordering: `sessions` first, then `codes`. Both maps are
/// `DashMap`s, so in practice each per-key shard lock is held only for
/// the instant of a single map operation; the ordering note applies to
/// the `Mutex<Session>` critical section versus `codes` lookups
/// performed while it is held.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    sessions: Arc<DashMap<SessionId, Arc<Mutex<Session>>>>,
    codes: Arc<DashMap<JoinCode, SessionId>>,
}

impl InMemoryGameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly created session, retrying join-code generation on
    /// collision with an atomic collision-retry loop.
    pub fn create_session<F>(&self, mut build: F) -> Session
    where
        F: FnMut(JoinCode) -> Session,
    {
        loop {
            let code = crate::domain::codes::generate_join_code();
            if self.codes.contains_key(&code) {
                continue;
            }
            let session = build(code.clone());
            // Re-check under the entry API to close the race between the
            // contains_key probe above and this insert.
            match self.codes.entry(code.clone()) {
                dashmap::mapref::entry::Entry::Occupied(_) => continue,
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(session.id);
                }
            }
            self.sessions
                .insert(session.id, Arc::new(Mutex::new(session.clone())));
            return session;
        }
    }

    /// Runs `f` against the locked session identified by `id`, committing
    /// any mutation atomically: `f` sees the session, mutates it in place,
    /// and returns a `Result<R, GameError>`. The lock is held for the
    /// entire call with no `.await` other than the lock acquisition itself,
    /// so no handler can suspend mid-transaction.
    pub async fn with_session<F, R>(&self, id: SessionId, f: F) -> Result<R, GameError>
    where
        F: FnOnce(&mut Session) -> Result<R, GameError>,
    {
        let entry = self
            .sessions
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| GameError::NotFound("session not found".to_string()))?;
        let mut guard = entry.lock().await;
        f(&mut guard)
    }

    /// Resolves a join code to a session id without locking the session
    /// itself.
    pub fn resolve_code(&self, code: &JoinCode) -> Option<SessionId> {
        self.codes.get(code).map(|e| *e.value())
    }

    /// Removes a session and its code mapping (`end_game`, idle reaper).
    pub async fn delete_session(&self, id: SessionId) {
        if let Some((_, session)) = self.sessions.remove(&id) {
            let guard = session.lock().await;
            self.codes.remove(&guard.join_code);
        }
    }

    /// Snapshots the `(id, last_activity)` pairs of every session, for the
    /// idle-session reaper (`crate::server::maintenance`).
    pub async fn snapshot_activity(&self) -> Vec<(SessionId, chrono::DateTime<chrono::Utc>)> {
        let mut out = Vec::with_capacity(self.sessions.len());
        for entry in self.sessions.iter() {
            let guard = entry.value().lock().await;
            out.push((*entry.key(), guard.last_activity));
        }
        out
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn get_session(&self, id: SessionId) -> Option<Session> {
        let entry = self.sessions.get(&id)?.value().clone();
        let session = entry.lock().await.clone();
        Some(session)
    }

    async fn get_session_by_code(&self, code: &JoinCode) -> Option<Session> {
        let id = self.resolve_code(code)?;
        self.get_session(id).await
    }

    async fn session_exists_with_code(&self, code: &JoinCode) -> bool {
        self.codes.contains_key(code)
    }

    async fn insert_session(&self, session: Session) {
        self.codes.insert(session.join_code.clone(), session.id);
        self.sessions.insert(session.id, Arc::new(Mutex::new(session)));
    }

    async fn remove_session(&self, id: SessionId) -> Option<Session> {
        let (_, entry) = self.sessions.remove(&id)?;
        let session = entry.lock().await.clone();
        self.codes.remove(&session.join_code);
        Some(session)
    }

    async fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ClientId;
    use std::sync::Barrier;

    fn build(code: JoinCode) -> Session {
        Session::new(code, "host".into(), "Host".into())
    }

    #[tokio::test]
    async fn with_session_mutates_in_place() {
        let store = InMemoryGameStore::new();
        let session = store.create_session(build);
        store
            .with_session(session.id, |s| {
                s.join(ClientId::from("alice"), "Alice".into());
                Ok(())
            })
            .await
            .unwrap();
        let loaded = store.get_session(session.id).await.unwrap();
        assert_eq!(loaded.non_host_count(), 1);
    }

    #[tokio::test]
    async fn with_session_on_missing_id_is_not_found() {
        let store = InMemoryGameStore::new();
        let result = store
            .with_session(SessionId::new_v4(), |_s| Ok::<(), GameError>(()))
            .await;
        assert!(matches!(result, Err(GameError::NotFound(_))));
    }

    #[test]
    fn concurrent_creation_yields_unique_codes() {
        // Many threads racing create_session must never collide on a code.
        let store = InMemoryGameStore::new();
        let n = 16;
        let barrier = Arc::new(Barrier::new(n));
        std::thread::scope(|scope| {
            for _ in 0..n {
                let store = store.clone();
                let barrier = barrier.clone();
                scope.spawn(move || {
                    barrier.wait();
                    store.create_session(build);
                });
            }
        });
        assert_eq!(store.sessions.len(), n);
        assert_eq!(store.codes.len(), n);
    }
}
