//! Session identity and typed access to [`SessionStore`] values.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex as StdMutex},
};

use chrono::{TimeDelta, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{
    sync::{Mutex, OwnedMutexGuard},
    task::JoinHandle,
};
use uuid::Uuid;

use crate::store::{SessionStore, StoreResult};

/// Opaque identifier of a client session, carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reads `key` for `session`, falling back to `T::default()` when the key is
/// absent or holds a value that no longer deserializes as `T`.
pub async fn load_or_default<T>(
    store: &dyn SessionStore,
    session: SessionId,
    key: &str,
) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.load(session, key).await? else {
        return Ok(T::default());
    };
    match serde_json::from_value(raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(%session, key, error = %err, "discarding unreadable session value");
            Ok(T::default())
        }
    }
}

pub async fn store_value<T>(
    store: &dyn SessionStore,
    session: SessionId,
    key: &str,
    value: &T,
) -> StoreResult<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_value(value)?;
    store.save(session, key, raw).await
}

/// Session key holding pending one-shot user messages.
pub const MESSAGES_SESSION_KEY: &str = "messages";

/// Queues a message for the next page that displays messages.
pub async fn push_message(
    store: &dyn SessionStore,
    session: SessionId,
    message: impl Into<String>,
) -> StoreResult<()> {
    let mut messages: Vec<String> = load_or_default(store, session, MESSAGES_SESSION_KEY).await?;
    messages.push(message.into());
    store_value(store, session, MESSAGES_SESSION_KEY, &messages).await
}

/// Returns the pending messages and clears them.
pub async fn take_messages(store: &dyn SessionStore, session: SessionId) -> StoreResult<Vec<String>> {
    let messages: Vec<String> = load_or_default(store, session, MESSAGES_SESSION_KEY).await?;
    if !messages.is_empty() {
        store_value(store, session, MESSAGES_SESSION_KEY, &Vec::<String>::new()).await?;
    }
    Ok(messages)
}

/// Lifetime of a session: the cookie's `Max-Age`, and how long a session
/// may go unwritten before it is purged (two weeks).
pub const SESSION_TTL_SECS: i64 = 14 * 24 * 60 * 60;

/// How often [`spawn_session_purge`] sweeps the store.
pub const SESSION_PURGE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Deletes sessions not written for longer than [`SESSION_TTL_SECS`].
pub async fn purge_expired(store: &dyn SessionStore) -> StoreResult<u64> {
    let Some(cutoff) = TimeDelta::try_seconds(SESSION_TTL_SECS)
        .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
    else {
        return Ok(0);
    };
    store.purge_older_than(cutoff).await
}

/// Runs [`purge_expired`] every `every` for the life of the process.
pub fn spawn_session_purge(store: Arc<dyn SessionStore>, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match purge_expired(store.as_ref()).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "purged expired sessions"),
                Err(err) => tracing::error!(error = %err, "session purge failed"),
            }
        }
    })
}

/// One async mutex per live session.
///
/// Holding the guard serializes read-modify-write cycles for that session
/// within this process. Sessions served by several processes at once are not
/// covered.
#[derive(Clone, Default)]
pub struct SessionLocks {
    inner: Arc<StdMutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, session: SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            // Drop locks nobody is holding or waiting on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub fn tracked(&self) -> usize {
        self.inner
            .lock()
            .map(|locks| locks.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::store::memory::MemorySessionStore;

    #[tokio::test]
    async fn unreadable_values_fall_back_to_default() {
        let store = MemorySessionStore::new();
        let session = SessionId::new();
        store
            .save(session, "cart", serde_json::json!("not a map"))
            .await
            .unwrap();

        let value: HashMap<String, u32> = load_or_default(&store, session, "cart").await.unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn locks_serialize_the_same_session() {
        let locks = SessionLocks::new();
        let session = SessionId::new();

        let guard = locks.acquire(session).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(session).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn idle_locks_are_released() {
        let locks = SessionLocks::new();
        for _ in 0..5 {
            let _guard = locks.acquire(SessionId::new()).await;
        }
        let _guard = locks.acquire(SessionId::new()).await;
        assert_eq!(locks.tracked(), 1);
    }

    #[tokio::test]
    async fn purge_keeps_recently_written_sessions() {
        let store = MemorySessionStore::new();
        let session = SessionId::new();
        push_message(&store, session, "Item removed from cart!").await.unwrap();

        assert_eq!(purge_expired(&store).await.unwrap(), 0);
        assert_eq!(take_messages(&store, session).await.unwrap(), vec!["Item removed from cart!"]);
    }
}
