use async_trait::async_trait;
use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("session {code} not found")]
    NotFound { code: String },

    #[error("join code {code} is already taken")]
    AlreadyExists { code: String },

    #[error("session {code} was modified concurrently")]
    Conflict { code: String },

    #[error("storage backend failure: {message}")]
    Backend { message: String },
}

/// A snapshot tagged with the storage revision it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub revision: u64,
    pub value: T,
}

/// Durable mapping from join code to a playground session.
///
/// The engine drives every mutation as a transactional read-modify-write:
/// `load` a versioned snapshot, apply the transition in memory, `commit`
/// against the revision it read. A commit against a stale revision fails
/// with [`StoreError::Conflict`] and the caller re-runs against fresh
/// state, which linearizes all mutations of one playground without any
/// cross-playground coordination.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a fresh session under its join code. Fails with
    /// [`StoreError::AlreadyExists`] when the code is taken.
    async fn insert(&self, session: Session) -> Result<(), StoreError>;

    /// Read a session snapshot together with its current revision.
    async fn load(&self, code: &str) -> Result<Versioned<Session>, StoreError>;

    /// Replace the session if its stored revision still equals `expected`.
    /// Fails with [`StoreError::NotFound`] when the session was purged in
    /// the meantime; an in-flight operation must never resurrect it.
    async fn commit(&self, code: &str, expected: u64, session: Session) -> Result<(), StoreError>;

    /// Delete a session and the players it owns. Returns whether anything
    /// was removed. Purging idle sessions is owned by the caller.
    async fn remove(&self, code: &str) -> Result<bool, StoreError>;
}
