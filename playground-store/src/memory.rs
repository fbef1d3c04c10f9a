use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use playground_core::{Session, SessionStore, StoreError, Versioned};

struct StoredSession {
    revision: u64,
    session: Session,
}

/// In-process session store keyed by join code, with optimistic revision
/// checking on commit. Each map entry is independent, so playgrounds never
/// contend with each other.
#[derive(Default)]
pub struct MemoryStore {
    sessions: DashMap<String, StoredSession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, session: Session) -> Result<(), StoreError> {
        let code = session.playground.code.clone();
        match self.sessions.entry(code.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists { code }),
            Entry::Vacant(slot) => {
                slot.insert(StoredSession {
                    revision: 1,
                    session,
                });
                debug!(code = %code, "session stored");
                Ok(())
            }
        }
    }

    async fn load(&self, code: &str) -> Result<Versioned<Session>, StoreError> {
        self.sessions
            .get(code)
            .map(|stored| Versioned {
                revision: stored.revision,
                value: stored.session.clone(),
            })
            .ok_or_else(|| StoreError::NotFound {
                code: code.to_string(),
            })
    }

    async fn commit(&self, code: &str, expected: u64, session: Session) -> Result<(), StoreError> {
        let mut stored = self
            .sessions
            .get_mut(code)
            .ok_or_else(|| StoreError::NotFound {
                code: code.to_string(),
            })?;

        if stored.revision != expected {
            return Err(StoreError::Conflict {
                code: code.to_string(),
            });
        }

        stored.revision += 1;
        stored.session = session;
        Ok(())
    }

    async fn remove(&self, code: &str) -> Result<bool, StoreError> {
        let removed = self.sessions.remove(code).is_some();
        if removed {
            debug!(code = %code, "session purged");
        }
        Ok(removed)
    }
}
