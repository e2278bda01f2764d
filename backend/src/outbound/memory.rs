//! In-memory user store adapter.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug)]
struct Inner {
    users: Vec<User>,
    next_id: u64,
}

/// Process-lifetime user collection guarded by a mutex.
///
/// Actix serves requests from multiple worker threads, so every
/// read-modify-write sequence (id assignment at create, field replacement at
/// update, removal at delete) runs inside a single lock acquisition. Nothing
/// is held across an await point and nothing survives a restart.
#[derive(Debug)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    /// Create an empty store; the first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means another thread panicked mid-mutation; the
        // collection itself is still structurally valid, so keep serving.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    async fn find(&self, id: UserId) -> Result<User, UserStoreError> {
        self.lock()
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(UserStoreError::NotFound { id })
    }

    async fn create(&self, draft: UserDraft) -> User {
        let mut inner = self.lock();
        let id = UserId::new(inner.next_id);
        inner.next_id += 1;
        let user = User::from_draft(id, draft);
        inner.users.push(user.clone());
        user
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserStoreError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::NotFound { id })?;
        user.apply(draft);
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut inner = self.lock();
        let position = inner
            .users
            .iter()
            .position(|user| user.id() == id)
            .ok_or(UserStoreError::NotFound { id })?;
        inner.users.remove(position);
        Ok(())
    }
}
