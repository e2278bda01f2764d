//! Driving port for the user collection.
//!
//! HTTP handlers depend on this trait rather than a concrete store, so the
//! adapter stays testable with deterministic doubles and the in-memory store
//! remains swappable for a persistent one without touching the handlers.

use async_trait::async_trait;
use thiserror::Error;

use super::error::Error;
use super::user::{User, UserDraft, UserId};

/// Failures surfaced by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// No record exists with the given id.
    #[error("user {id} does not exist")]
    NotFound {
        /// The id the operation targeted.
        id: UserId,
    },
}

impl From<UserStoreError> for Error {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::NotFound { .. } => Self::not_found(err.to_string()),
        }
    }
}

/// Authoritative, process-lifetime collection of users.
///
/// Callers receive owned copies of the stored records; the store retains
/// ownership of the collection itself. Drafts arrive pre-validated, so the
/// only failure mode the port exposes is a missing id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in insertion order. Never fails; empty when none exist.
    async fn list(&self) -> Vec<User>;

    /// Fetch a single user by id.
    async fn find(&self, id: UserId) -> Result<User, UserStoreError>;

    /// Assign the next unused id, store the record, and return it.
    async fn create(&self, draft: UserDraft) -> User;

    /// Replace name and email of an existing record, keeping the id stable.
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserStoreError>;

    /// Remove a record. Deleting an absent id fails with
    /// [`UserStoreError::NotFound`] rather than silently succeeding, so
    /// repeated deletes are observable.
    async fn delete(&self, id: UserId) -> Result<(), UserStoreError>;
}
