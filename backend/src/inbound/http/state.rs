//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the [`UserStore`] port and stay testable with deterministic doubles.

use std::sync::Arc;

use crate::domain::ports::UserStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The user collection backing the API.
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Bundle a store implementation for injection into the app.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
