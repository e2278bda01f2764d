//! Inbound HTTP adapter: handlers, error envelopes, and shared state.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
mod validation;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
