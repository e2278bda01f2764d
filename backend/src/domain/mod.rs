//! Domain types for the user roster.
//!
//! Transport-agnostic: nothing here imports actix or serde_json beyond the
//! structured details payload on [`Error`].

mod error;
pub mod ports;
mod user;

pub use error::{Error, ErrorCode, ErrorValidationError};
pub use user::{EmailAddress, User, UserDraft, UserId, UserName, UserValidationError};

/// Response header carrying the request-scoped trace identifier.
pub const TRACE_ID_HEADER: &str = "x-trace-id";
