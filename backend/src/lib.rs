//! User roster service: an in-memory user collection exposed over HTTP/JSON.
//!
//! The crate is laid out hexagonally: `domain` holds the entity and the
//! [`UserStore`](domain::ports::UserStore) port, `outbound` the in-memory
//! adapter, and `inbound::http` the actix handlers that translate between
//! HTTP and the domain.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
