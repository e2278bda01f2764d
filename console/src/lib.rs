//! Terminal client for the user roster service.
//!
//! `api` talks HTTP through the [`UserApi`](api::UserApi) port, `view` owns
//! the presentation state machine, and `boundary` supervises rendering. The
//! `roster` binary wires them into a small REPL.

pub mod api;
pub mod boundary;
pub mod model;
pub mod view;
