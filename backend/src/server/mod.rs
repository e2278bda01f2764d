//! HTTP server assembly: configuration, app factory, and listener binding.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, web};
use thiserror::Error;
use tracing::info;

use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::users;
use crate::inbound::http::HttpState;
use crate::middleware::Trace;
use crate::outbound::MemoryUserStore;

/// Default bind address when `ROSTER_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Environment variable naming the socket address to bind.
pub const BIND_ADDR_VAR: &str = "ROSTER_BIND_ADDR";

/// Configuration failures raised at bootstrap.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured bind address could not be parsed.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// The rejected value.
        value: String,
        /// The underlying parse failure.
        source: std::net::AddrParseError,
    },
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration with an explicit bind address.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value: raw, source })?;
        Ok(Self { bind_addr })
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// A bound, runnable server plus the address it actually listens on.
///
/// Binding and running are split so tests can bind port 0 and discover the
/// assigned port before driving the server.
pub struct BoundServer {
    /// The actix server future; run it to serve requests.
    pub server: Server,
    /// The bound listen address, with any ephemeral port resolved.
    pub addr: SocketAddr,
}

/// Register the API routes and middleware on an actix `App`.
///
/// Shared between the production binary and integration tests so both exercise
/// the same route table.
pub fn configure_api(cfg: &mut web::ServiceConfig, state: HttpState) {
    let api = web::scope("/api")
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user);
    cfg.app_data(web::Data::new(state)).service(api);
}

/// Bind the listener and assemble the server around the given store.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound.
pub fn bind(config: &ServerConfig, store: Arc<MemoryUserStore>) -> std::io::Result<BoundServer> {
    let listener = TcpListener::bind(config.bind_addr())?;
    let addr = listener.local_addr()?;

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let state = HttpState::new(store.clone());
        App::new()
            .wrap(Trace)
            .app_data(server_health_state.clone())
            .configure(|cfg| configure_api(cfg, state))
            .service(health::ready)
            .service(health::live)
    })
    .listen(listener)?
    .run();

    health_state.mark_ready();
    info!(%addr, "listening");
    Ok(BoundServer { server, addr })
}
