//! # Runtime Module
//!
//! The execution runtime for the RPC Tweak simulator. The runtime owns the
//! mode store, the response mode selector, and the dev credential fixture,
//! and exposes them as an Axum router.
//!
//! ## Request lifecycle
//!
//! Every request to the simulated endpoint flows through three explicit
//! extension points, in order:
//!
//! 1. **Capability flag** — mode 4 reports the RPC capability switched off.
//! 2. **Availability filter** — mode 1 reports the endpoint unavailable.
//! 3. **Login outcome** — on failed credentials, modes 2 and 3 substitute
//!    their simulated responses; everything else proceeds normally.
//!
//! The mode is read once per request as an atomic snapshot, so an admin
//! mode change takes effect on the next request and never splits an
//! in-flight one.

/// Admin settings handlers for reading and writing the mode.
pub mod admin;
/// Runtime configuration and environment-based builder.
pub mod config;
/// The simulated legacy RPC endpoint handler.
pub mod endpoint;
/// Structured error responses for the host's own failures.
pub mod error;
/// Health check handler.
pub mod health;
/// Request-id propagation middleware.
pub mod request_id;
/// Router construction and middleware layering.
pub mod router;
/// Graceful shutdown signal handling.
pub mod shutdown;

pub use config::{ConfigError, DevCredentials, RuntimeConfig, RuntimeConfigBuilder};
pub use error::{ErrorBody, SimError};
pub use request_id::{RequestIdExtension, request_id_middleware};
pub use shutdown::shutdown_signal;

use std::sync::Arc;

use rpctweak_core::{ModeStore, ResponseMode, ResponseModeSelector};

/// HTTP server state: the mode store, the selector consulted at the
/// pipeline's extension points, and the dev credential fixture.
#[derive(Clone)]
pub struct RpcSimRuntime {
    pub mode_store: Arc<ModeStore>,
    pub selector: ResponseModeSelector,
    pub credentials: Arc<DevCredentials>,
}

impl RpcSimRuntime {
    /// Build a runtime from configuration. The selector is constructed once
    /// here with its mode source injected; handlers never reach around it.
    pub fn new(config: &RuntimeConfig) -> Self {
        let mode_store = ModeStore::shared(config.initial_mode);
        let selector = ResponseModeSelector::new(Arc::clone(&mode_store));
        tracing::info!(
            mode = config.initial_mode.as_u8(),
            label = %config.initial_mode,
            "simulator runtime initialized"
        );
        Self {
            mode_store,
            selector,
            credentials: Arc::new(config.credentials.clone()),
        }
    }

    /// Runtime with default configuration, for tests and examples.
    pub fn with_mode(initial_mode: ResponseMode) -> Self {
        let config = RuntimeConfig {
            initial_mode,
            ..RuntimeConfig::default()
        };
        Self::new(&config)
    }
}
