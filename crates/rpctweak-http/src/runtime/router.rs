//! HTTP router configuration
//!
//! Route registration and middleware layering for the simulator runtime.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::runtime::{
    RpcSimRuntime, RuntimeConfig,
    admin::{get_mode, list_modes, set_mode},
    endpoint::rpc_endpoint,
    health::health_check,
    request_id::request_id_middleware,
};

impl RpcSimRuntime {
    /// Create the Axum router with default configuration
    pub fn router(self) -> Router {
        let config = RuntimeConfig::default();
        self.router_with_config(&config)
    }

    /// Create the Axum router with custom configuration
    pub fn router_with_config(self, config: &RuntimeConfig) -> Router {
        // The simulated endpoint plus the settings collaborator. The admin
        // routes are deliberately unauthenticated: this is a local testing
        // aid, not a production surface.
        let mut router = Router::new()
            .route("/rpc", post(rpc_endpoint))
            .route("/admin/mode", get(get_mode).put(set_mode))
            .route("/admin/modes", get(list_modes))
            .route("/health", get(health_check))
            .with_state(self)
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http());

        if config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }
}
