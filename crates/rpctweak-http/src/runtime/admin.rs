//! Admin settings handlers.
//!
//! A single stored integer exposed for reading and writing, plus the mode
//! catalog operators pick from. Writes take effect on the next endpoint
//! evaluation; in-flight requests keep the snapshot they already read.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use rpctweak_core::{ModeInfo, ResponseMode};

use crate::runtime::RpcSimRuntime;

/// Current mode as stored, with its catalog entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModeResponse {
    pub mode: u8,
    pub label: String,
    pub description: String,
}

impl From<ResponseMode> for ModeResponse {
    fn from(mode: ResponseMode) -> Self {
        let info = ModeInfo::from(mode);
        Self {
            mode: info.mode,
            label: info.label,
            description: info.description,
        }
    }
}

/// Body for `PUT /admin/mode`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetModeRequest {
    pub mode: i64,
}

/// GET /admin/mode - read the stored mode
pub async fn get_mode(State(runtime): State<RpcSimRuntime>) -> Json<ModeResponse> {
    Json(ModeResponse::from(runtime.mode_store.current()))
}

/// PUT /admin/mode - replace the stored mode
///
/// Out-of-range values normalize to Off rather than failing, matching the
/// fail-safe rule applied everywhere a raw integer enters the system. The
/// response reports what was actually stored.
pub async fn set_mode(
    State(runtime): State<RpcSimRuntime>,
    Json(request): Json<SetModeRequest>,
) -> Json<ModeResponse> {
    let mode = ResponseMode::from_raw(request.mode);
    let previous = runtime.mode_store.current();
    runtime.mode_store.replace(mode);
    tracing::info!(
        from = previous.as_u8(),
        to = mode.as_u8(),
        label = %mode,
        "response mode updated"
    );
    Json(ModeResponse::from(mode))
}

/// GET /admin/modes - the full mode catalog
pub async fn list_modes() -> Json<Vec<ModeInfo>> {
    Json(ResponseMode::catalog())
}
