//! The simulated legacy RPC endpoint.
//!
//! `POST /rpc` drives the full lifecycle: capability flag, availability
//! filter, credential validation, then the login-outcome dispatch. The
//! configured mode is read exactly once at the top of the handler; every
//! later decision uses that snapshot.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use rpctweak_core::{Availability, Capability, LoginAction};

use crate::runtime::{RpcSimRuntime, SimError};

const MAX_BASIC_HEADER_BYTES: usize = 4096;

/// Request body for the simulated endpoint. The method name is free-form
/// and only echoed back; the endpoint implements no RPC protocol.
#[derive(Debug, Default, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub method: Option<String>,
}

/// Success payload. Mode 2 returns this exact shape for failed logins,
/// which is precisely what makes its output an invalid auth payload from
/// the client's point of view.
#[derive(Debug, Serialize, Deserialize)]
pub struct RpcSuccess {
    pub result: String,
    pub user: String,
    pub method: String,
}

/// POST /rpc - the simulated legacy endpoint
pub async fn rpc_endpoint(
    State(runtime): State<RpcSimRuntime>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mode = runtime.selector.snapshot();

    // Capability flag: consulted before anything else, independent of the
    // per-request filter below. Mode 4 blocks here.
    if runtime.selector.evaluate_capability(mode) == Capability::Disabled {
        tracing::info!(mode = mode.as_u8(), "RPC capability is off, refusing call");
        return SimError::EndpointDisabled.into_response();
    }

    // Per-request availability filter. Mode 1 blocks here; the request
    // never reaches login evaluation.
    if runtime.selector.evaluate_availability(mode) == Availability::Disable {
        tracing::info!(mode = mode.as_u8(), "endpoint filtered off, refusing call");
        return SimError::EndpointDisabled.into_response();
    }

    let request: RpcRequest = if body.is_empty() {
        RpcRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                return SimError::InvalidJson {
                    reason: e.to_string(),
                }
                .into_response();
            }
        }
    };

    // Missing or malformed Basic credentials count as a failed login, not
    // as a distinct error path.
    let supplied = parse_basic_credentials(&headers);
    let (user, credentials_valid) = match &supplied {
        Some((username, password)) => (
            username.clone(),
            runtime.credentials.matches(username, password),
        ),
        None => (String::new(), false),
    };

    match runtime
        .selector
        .evaluate_login_outcome(mode, credentials_valid)
    {
        LoginAction::Proceed => {
            if credentials_valid {
                tracing::debug!(user = %user, "login accepted");
                success_response(user, request.method)
            } else {
                tracing::debug!(user = %user, "login rejected normally");
                SimError::IncorrectCredentials.into_response()
            }
        }
        LoginAction::ForceSuccess => {
            tracing::info!(
                mode = mode.as_u8(),
                user = %user,
                "reporting success for a failed login"
            );
            success_response(user, request.method)
        }
        LoginAction::RejectWithStatus(status) => {
            tracing::info!(
                mode = mode.as_u8(),
                status,
                "terminating failed login with bare status"
            );
            bare_status(status)
        }
    }
}

fn success_response(user: String, method: Option<String>) -> Response {
    let payload = RpcSuccess {
        result: "ok".to_string(),
        user,
        method: method.unwrap_or_else(|| "ping".to_string()),
    };
    (StatusCode::OK, Json(payload)).into_response()
}

/// Status line only, zero body bytes, no further handler invoked.
fn bare_status(status: u16) -> Response {
    StatusCode::from_u16(status)
        .unwrap_or(StatusCode::UNAUTHORIZED)
        .into_response()
}

/// Strict HTTP Basic parse: exactly one `Basic <base64>` token, bounded
/// size, UTF-8 payload, split at the first colon.
fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = raw.split_whitespace();
    let scheme = parts.next()?;
    let encoded = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    if encoded.len() > MAX_BASIC_HEADER_BYTES {
        return None;
    }
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
