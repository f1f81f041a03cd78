//! Response mode enumeration and catalog.
//!
//! The simulator is driven by a single stored integer in `0..=4`. Each value
//! selects one simulated server behavior. Values outside the range (from a
//! corrupted store, a typo'd environment variable, or a hand-crafted admin
//! request) normalize to [`ResponseMode::Off`] so the simulator fails safe
//! instead of blocking traffic or crashing.

use serde::{Deserialize, Serialize};

/// The five simulated response behaviors.
///
/// The discriminants are the wire/storage representation and are stable:
/// they are what the admin API accepts and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ResponseMode {
    /// Simulator inactive. The endpoint behaves normally.
    #[default]
    Off = 0,
    /// The endpoint reports itself unavailable through the per-request
    /// filter path, independent of credentials.
    BlockAuthenticated = 1,
    /// Failed logins are reported to the client as successes, producing a
    /// success payload the client should treat as invalid.
    InvalidAuthPayload = 2,
    /// Failed logins produce a bare HTTP 401 with an empty body.
    EmptyAuthResponse = 3,
    /// The endpoint reports itself unavailable through the capability-flag
    /// path, as if the RPC capability were switched off in configuration.
    BlockAllCalls = 4,
}

impl ResponseMode {
    /// All modes in storage order.
    pub const ALL: [ResponseMode; 5] = [
        ResponseMode::Off,
        ResponseMode::BlockAuthenticated,
        ResponseMode::InvalidAuthPayload,
        ResponseMode::EmptyAuthResponse,
        ResponseMode::BlockAllCalls,
    ];

    /// Convert a raw stored integer into a mode.
    ///
    /// Total over all inputs: anything outside `0..=4` normalizes to
    /// [`ResponseMode::Off`]. An unrecognized value is logged once at the
    /// point of entry so a misconfigured simulator is visible in the logs.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => ResponseMode::Off,
            1 => ResponseMode::BlockAuthenticated,
            2 => ResponseMode::InvalidAuthPayload,
            3 => ResponseMode::EmptyAuthResponse,
            4 => ResponseMode::BlockAllCalls,
            other => {
                tracing::warn!(raw = other, "unrecognized response mode, treating as Off");
                ResponseMode::Off
            }
        }
    }

    /// The stored integer for this mode.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human label shown by the admin surface.
    pub fn label(self) -> &'static str {
        match self {
            ResponseMode::Off => "Off",
            ResponseMode::BlockAuthenticated => "Mode 1: Block Auth Only",
            ResponseMode::InvalidAuthPayload => {
                "Mode 2: Block Auth Only + Invalid Payload Response"
            }
            ResponseMode::EmptyAuthResponse => "Mode 3: Block Auth Only + No Payload Response",
            ResponseMode::BlockAllCalls => "Mode 4: Block All Calls",
        }
    }

    /// Operator-facing description of what the mode simulates.
    pub fn description(self) -> &'static str {
        match self {
            ResponseMode::Off => "Disables the simulator.",
            ResponseMode::BlockAuthenticated => {
                "Disable RPC requests that require authentication."
            }
            ResponseMode::InvalidAuthPayload => {
                "Simulate a response with an invalid auth payload. \
                 Requires an invalid username/password to trigger."
            }
            ResponseMode::EmptyAuthResponse => {
                "Simulate a response with no payload. \
                 Requires an invalid username/password to trigger."
            }
            ResponseMode::BlockAllCalls => "Simulate a server that has blocked all RPC calls.",
        }
    }

    /// The full five-entry catalog served by the admin API.
    pub fn catalog() -> Vec<ModeInfo> {
        Self::ALL.iter().copied().map(ModeInfo::from).collect()
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Catalog entry for one mode: the stored value plus its label and
/// description, as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub mode: u8,
    pub label: String,
    pub description: String,
}

impl From<ResponseMode> for ModeInfo {
    fn from(mode: ResponseMode) -> Self {
        ModeInfo {
            mode: mode.as_u8(),
            label: mode.label().to_string(),
            description: mode.description().to_string(),
        }
    }
}
