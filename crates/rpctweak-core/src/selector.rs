//! The five-way response mode dispatch.
//!
//! A [`ResponseModeSelector`] is built once at startup with its mode source
//! injected, and is consulted by the request pipeline at three explicit
//! extension points:
//!
//! 1. the capability flag — is the RPC capability switched on at all,
//! 2. the availability filter — is the endpoint exposed for this request,
//! 3. the login outcome — what to do when a request's credentials fail.
//!
//! Every evaluation is a pure function of a [`ResponseMode`] snapshot taken
//! once per request, so a concurrent mode change can never split one request
//! across two modes.

use std::sync::Arc;

use crate::mode::ResponseMode;
use crate::store::ModeStore;

/// Outcome of the availability check (per-request filter path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Expose the endpoint; continue with normal handling.
    Allow,
    /// Report the endpoint unavailable to any caller.
    Disable,
}

/// Outcome of the capability flag check, consulted independently of the
/// per-request filter wherever the host asks whether the RPC capability is
/// turned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Enabled,
    Disabled,
}

/// What to do with a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    /// Continue with whatever the host would normally do.
    Proceed,
    /// Report authentication success regardless of the credentials, so the
    /// client receives a success payload it should know is wrong.
    ForceSuccess,
    /// Terminate the request immediately with this status and no body.
    RejectWithStatus(u16),
}

/// Status sent for [`LoginAction::RejectWithStatus`] in mode 3: a likely
/// code from a server that is blocking RPC requests outright.
pub const REJECTED_LOGIN_STATUS: u16 = 401;

/// Maps the configured mode plus a request lifecycle event to one
/// deterministic outcome. Holds no state of its own beyond the injected
/// [`ModeStore`] handle.
#[derive(Debug, Clone)]
pub struct ResponseModeSelector {
    store: Arc<ModeStore>,
}

impl ResponseModeSelector {
    pub fn new(store: Arc<ModeStore>) -> Self {
        Self { store }
    }

    /// The mode snapshot for one request. Call once per request and pass
    /// the result to the evaluation methods.
    pub fn snapshot(&self) -> ResponseMode {
        self.store.current()
    }

    /// Should the endpoint be exposed at all? Consulted before any request
    /// handling. Only mode 1 disables here; mode 4 blocks through
    /// [`Self::evaluate_capability`] instead so the two paths stay
    /// independently testable.
    pub fn evaluate_availability(&self, mode: ResponseMode) -> Availability {
        match mode {
            ResponseMode::BlockAuthenticated => Availability::Disable,
            _ => Availability::Allow,
        }
    }

    /// Is the RPC capability switched on at the configuration level?
    pub fn evaluate_capability(&self, mode: ResponseMode) -> Capability {
        match mode {
            ResponseMode::BlockAllCalls => Capability::Disabled,
            _ => Capability::Enabled,
        }
    }

    /// What to do when a request supplies credentials. Modes 2 and 3 are
    /// only observable on a failed login; valid credentials always proceed.
    pub fn evaluate_login_outcome(
        &self,
        mode: ResponseMode,
        credentials_valid: bool,
    ) -> LoginAction {
        if credentials_valid {
            return LoginAction::Proceed;
        }
        match mode {
            ResponseMode::InvalidAuthPayload => LoginAction::ForceSuccess,
            ResponseMode::EmptyAuthResponse => {
                LoginAction::RejectWithStatus(REJECTED_LOGIN_STATUS)
            }
            _ => LoginAction::Proceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_with(mode: ResponseMode) -> (ResponseModeSelector, ResponseMode) {
        let selector = ResponseModeSelector::new(ModeStore::shared(mode));
        let snapshot = selector.snapshot();
        (selector, snapshot)
    }

    #[test]
    fn availability_decision_table() {
        let expectations = [
            (ResponseMode::Off, Availability::Allow),
            (ResponseMode::BlockAuthenticated, Availability::Disable),
            (ResponseMode::InvalidAuthPayload, Availability::Allow),
            (ResponseMode::EmptyAuthResponse, Availability::Allow),
            (ResponseMode::BlockAllCalls, Availability::Allow),
        ];
        for (mode, expected) in expectations {
            let (selector, snapshot) = selector_with(mode);
            assert_eq!(
                selector.evaluate_availability(snapshot),
                expected,
                "availability for {mode:?}"
            );
        }
    }

    #[test]
    fn capability_disabled_only_in_block_all_calls() {
        for mode in ResponseMode::ALL {
            let (selector, snapshot) = selector_with(mode);
            let expected = if mode == ResponseMode::BlockAllCalls {
                Capability::Disabled
            } else {
                Capability::Enabled
            };
            assert_eq!(selector.evaluate_capability(snapshot), expected);
        }
    }

    #[test]
    fn valid_credentials_always_proceed() {
        for mode in ResponseMode::ALL {
            let (selector, snapshot) = selector_with(mode);
            assert_eq!(
                selector.evaluate_login_outcome(snapshot, true),
                LoginAction::Proceed,
                "valid login under {mode:?}"
            );
        }
    }

    #[test]
    fn failed_login_outcomes_per_mode() {
        let expectations = [
            (ResponseMode::Off, LoginAction::Proceed),
            (ResponseMode::BlockAuthenticated, LoginAction::Proceed),
            (ResponseMode::InvalidAuthPayload, LoginAction::ForceSuccess),
            (
                ResponseMode::EmptyAuthResponse,
                LoginAction::RejectWithStatus(401),
            ),
            (ResponseMode::BlockAllCalls, LoginAction::Proceed),
        ];
        for (mode, expected) in expectations {
            let (selector, snapshot) = selector_with(mode);
            assert_eq!(
                selector.evaluate_login_outcome(snapshot, false),
                expected,
                "failed login under {mode:?}"
            );
        }
    }

    #[test]
    fn out_of_range_raw_values_behave_like_off() {
        for raw in [-3, 5, 200] {
            let mode = ResponseMode::from_raw(raw);
            let selector = ResponseModeSelector::new(ModeStore::shared(mode));
            assert_eq!(selector.evaluate_availability(mode), Availability::Allow);
            assert_eq!(selector.evaluate_capability(mode), Capability::Enabled);
            assert_eq!(
                selector.evaluate_login_outcome(mode, false),
                LoginAction::Proceed
            );
        }
    }

    #[test]
    fn endpoint_is_unreachable_exactly_in_the_two_blocking_modes() {
        for mode in ResponseMode::ALL {
            let (selector, snapshot) = selector_with(mode);
            let blocked = selector.evaluate_capability(snapshot) == Capability::Disabled
                || selector.evaluate_availability(snapshot) == Availability::Disable;
            let expect_blocked = matches!(
                mode,
                ResponseMode::BlockAuthenticated | ResponseMode::BlockAllCalls
            );
            assert_eq!(blocked, expect_blocked, "reachability for {mode:?}");
        }
    }

    #[test]
    fn evaluations_do_not_mutate_the_store() {
        let store = ModeStore::shared(ResponseMode::EmptyAuthResponse);
        let selector = ResponseModeSelector::new(Arc::clone(&store));
        let snapshot = selector.snapshot();
        let _ = selector.evaluate_availability(snapshot);
        let _ = selector.evaluate_capability(snapshot);
        let _ = selector.evaluate_login_outcome(snapshot, false);
        assert_eq!(store.current(), ResponseMode::EmptyAuthResponse);
    }

    #[test]
    fn repeated_failed_logins_in_mode_three_are_identical() {
        let (selector, snapshot) = selector_with(ResponseMode::EmptyAuthResponse);
        let first = selector.evaluate_login_outcome(snapshot, false);
        for _ in 0..10 {
            assert_eq!(selector.evaluate_login_outcome(snapshot, false), first);
        }
    }
}
