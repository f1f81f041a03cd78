//! Atomic storage for the configured mode.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::mode::ResponseMode;

/// Holds the single configured [`ResponseMode`].
///
/// Request handling reads the mode exactly once per request as an immutable
/// snapshot; the admin surface replaces it atomically. There is no lock on
/// the request path and a concurrent replacement can never produce a torn
/// read — a request observes either the old mode or the new one, in full.
#[derive(Debug, Default)]
pub struct ModeStore {
    raw: AtomicU8,
}

impl ModeStore {
    pub fn new(initial: ResponseMode) -> Self {
        Self {
            raw: AtomicU8::new(initial.as_u8()),
        }
    }

    /// Shared handle, ready to inject into the HTTP runtime.
    pub fn shared(initial: ResponseMode) -> Arc<Self> {
        Arc::new(Self::new(initial))
    }

    /// Snapshot of the current mode.
    pub fn current(&self) -> ResponseMode {
        ResponseMode::from_raw(self.raw.load(Ordering::Relaxed) as i64)
    }

    /// Atomically replace the stored mode. Takes effect for the next
    /// evaluation; in-flight requests keep the snapshot they already read.
    pub fn replace(&self, mode: ResponseMode) {
        self.raw.store(mode.as_u8(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trips_every_mode() {
        let store = ModeStore::new(ResponseMode::Off);
        for mode in ResponseMode::ALL {
            store.replace(mode);
            assert_eq!(store.current(), mode);
        }
    }

    #[test]
    fn default_store_is_off() {
        assert_eq!(ModeStore::default().current(), ResponseMode::Off);
    }

    #[test]
    fn replace_is_visible_across_clones_of_the_handle() {
        let store = ModeStore::shared(ResponseMode::Off);
        let reader = Arc::clone(&store);
        store.replace(ResponseMode::EmptyAuthResponse);
        assert_eq!(reader.current(), ResponseMode::EmptyAuthResponse);
    }
}
