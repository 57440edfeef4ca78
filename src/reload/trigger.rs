//! The shared reload flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// A boolean-like reload signal with two producers (process signal, HTTP
/// reload path) and one consumer (the coordinator's poll tick).
///
/// Producers log their own provenance before raising; the flag itself
/// carries no origin.
#[derive(Debug, Default)]
pub struct ReloadTrigger {
    flag: AtomicBool,
}

impl ReloadTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a reload on the next poll tick.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Consume the trigger. Returns true at most once per raise; the swap
    /// keeps the signal path and the HTTP path from double-scheduling a
    /// reload when they race.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_the_flag() {
        let trigger = ReloadTrigger::new();
        assert!(!trigger.take());

        trigger.raise();
        assert!(trigger.take());
        assert!(!trigger.take());
    }

    #[test]
    fn concurrent_raises_coalesce() {
        let trigger = ReloadTrigger::new();
        trigger.raise();
        trigger.raise();
        assert!(trigger.take());
        assert!(!trigger.take());
    }
}
