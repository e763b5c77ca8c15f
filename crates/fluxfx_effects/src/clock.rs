//! Time sources and rate gates.
//!
//! The engine never reads wall-clock time directly. It asks an injected
//! [`Clock`] for milliseconds and feeds them to [`Gate`]s that bound how often
//! pointer input and ambient spawning may fire.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic millisecond source.
pub trait Clock: Send {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Real time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    #[must_use]
    pub fn starting_at(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }

    /// Jumps to an absolute time.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

/// Lets an action through at most once per period.
///
/// The first call always passes. After that, a call passes only when
/// strictly more than `period_ms` has elapsed since the last pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    period_ms: u64,
    last_pass: Option<u64>,
}

impl Gate {
    /// Creates an open gate.
    #[must_use]
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_pass: None,
        }
    }

    /// Would a call at `now_ms` pass?
    #[must_use]
    pub fn is_open(&self, now_ms: u64) -> bool {
        match self.last_pass {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.period_ms,
        }
    }

    /// Passes and records `now_ms` if open.
    pub fn try_pass(&mut self, now_ms: u64) -> bool {
        let open = self.is_open(now_ms);
        if open {
            self.last_pass = Some(now_ms);
        }
        open
    }

    /// Forgets the last pass.
    pub fn reset(&mut self) {
        self.last_pass = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_debounces() {
        let mut gate = Gate::new(50);
        assert!(gate.try_pass(0));
        assert!(!gate.try_pass(30));
        assert!(!gate.try_pass(50));
        assert!(gate.try_pass(51));
        assert!(!gate.try_pass(100));
    }

    #[test]
    fn test_gate_reset_reopens() {
        let mut gate = Gate::new(100);
        assert!(gate.try_pass(10));
        gate.reset();
        assert!(gate.try_pass(11));
    }

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::starting_at(5);
        let view = clock.clone();
        clock.advance(10);
        assert_eq!(view.now_ms(), 15);
        view.set(3);
        assert_eq!(clock.now_ms(), 3);
    }
}
