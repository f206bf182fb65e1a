//! Report level store.
//!
//! Holds the threshold that decides which debug messages are emitted.
//! The value is only ever loaded or stored as a whole, never modified in
//! place, so the only hazard is a torn read. Targets with native 32-bit
//! atomics use a relaxed `AtomicI32`; other targets fall back to a
//! `critical-section` cell held for the single load or store.
//!
//! `target_has_atomic = "32"` also requires compare-and-swap, so load/store
//! only targets such as `thumbv6m` (Cortex-M0/M0+) take the critical-section
//! path even though a plain 32-bit load or store cannot tear there.
//!
//! # Polarity
//!
//! Higher levels are more verbose. With the threshold at `T`, a debug message
//! of level `D` passes while `D <= T`:
//!
//! ```text
//! T = 3:  debug(2, ..) emitted   debug(3, ..) emitted   debug(4, ..) dropped
//! ```

#[cfg(not(target_has_atomic = "32"))]
use core::cell::Cell;
#[cfg(target_has_atomic = "32")]
use core::sync::atomic::{AtomicI32, Ordering};

use crate::config::DEFAULT_REPORT_LEVEL;

/// Process-wide report level used by the global entry points.
pub static REPORT_LEVEL: LevelStore = LevelStore::new(DEFAULT_REPORT_LEVEL);

/// A report threshold safe to share between tasks and interrupt handlers.
pub struct LevelStore {
    #[cfg(target_has_atomic = "32")]
    level: AtomicI32,
    #[cfg(not(target_has_atomic = "32"))]
    level: critical_section::Mutex<Cell<i32>>,
}

impl LevelStore {
    /// Create a store holding `level`.
    pub const fn new(level: i32) -> Self {
        Self {
            #[cfg(target_has_atomic = "32")]
            level: AtomicI32::new(level),
            #[cfg(not(target_has_atomic = "32"))]
            level: critical_section::Mutex::new(Cell::new(level)),
        }
    }

    /// Replace the threshold. Any value is accepted.
    #[inline]
    pub fn set(
        &self,
        level: i32,
    ) {
        #[cfg(target_has_atomic = "32")]
        self.level.store(level, Ordering::Relaxed);
        #[cfg(not(target_has_atomic = "32"))]
        critical_section::with(|cs| self.level.borrow(cs).set(level));
    }

    /// Current threshold.
    #[inline]
    pub fn get(&self) -> i32 {
        #[cfg(target_has_atomic = "32")]
        {
            self.level.load(Ordering::Relaxed)
        }
        #[cfg(not(target_has_atomic = "32"))]
        {
            critical_section::with(|cs| self.level.borrow(cs).get())
        }
    }

    /// Whether a debug message of `level` passes the current threshold.
    #[inline]
    pub fn permits(
        &self,
        level: i32,
    ) -> bool {
        level <= self.get()
    }
}

impl Default for LevelStore {
    fn default() -> Self { Self::new(DEFAULT_REPORT_LEVEL) }
}

/// Replace the process-wide report level.
pub fn set_report_level(level: i32) { REPORT_LEVEL.set(level) }

/// Current process-wide report level.
pub fn get_report_level() -> i32 { REPORT_LEVEL.get() }

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        let store = LevelStore::default();
        assert_eq!(store.get(), DEFAULT_REPORT_LEVEL);
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let store = LevelStore::new(0);
        for level in [0, 1, -1, 42, -42, i32::MIN, i32::MAX] {
            store.set(level);
            assert_eq!(store.get(), level);
        }
    }

    #[test]
    fn test_permits_boundary() {
        let store = LevelStore::new(3);
        assert!(store.permits(2));
        assert!(store.permits(3));
        assert!(!store.permits(4));
    }

    #[test]
    fn test_permits_follows_new_threshold() {
        let store = LevelStore::new(3);
        assert!(!store.permits(5));
        store.set(6);
        assert!(store.permits(5));
        store.set(4);
        assert!(!store.permits(5));
    }

    #[test]
    fn test_permits_extremes() {
        let store = LevelStore::new(i32::MIN);
        assert!(store.permits(i32::MIN));
        assert!(!store.permits(i32::MIN + 1));

        store.set(i32::MAX);
        assert!(store.permits(i32::MAX));
        assert!(store.permits(i32::MIN));
    }

    #[test]
    fn test_concurrent_set_never_tears() {
        // Writers alternate between two bit patterns; a torn read would produce a third.
        const A: i32 = 0x5555_5555;
        const B: i32 = -0x5555_5556; // 0xAAAA_AAAA
        static STORE: LevelStore = LevelStore::new(A);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..10_000 {
                    STORE.set(if i % 2 == 0 { A } else { B });
                }
            });
            scope.spawn(|| {
                for _ in 0..10_000 {
                    let level = STORE.get();
                    assert!(level == A || level == B);
                }
            });
        });
    }
}
