//! Leveled diagnostic reporting for interrupt-driven embedded firmware.
//!
//! Any subsystem reports tagged, formatted text through three entry points;
//! one global report level decides how much debug output is produced:
//!
//! ```ignore
//! report::set_report_level(3);
//!
//! report::error("PWR", format_args!("brownout at {}mV", 2950)); // always
//! report::info("NET", "link up");                                // always
//! report::debug(2, "NET", "handshake done");                     // 2 <= 3: emitted
//! report::debug!(5, "NET", "retry {}", attempt);                 // 5 > 3: skipped, `attempt` not evaluated
//! ```
//!
//! Lines look like `[E] PWR: brownout at 2950mV\r\n` and go to the single
//! installed [`Sink`].
//!
//! # Guarantees
//!
//! - No heap allocation. Each call renders into its own stack buffer of
//!   [`config::MAX_LINE_LEN`] bytes; longer text is truncated and the line is
//!   still terminated.
//! - No blocking beyond the sink's own behavior. The report level is a single
//!   atomic load or store.
//! - No failure is ever returned to the caller.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware build is `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod gate;
pub mod level;
pub mod line;
pub mod message;
pub mod printf;
pub mod severity;
pub mod sink;

mod macros;

pub use gate::{Reporter, debug, debug_enabled, emit, error, info, report};
pub use level::{LevelStore, REPORT_LEVEL, get_report_level, set_report_level};
pub use line::Line;
pub use message::Message;
pub use printf::{Arg, Printf};
pub use severity::Severity;
pub use sink::{Sink, clear_sink, set_sink};

/// Shared fixtures for tests that touch the process-wide level and sink.
#[cfg(test)]
pub(crate) mod test_support {
    use std::string::String;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use std::vec::Vec;

    use crate::sink::Sink;

    /// Sink that keeps every line it receives.
    pub struct Capture(Mutex<Vec<String>>);

    impl Capture {
        pub const fn new() -> Self { Self(Mutex::new(Vec::new())) }

        /// Drain the captured lines.
        pub fn take(&self) -> Vec<String> {
            core::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
        }
    }

    impl Sink for Capture {
        fn write_line(
            &self,
            line: &str,
        ) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line.into());
        }
    }

    /// Sink installed by tests of the global entry points.
    pub static CAPTURE: Capture = Capture::new();

    static GLOBAL: Mutex<()> = Mutex::new(());

    /// Serialize tests that change the global level or sink.
    pub fn lock_global() -> MutexGuard<'static, ()> { GLOBAL.lock().unwrap_or_else(PoisonError::into_inner) }
}
