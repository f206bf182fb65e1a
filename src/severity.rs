//! Severity classes of a report.
//!
//! # Classes
//!
//! - `Error`: faults. Never suppressed.
//! - `Info`: normal operation. Never suppressed.
//! - `Debug(level)`: diagnostic chatter, emitted only while `level` is at or
//!   below the current report level.
//!
//! Each class renders with a one-letter bracketed tag so that the three
//! entry points produce lines with the same layout:
//!
//! ```text
//! [E] PWR: brownout at 2950mV
//! [I] NET: link up
//! [D] NET: retry 4
//! ```

/// Severity of a single report.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Severity {
    /// Fault condition.
    Error,
    /// Informational message.
    Info,
    /// Debug message with its verbosity level.
    Debug(i32),
}

impl Severity {
    /// Get the single-character tag that starts every rendered line, as `[E] `.
    pub const fn tag(self) -> char {
        match self {
            Self::Error => 'E',
            Self::Info => 'I',
            Self::Debug(_) => 'D',
        }
    }

    /// Debug level carried by this severity, if any.
    #[inline]
    pub const fn debug_level(self) -> Option<i32> {
        match self {
            Self::Debug(level) => Some(level),
            Self::Error | Self::Info => None,
        }
    }
}
