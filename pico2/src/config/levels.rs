//! Report level configuration.
//!
//! The facility treats higher levels as more verbose. The heartbeat task
//! reports at these levels:
//!
//! | Level | Content                           |
//! |-------|-----------------------------------|
//! | 1     | beat counter                      |
//! | 3     | uptime                            |
//! | 5     | stack usage                       |
//! | 9     | per-beat timing                   |

// =============================================================================
// Level Button
// =============================================================================

/// Levels the Y button steps through, in order, wrapping at the end.
///
/// `-1` silences all debug output; `9` enables everything the firmware emits.
pub const LEVEL_STEPS: [i32; 5] = [-1, 1, 3, 5, 9];

/// Button sampling period in milliseconds.
pub const BUTTON_POLL_MS: u64 = 10;

// =============================================================================
// Heartbeat
// =============================================================================

/// Interval between heartbeat reports in milliseconds.
pub const HEARTBEAT_MS: u64 = 1000;

/// Stack usage, in percent of the stack region, above which the heartbeat
/// reports an error.
pub const STACK_WARN_PERCENT: u32 = 75;
