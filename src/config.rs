//! Compile-time configuration constants.
//!
//! Every value here is a `const` so the formatter and the level store can size
//! their state statically. Cargo features pick between the supported profiles,
//! the same way the firmware picks its clock profile:
//!
//! | Feature         | Effect                                              |
//! |-----------------|-----------------------------------------------------|
//! | `level-verbose` | Boot with every debug level up to 9 enabled         |
//! | `level-quiet`   | Boot with no debug output until the level is raised |
//! | `long-lines`    | Double the maximum rendered line length             |
//!
//! With no feature enabled only debug level 0 passes at boot.

// =============================================================================
// Level Configuration
// =============================================================================

/// Threshold the level store holds at process start.
///
/// Higher values are more verbose: a debug message of level `D` is emitted
/// while `D <= threshold`.
pub const DEFAULT_REPORT_LEVEL: i32 = if cfg!(feature = "level-verbose") {
    9
} else if cfg!(feature = "level-quiet") {
    -1
} else {
    0
};

// =============================================================================
// Line Configuration
// =============================================================================

/// Maximum length in bytes of a rendered line, terminator included.
pub const MAX_LINE_LEN: usize = if cfg!(feature = "long-lines") { 256 } else { 128 };

/// Terminator appended to every rendered line.
///
/// CR LF so that raw serial terminals return the carriage.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Bytes available for prefix, subsystem and message text.
pub const MAX_BODY_LEN: usize = MAX_LINE_LEN - LINE_TERMINATOR.len();

/// Largest float precision the printf conversions hand to `core::fmt`.
///
/// A line never shows more fraction digits than this. Longer requested
/// precisions are rendered as this many digits followed by `0` padding.
pub const MAX_FLOAT_PRECISION: usize = MAX_BODY_LEN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_leaves_room_for_terminator() {
        assert_eq!(MAX_BODY_LEN + LINE_TERMINATOR.len(), MAX_LINE_LEN);
        assert!(MAX_BODY_LEN > 16);
    }
}
