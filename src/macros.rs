//! Report macros with Rust format syntax.
//!
//! ```ignore
//! report::error!("PWR", "brownout at {}mV", millivolts);
//! report::info!("NET", "link up");
//! report::debug!(5, "NET", "retry {} of {}", attempt, MAX_RETRIES);
//! ```
//!
//! `debug!` runs the gate before it evaluates any argument expression, so a
//! suppressed call costs one atomic load.

/// Report a fault with `format_args!` syntax. Never suppressed.
#[macro_export]
macro_rules! error {
    ($subsystem:expr, $($arg:tt)+) => {
        $crate::emit($crate::Severity::Error, $subsystem, &format_args!($($arg)+))
    };
}

/// Report normal operation with `format_args!` syntax. Never suppressed.
#[macro_export]
macro_rules! info {
    ($subsystem:expr, $($arg:tt)+) => {
        $crate::emit($crate::Severity::Info, $subsystem, &format_args!($($arg)+))
    };
}

/// Report debug output at a level with `format_args!` syntax.
///
/// Arguments are only evaluated when the level passes the gate.
#[macro_export]
macro_rules! debug {
    ($level:expr, $subsystem:expr, $($arg:tt)+) => {{
        let level: i32 = $level;
        if $crate::debug_enabled(level) {
            $crate::emit($crate::Severity::Debug(level), $subsystem, &format_args!($($arg)+));
        }
    }};
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use crate::level::set_report_level;
    use crate::sink;
    use crate::test_support::{CAPTURE, lock_global};

    #[test]
    fn test_macros_render_like_functions() {
        let _guard = lock_global();
        sink::set_sink(&CAPTURE);
        CAPTURE.take();
        set_report_level(1);

        crate::error!("PWR", "brownout at {}mV", 2950);
        crate::info!("NET", "link {}", "up");
        crate::debug!(1, "NET", "retry {:>3}", 4);
        crate::debug!(2, "NET", "hidden");

        assert_eq!(
            CAPTURE.take(),
            ["[E] PWR: brownout at 2950mV\r\n", "[I] NET: link up\r\n", "[D] NET: retry   4\r\n"]
        );
        sink::clear_sink();
    }

    #[test]
    fn test_suppressed_debug_skips_argument_evaluation() {
        let _guard = lock_global();
        sink::set_sink(&CAPTURE);
        CAPTURE.take();
        set_report_level(3);

        let evaluated = Cell::new(0);
        let expensive = || {
            evaluated.set(evaluated.get() + 1);
            42
        };

        crate::debug!(5, "NET", "value {}", expensive());
        assert_eq!(evaluated.get(), 0);
        assert!(CAPTURE.take().is_empty());

        set_report_level(6);
        crate::debug!(5, "NET", "value {}", expensive());
        assert_eq!(evaluated.get(), 1);
        assert_eq!(CAPTURE.take(), ["[D] NET: value 42\r\n"]);
        sink::clear_sink();
    }
}
