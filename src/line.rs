//! Bounded rendered line.
//!
//! A [`Line`] is the text handed to the sink: severity prefix, subsystem tag,
//! expanded message and [`LINE_TERMINATOR`]. It lives on the caller's stack
//! in a `heapless::String`, so concurrent callers never share a buffer.
//!
//! # Truncation
//!
//! Text that does not fit is cut at [`MAX_BODY_LEN`] bytes, on a character
//! boundary, and the terminator is appended afterwards. The result is never
//! longer than [`MAX_LINE_LEN`] and always ends with the terminator. Once the
//! line is full every further write returns `fmt::Error`, which stops
//! `core::fmt` from doing any more work for that message.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::{LINE_TERMINATOR, MAX_BODY_LEN, MAX_LINE_LEN};
use crate::message::Message;
use crate::severity::Severity;

/// A finished, terminated line of report text.
pub struct Line {
    text: String<MAX_LINE_LEN>,
    truncated: bool,
    terminated: bool,
}

impl Line {
    /// Render a complete line for `severity` and `subsystem`.
    pub fn render<M: Message + ?Sized>(
        severity: Severity,
        subsystem: &str,
        message: &M,
    ) -> Self {
        let mut line = Self {
            text: String::new(),
            truncated: false,
            terminated: false,
        };

        // An error here only means the body is full.
        let _ = line.write_body(severity, subsystem, message);

        line.terminate();
        line
    }

    fn write_body<M: Message + ?Sized>(
        &mut self,
        severity: Severity,
        subsystem: &str,
        message: &M,
    ) -> fmt::Result {
        write!(self, "[{}] ", severity.tag())?;
        self.write_str(subsystem)?;
        self.write_str(": ")?;
        message.write_to(self)
    }

    fn terminate(&mut self) {
        // MAX_BODY_LEN keeps room for this push.
        self.text.push_str(LINE_TERMINATOR).ok();
        self.terminated = true;
    }

    /// The full line, terminator included.
    #[inline]
    pub fn as_str(&self) -> &str { self.text.as_str() }

    /// Whether any text was dropped because the line was full.
    #[inline]
    pub const fn is_truncated(&self) -> bool { self.truncated }
}

impl Write for Line {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        if self.terminated {
            return Err(fmt::Error);
        }

        let room = MAX_BODY_LEN.saturating_sub(self.text.len());
        if s.len() <= room {
            self.text.push_str(s).map_err(|_| fmt::Error)?;
            return Ok(());
        }

        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&s[..cut]).ok();
        self.truncated = true;
        Err(fmt::Error)
    }
}

impl fmt::Display for Line {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Line {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Line")
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printf::{Arg, Printf};

    #[test]
    fn test_render_layout() {
        let line = Line::render(Severity::Info, "NET", "link up");
        assert_eq!(line.as_str(), "[I] NET: link up\r\n");
        assert!(!line.is_truncated());
    }

    #[test]
    fn test_render_format_arguments() {
        let line = Line::render(Severity::Error, "PWR", &format_args!("brownout at {}mV", 2950));
        assert_eq!(line.as_str(), "[E] PWR: brownout at 2950mV\r\n");
    }

    #[test]
    fn test_exact_fit_is_not_truncated() {
        // "[D] X: " is 7 bytes.
        let text = "a".repeat(MAX_BODY_LEN - 7);
        let line = Line::render(Severity::Debug(1), "X", text.as_str());
        assert_eq!(line.as_str().len(), MAX_LINE_LEN);
        assert!(!line.is_truncated());
        assert!(line.as_str().ends_with(LINE_TERMINATOR));
    }

    #[test]
    fn test_overflow_truncates_to_max_len() {
        let text = "0123456789".repeat(MAX_LINE_LEN);
        let line = Line::render(Severity::Info, "LONG", text.as_str());

        assert!(line.is_truncated());
        assert_eq!(line.as_str().len(), MAX_LINE_LEN);
        assert!(line.as_str().ends_with(LINE_TERMINATOR));
        assert_eq!(line.as_str().matches(LINE_TERMINATOR).count(), 1);
        assert!(line.as_str().starts_with("[I] LONG: 0123456789"));
    }

    #[test]
    fn test_overflow_through_format_arguments() {
        let line = Line::render(
            Severity::Error,
            "FMT",
            &format_args!("{:>width$}", 7, width = MAX_LINE_LEN * 2),
        );
        assert!(line.is_truncated());
        assert_eq!(line.as_str().len(), MAX_LINE_LEN);
        let padding = line.as_str().trim_start_matches("[E] FMT: ").trim_end_matches(LINE_TERMINATOR);
        assert!(padding.chars().all(|c| c == ' '));
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // Each 'é' is two bytes; the odd header length forces a split inside one.
        let text = "é".repeat(MAX_LINE_LEN);
        let line = Line::render(Severity::Info, "U", text.as_str());

        assert!(line.is_truncated());
        assert!(line.as_str().len() <= MAX_LINE_LEN);
        assert!(line.as_str().len() >= MAX_LINE_LEN - 1);
        assert!(line.as_str().ends_with(LINE_TERMINATOR));
    }

    #[test]
    fn test_long_subsystem_still_terminated() {
        let subsystem = "S".repeat(MAX_LINE_LEN * 3);
        let line = Line::render(Severity::Debug(0), subsystem.as_str(), "never shown");
        assert!(line.is_truncated());
        assert_eq!(line.as_str().len(), MAX_LINE_LEN);
        assert!(!line.as_str().contains("never shown"));
        assert!(line.as_str().ends_with(LINE_TERMINATOR));
    }

    #[test]
    fn test_huge_float_precision_fills_line() {
        let args = [Arg::from(1.0)];
        for format in ["%.70000f", "%.99999999999999999999999999f", "%.70000e", "%#.70000g"] {
            let line = Line::render(Severity::Info, "X", &Printf::new(format, &args));
            assert!(line.is_truncated());
            assert_eq!(line.as_str().len(), MAX_LINE_LEN);
            assert!(line.as_str().starts_with("[I] X: 1.000"));
            assert!(line.as_str().ends_with(LINE_TERMINATOR));
        }
    }

    #[test]
    fn test_write_after_render_rejected() {
        let mut line = Line::render(Severity::Info, "A", "b");
        assert!(line.write_str("more").is_err());
        assert_eq!(line.as_str(), "[I] A: b\r\n");
    }
}
