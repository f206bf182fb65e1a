//! Sink writer interface and the installed-sink slot.
//!
//! The sink is whatever transmits finished lines: a UART, an RTT channel, a
//! console. Exactly one is installed at a time. Until one is installed the
//! global entry points drop their lines, so reporting is safe from the first
//! instruction of `main`.
//!
//! The slot is read inside a critical section that only copies the
//! `&'static dyn Sink` out; the sink itself runs outside it.

use core::cell::Cell;

use critical_section::Mutex;

/// Destination of finished report lines.
///
/// `write_line` receives a complete line, terminator included, that never
/// exceeds [`MAX_LINE_LEN`](crate::config::MAX_LINE_LEN) bytes. It returns
/// nothing: a sink that cannot transmit drops the line. Any blocking is the
/// sink's own behavior; the facility adds no queuing or retries.
pub trait Sink: Sync {
    /// Transmit or record one line.
    fn write_line(
        &self,
        line: &str,
    );
}

impl<F> Sink for F
where
    F: Fn(&str) + Sync,
{
    fn write_line(
        &self,
        line: &str,
    ) {
        self(line)
    }
}

static INSTALLED: Mutex<Cell<Option<&'static dyn Sink>>> = Mutex::new(Cell::new(None));

/// Install `sink` as the destination of the global entry points.
///
/// Replaces any previously installed sink.
pub fn set_sink(sink: &'static dyn Sink) { critical_section::with(|cs| INSTALLED.borrow(cs).set(Some(sink))) }

/// Remove the installed sink; later lines are dropped.
pub fn clear_sink() { critical_section::with(|cs| INSTALLED.borrow(cs).set(None)) }

/// The currently installed sink, if any.
pub fn installed() -> Option<&'static dyn Sink> { critical_section::with(|cs| INSTALLED.borrow(cs).get()) }

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |line: &str| seen.lock().unwrap().push(line.to_owned());

        sink.write_line("[I] A: b\r\n");
        assert_eq!(seen.lock().unwrap().as_slice(), ["[I] A: b\r\n"]);
    }
}
