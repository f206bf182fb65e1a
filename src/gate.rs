//! Emission gate and the report entry points.
//!
//! Every report goes through one pipeline:
//!
//! 1. The gate decides. `Error` and `Info` always pass; `Debug(level)` passes
//!    while `level` is at or below the report level observed right now.
//! 2. A rejected report returns immediately. Nothing is formatted.
//! 3. An accepted report is rendered into a stack [`Line`] and handed to the
//!    sink before the call returns.
//!
//! The global functions use [`REPORT_LEVEL`] and the installed sink. A
//! [`Reporter`] runs the same pipeline against a level store and sink of the
//! caller's choosing.

use crate::level::{LevelStore, REPORT_LEVEL};
use crate::line::Line;
use crate::message::Message;
use crate::severity::Severity;
use crate::sink::{self, Sink};

/// Whether `severity` passes the gate of `store`.
#[inline]
pub fn passes(
    store: &LevelStore,
    severity: Severity,
) -> bool {
    severity.debug_level().is_none_or(|level| store.permits(level))
}

/// Render and hand over a report that already passed the gate.
fn dispatch<M: Message + ?Sized>(
    sink: &dyn Sink,
    severity: Severity,
    subsystem: &str,
    message: &M,
) {
    let line = Line::render(severity, subsystem, message);
    sink.write_line(line.as_str());
}

// =============================================================================
// Global Entry Points
// =============================================================================

/// Report `message` with `severity` through the process-wide gate and sink.
pub fn report<M: Message>(
    severity: Severity,
    subsystem: &str,
    message: M,
) {
    if passes(&REPORT_LEVEL, severity) {
        emit(severity, subsystem, &message);
    }
}

/// Report a fault. Never suppressed.
pub fn error<M: Message>(
    subsystem: &str,
    message: M,
) {
    report(Severity::Error, subsystem, message)
}

/// Report normal operation. Never suppressed.
pub fn info<M: Message>(
    subsystem: &str,
    message: M,
) {
    report(Severity::Info, subsystem, message)
}

/// Report debug output, emitted only while `level <= get_report_level()`.
pub fn debug<M: Message>(
    level: i32,
    subsystem: &str,
    message: M,
) {
    report(Severity::Debug(level), subsystem, message)
}

/// Whether a debug report of `level` would be emitted right now.
///
/// Lets callers skip expensive preparation of arguments.
#[inline]
pub fn debug_enabled(level: i32) -> bool { REPORT_LEVEL.permits(level) }

/// Hand an already gated report to the installed sink.
///
/// Used by the macros, which run the gate themselves before evaluating their
/// arguments.
#[doc(hidden)]
pub fn emit<M: Message + ?Sized>(
    severity: Severity,
    subsystem: &str,
    message: &M,
) {
    if let Some(sink) = sink::installed() {
        dispatch(sink, severity, subsystem, message);
    }
}

// =============================================================================
// Reporter
// =============================================================================

/// The report pipeline bound to an explicit level store and sink.
#[derive(Clone, Copy)]
pub struct Reporter<'a> {
    level: &'a LevelStore,
    sink: &'a dyn Sink,
}

impl<'a> Reporter<'a> {
    /// Bind a pipeline to `level` and `sink`.
    pub const fn new(
        level: &'a LevelStore,
        sink: &'a dyn Sink,
    ) -> Self {
        Self { level, sink }
    }

    /// The level store this reporter gates on.
    #[inline]
    pub const fn level(&self) -> &'a LevelStore { self.level }

    /// Whether `severity` would be emitted right now.
    #[inline]
    pub fn enabled(
        &self,
        severity: Severity,
    ) -> bool {
        passes(self.level, severity)
    }

    /// Report `message` with `severity`.
    pub fn report<M: Message>(
        &self,
        severity: Severity,
        subsystem: &str,
        message: M,
    ) {
        if self.enabled(severity) {
            dispatch(self.sink, severity, subsystem, &message);
        }
    }

    /// Report a fault. Never suppressed.
    pub fn error<M: Message>(
        &self,
        subsystem: &str,
        message: M,
    ) {
        self.report(Severity::Error, subsystem, message)
    }

    /// Report normal operation. Never suppressed.
    pub fn info<M: Message>(
        &self,
        subsystem: &str,
        message: M,
    ) {
        self.report(Severity::Info, subsystem, message)
    }

    /// Report debug output at `level`.
    pub fn debug<M: Message>(
        &self,
        level: i32,
        subsystem: &str,
        message: M,
    ) {
        self.report(Severity::Debug(level), subsystem, message)
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
