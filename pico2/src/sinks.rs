//! Report sinks for the RP2350.
//!
//! One of them is installed at boot, picked by the `rtt` feature:
//!
//! - [`UartSink`] (default): blocking writes on UART0 TX.
//! - [`RttSink`]: lines forwarded to the defmt RTT channel.

use core::sync::atomic::AtomicU32;
#[cfg(not(feature = "rtt"))]
use core::sync::atomic::Ordering;

#[cfg(not(feature = "rtt"))]
use embassy_rp::uart::{Blocking, UartTx};
#[cfg(not(feature = "rtt"))]
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(not(feature = "rtt"))]
use embassy_sync::mutex::Mutex;
use report::Sink;

/// Lines dropped because the sink was busy with another caller.
pub static DROPPED_LINES: AtomicU32 = AtomicU32::new(0);

/// Sink writing each line to UART0 with blocking transfers.
///
/// The caller is blocked while its line is shifted out. A caller that finds
/// the UART held by another context (an interrupt preempting a task mid-line)
/// drops its line instead of waiting, so an interrupt handler never spins on a
/// lock its own preempted task holds.
#[cfg(not(feature = "rtt"))]
pub struct UartSink {
    tx: Mutex<CriticalSectionRawMutex, UartTx<'static, Blocking>>,
}

#[cfg(not(feature = "rtt"))]
impl UartSink {
    /// Wrap a blocking UART transmitter.
    pub const fn new(tx: UartTx<'static, Blocking>) -> Self { Self { tx: Mutex::new(tx) } }
}

#[cfg(not(feature = "rtt"))]
impl Sink for UartSink {
    fn write_line(
        &self,
        line: &str,
    ) {
        // Try to acquire lock without blocking
        if let Ok(mut tx) = self.tx.try_lock() {
            // Transport errors are the sink's business; the line is lost.
            let _ = tx.blocking_write(line.as_bytes());
        } else {
            DROPPED_LINES.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Sink forwarding lines to the defmt RTT channel.
#[cfg(feature = "rtt")]
pub struct RttSink;

#[cfg(feature = "rtt")]
impl Sink for RttSink {
    fn write_line(
        &self,
        line: &str,
    ) {
        // defmt frames carry their own line breaks.
        defmt::println!("{=str}", line.trim_end());
    }
}
