//! Heartbeat task.
//!
//! Emits a report every `HEARTBEAT_MS` at the levels listed in
//! `config::levels`, so stepping the level button visibly changes how much
//! reaches the sink.

use core::sync::atomic::Ordering;

use embassy_time::{Duration, Instant, Ticker};
use report::{Arg, Printf};
use report_pico2::config::{HEARTBEAT_MS, STACK_WARN_PERCENT};
use report_pico2::stack::StackStats;

use crate::sinks::DROPPED_LINES;

/// Beats between uptime reports.
const UPTIME_EVERY: u32 = 10;

/// Beats between summary reports.
const SUMMARY_EVERY: u32 = 60;

#[embassy_executor::task]
pub async fn heartbeat_task() {
    defmt::info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_MS));
    let mut beat: u32 = 0;

    loop {
        ticker.next().await;
        let started = Instant::now();
        beat = beat.wrapping_add(1);

        report::debug!(1, "HB", "beat {}", beat);

        if beat % UPTIME_EVERY == 0 {
            let uptime_ms = Instant::now().as_millis();
            report::debug(3, "HB", Printf::new("uptime %llu ms", &[Arg::from(uptime_ms)]));
        }

        if report::debug_enabled(5) || beat % SUMMARY_EVERY == 0 {
            let stack = StackStats::collect();
            report::debug!(5, "MEM", "stack {} / {} bytes, room for {} lines", stack.used, stack.total, stack.headroom_lines());
            if stack.percent() >= STACK_WARN_PERCENT {
                report::error!("MEM", "stack at {}%", stack.percent());
            }
        }

        if beat % SUMMARY_EVERY == 0 {
            let dropped = DROPPED_LINES.load(Ordering::Relaxed);
            report::info!("HB", "{} beats, level {}, {} lines dropped", beat, report::get_report_level(), dropped);
        }

        report::debug!(9, "HB", "beat {} took {} us", beat, started.elapsed().as_micros());
    }
}
