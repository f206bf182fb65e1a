//! Level button debounce handling.
//!
//! Time-based edge detection so that contact bounce on the Y button does not
//! skip report levels.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// An active-low push button with debounced press detection.
pub struct Button<'d> {
    input: Input<'d>,
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl<'d> Button<'d> {
    /// Wrap an input configured with a pull-up.
    pub const fn new(input: Input<'d>) -> Self {
        Self {
            input,
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true once per press, on the debounced falling edge.
    pub fn just_pressed(&mut self) -> bool {
        let is_low = self.input.is_low();
        if is_low == self.was_pressed {
            return false;
        }

        // Ignore edges inside the debounce window
        if let Some(last) = self.last_change
            && last.elapsed() < Duration::from_millis(DEBOUNCE_MS)
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change = Some(Instant::now());
        is_low
    }
}
