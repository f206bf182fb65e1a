//! Firmware configuration.
//!
//! - `levels`: Report level steps and heartbeat cadence
//! - `uart`: Serial sink settings

pub mod levels;
pub mod uart;

// Re-export at config level for convenience
pub use levels::{BUTTON_POLL_MS, HEARTBEAT_MS, LEVEL_STEPS, STACK_WARN_PERCENT};
pub use uart::UART_BAUD;
