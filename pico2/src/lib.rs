//! Report firmware library - testable modules for the RP2350 integration.
//!
//! This library contains the logic that can be tested on the host machine.
//! The binary (`main.rs`) uses this library and adds the embedded-specific
//! code: UART/RTT sinks, the heartbeat task and the level button.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p report-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p report-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod level_cycle;
pub mod stack;
