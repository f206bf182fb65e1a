//! Report firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Brings up the board, installs the report sink and keeps a heartbeat
//! running so the facility can be watched on a serial terminal.
//!
//! # Outputs
//!
//! - **UART0 TX (GP0)**: report lines, 115200 8N1 (default)
//! - **RTT**: report lines when built with `--features rtt`; firmware bring-up
//!   messages always go to RTT via defmt
//!
//! # Button Controls
//!
//! - **Y (GP15)**: Step the report level through `config::LEVEL_STEPS`

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

// Modules only used in the binary (not testable on host)
mod button;
mod sinks;
mod tasks;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::Timer;
use report_pico2::config::{BUTTON_POLL_MS, LEVEL_STEPS};
use report_pico2::level_cycle::LevelCycler;
use {defmt_rtt as _, panic_probe as _};

use crate::button::Button;
use crate::tasks::heartbeat_task;

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-report"),
    embassy_rp::binary_info::rp_program_description!(c"Leveled diagnostic reporting over UART0"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Report firmware starting");

    // Install the sink before anything reports
    #[cfg(not(feature = "rtt"))]
    {
        use embassy_rp::uart::{Config, UartTx};
        use report_pico2::config::UART_BAUD;
        use static_cell::StaticCell;

        use crate::sinks::UartSink;

        let mut config = Config::default();
        config.baudrate = UART_BAUD;
        let tx = UartTx::new_blocking(p.UART0, p.PIN_0, config);

        static UART_SINK: StaticCell<UartSink> = StaticCell::new();
        let sink: &'static UartSink = UART_SINK.init(UartSink::new(tx));
        report::set_sink(sink);
        info!("Reports routed to UART0 at {} baud", UART_BAUD);
    }

    #[cfg(feature = "rtt")]
    {
        static RTT_SINK: crate::sinks::RttSink = crate::sinks::RttSink;
        report::set_sink(&RTT_SINK);
        info!("Reports routed to RTT");
    }

    report::info!("BOOT", "report level {}", report::get_report_level());

    spawner.spawn(heartbeat_task()).unwrap();
    info!("Heartbeat task spawned");

    // Y button, active-low with internal pull-up
    let mut level_button = Button::new(Input::new(p.PIN_15, Pull::Up));
    let mut cycler = LevelCycler::new(&LEVEL_STEPS, report::get_report_level());

    loop {
        if level_button.just_pressed()
            && let Some(level) = cycler.advance()
        {
            report::set_report_level(level);
            report::info!("CTL", "report level {}", level);
        }

        Timer::after_millis(BUTTON_POLL_MS).await;
    }
}
