//! Serial sink configuration.
//!
//! Reports leave on UART0 TX (GP0), 8N1. Any USB-serial adapter on GP0/GND
//! shows them in a terminal; lines end in CR LF.

/// UART0 baud rate.
pub const UART_BAUD: u32 = 115_200;
