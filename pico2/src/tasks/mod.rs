//! Async tasks for the report firmware.
//!
//! - `heartbeat`: Periodic reports at several debug levels

pub mod heartbeat;

pub use heartbeat::heartbeat_task;
