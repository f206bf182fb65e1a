//! Stack usage measurement for RP2350.
//!
//! Every report renders its line in a stack buffer, so the heartbeat keeps an
//! eye on how much stack is left for them.
//!
//! # Stack
//!
//! Embassy uses a single main stack that grows downward from the top of RAM.
//! Usage is measured by comparing MSP to that top.

/// RP2350 RAM configuration.
const RAM_START: u32 = 0x2000_0000;
const RAM_SIZE: u32 = 512 * 1024; // 512KB
const RAM_END: u32 = RAM_START + RAM_SIZE;

/// Stack region reserved for the main stack (linker default for this firmware).
pub const STACK_SIZE: u32 = 64 * 1024;

/// Stack usage snapshot.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct StackStats {
    /// Bytes in use below the top of RAM.
    pub used: u32,
    /// Size of the stack region.
    pub total: u32,
}

impl StackStats {
    /// Build a snapshot from a stack pointer value.
    pub const fn from_stack_ptr(stack_ptr: u32) -> Self {
        Self {
            used: RAM_END.saturating_sub(stack_ptr),
            total: STACK_SIZE,
        }
    }

    /// Collect current stack statistics.
    #[cfg(target_arch = "arm")]
    pub fn collect() -> Self { Self::from_stack_ptr(cortex_m::register::msp::read()) }

    /// Get stack usage as a percentage, clamped to 100.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((u64::from(self.used) * 100) / u64::from(self.total)).min(100) as u32
    }

    /// How many more report lines fit in the remaining stack.
    pub fn headroom_lines(&self) -> u32 {
        self.total.saturating_sub(self.used) / report::config::MAX_LINE_LEN as u32
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(RAM_SIZE, 524_288); // 512KB
        assert_eq!(RAM_END, 0x2008_0000);
    }

    #[test]
    fn test_from_stack_ptr() {
        let stats = StackStats::from_stack_ptr(RAM_END - 4096);
        assert_eq!(stats.used, 4096);
        assert_eq!(stats.total, STACK_SIZE);
    }

    #[test]
    fn test_stack_ptr_above_ram_end() {
        let stats = StackStats::from_stack_ptr(RAM_END + 16);
        assert_eq!(stats.used, 0);
        assert_eq!(stats.percent(), 0);
    }

    #[test]
    fn test_percent() {
        let stats = StackStats { used: 1000, total: 10_000 };
        assert_eq!(stats.percent(), 10);

        let overflowed = StackStats { used: 20_000, total: 10_000 };
        assert_eq!(overflowed.percent(), 100);

        assert_eq!(StackStats::default().percent(), 0);
    }

    #[test]
    fn test_headroom_lines() {
        let line = report::config::MAX_LINE_LEN as u32;
        let stats = StackStats { used: 0, total: line * 10 + 1 };
        assert_eq!(stats.headroom_lines(), 10);

        let full = StackStats { used: line * 10, total: line * 10 };
        assert_eq!(full.headroom_lines(), 0);
    }
}
