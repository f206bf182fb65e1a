//! Report level stepping for the level button.
//!
//! Each press moves the report level to the next configured step, wrapping
//! back to the first after the last. Starting from an arbitrary level the
//! cycler picks the highest step at or below it, so the first press always
//! moves to a more verbose step (or wraps).

/// Cycles through a fixed list of report levels.
pub struct LevelCycler<'a> {
    steps: &'a [i32],
    index: usize,
}

impl<'a> LevelCycler<'a> {
    /// Create a cycler over `steps`, positioned at `current`.
    pub fn new(
        steps: &'a [i32],
        current: i32,
    ) -> Self {
        let index = steps
            .iter()
            .enumerate()
            .filter(|&(_, &step)| step <= current)
            .max_by_key(|&(_, &step)| step)
            .map_or(0, |(index, _)| index);
        Self { steps, index }
    }

    /// Level at the current position, `None` without steps.
    #[inline]
    pub fn current(&self) -> Option<i32> { self.steps.get(self.index).copied() }

    /// Move to the next step and return its level, `None` without steps.
    pub fn advance(&mut self) -> Option<i32> {
        if self.steps.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.steps.len();
        self.current()
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
