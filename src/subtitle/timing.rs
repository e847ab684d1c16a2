//! Timestamp allocation

use serde::Serialize;

use super::packer::Block;
use super::SrtSettings;

/// Running counter and clock carried across scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunningClock {
    /// Index of the next subtitle entry (1-based)
    pub next_index: usize,
    /// Start time of the next entry in seconds
    pub elapsed_secs: u64,
}

impl Default for RunningClock {
    fn default() -> Self {
        Self {
            next_index: 1,
            elapsed_secs: 0,
        }
    }
}

impl RunningClock {
    pub fn new(next_index: usize, elapsed_secs: u64) -> Self {
        Self {
            next_index,
            elapsed_secs,
        }
    }

    /// Clock after a pause of `secs`, index unchanged
    pub fn pause(self, secs: u64) -> Self {
        Self {
            elapsed_secs: self.elapsed_secs.saturating_add(secs),
            ..self
        }
    }
}

/// A timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start_secs: u64,
    pub end_secs: u64,
    pub text: String,
}

#[cfg(test)]
impl SubtitleEntry {
    pub fn duration_secs(&self) -> u64 {
        self.end_secs - self.start_secs
    }
}

/// Assign an index and a time range to each block, in order.
///
/// Returns the entries and the clock positioned after the last one.
pub fn allocate(
    blocks: Vec<Block>,
    clock: RunningClock,
    settings: &SrtSettings,
) -> (Vec<SubtitleEntry>, RunningClock) {
    let mut clock = clock;
    let entries = blocks
        .into_iter()
        .map(|block| {
            let entry = SubtitleEntry {
                index: clock.next_index,
                start_secs: clock.elapsed_secs,
                end_secs: clock.elapsed_secs.saturating_add(settings.block_duration_secs),
                text: block.text,
            };
            clock.next_index += 1;
            clock.elapsed_secs = clock.elapsed_secs.saturating_add(settings.block_step_secs());
            entry
        })
        .collect();
    (entries, clock)
}
