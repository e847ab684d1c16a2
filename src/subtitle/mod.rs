//! Script to SRT conversion
//!
//! This module turns free-text narration scripts into SubRip subtitles:
//! - Sentence splitting on `.`, `!`, `?` and newline runs
//! - Greedy packing of sentences into blocks bounded by characters and words
//! - Word-level chunking of sentences too large for a single block
//! - Cumulative timing across several scripts with an inter-script pause
//! - SRT block formatting (`HH:MM:SS,000`)
//!
//! Everything here is pure and synchronous. Running state is passed in and
//! returned by value, so independent conversions never share anything.

pub mod converter;
pub mod packer;
pub mod sentence;
pub mod srt;
pub mod timing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use converter::{convert_script, convert_scripts, Conversion, ScriptConversion};
pub use timing::RunningClock;

/// Invalid converter settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("max_chars_per_block must be greater than zero")]
    ZeroCharLimit,

    #[error("max_words_per_block must be greater than zero")]
    ZeroWordLimit,

    #[error("block_duration_secs must be greater than zero")]
    ZeroBlockDuration,

    #[error("{field} must be at most {max} seconds")]
    TimingTooLarge { field: &'static str, max: u64 },
}

/// Upper bound for each timing setting (one day)
pub const MAX_TIMING_SECS: u64 = 86_400;

/// Block limits and timing constants used by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SrtSettings {
    /// Maximum characters per subtitle block
    pub max_chars_per_block: usize,

    /// Maximum words per subtitle block
    pub max_words_per_block: usize,

    /// On-screen duration of every block in seconds
    pub block_duration_secs: u64,

    /// Pause between consecutive blocks in seconds
    pub block_gap_secs: u64,

    /// Pause between the last block of a script and the first of the next
    pub script_gap_secs: u64,
}

impl Default for SrtSettings {
    fn default() -> Self {
        Self {
            max_chars_per_block: 500,
            max_words_per_block: 100,
            block_duration_secs: 30,
            block_gap_secs: 10,
            script_gap_secs: 600,
        }
    }
}

impl SrtSettings {
    /// Seconds the clock advances after each emitted block
    pub fn block_step_secs(&self) -> u64 {
        self.block_duration_secs.saturating_add(self.block_gap_secs)
    }

    /// Reject settings the packer cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_chars_per_block == 0 {
            return Err(SettingsError::ZeroCharLimit);
        }
        if self.max_words_per_block == 0 {
            return Err(SettingsError::ZeroWordLimit);
        }
        if self.block_duration_secs == 0 {
            return Err(SettingsError::ZeroBlockDuration);
        }
        for (field, value) in [
            ("block_duration_secs", self.block_duration_secs),
            ("block_gap_secs", self.block_gap_secs),
            ("script_gap_secs", self.script_gap_secs),
        ] {
            if value > MAX_TIMING_SECS {
                return Err(SettingsError::TimingTooLarge {
                    field,
                    max: MAX_TIMING_SECS,
                });
            }
        }
        Ok(())
    }
}
