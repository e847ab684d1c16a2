//! Script conversion
//!
//! Runs splitting, packing, timing and formatting for one script, and threads
//! the running clock through an ordered list of scripts.

use serde::Serialize;

use super::packer::pack_blocks;
use super::sentence::split_sentences;
use super::srt;
use super::timing::{allocate, RunningClock, SubtitleEntry};
use super::SrtSettings;

/// Result of converting a single script
#[derive(Debug, Clone)]
pub struct ScriptConversion {
    /// SRT text for this script, every block ending in a blank line
    pub srt: String,
    pub entries: Vec<SubtitleEntry>,
    /// Clock positioned after the last entry of this script
    pub clock: RunningClock,
}

/// Result of converting an ordered list of scripts
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Complete SRT document, trailing whitespace trimmed
    pub srt: String,
    pub entries: Vec<SubtitleEntry>,
    /// Number of non-empty scripts that were converted
    pub scripts_converted: usize,
    /// Clock after the last script
    pub clock: RunningClock,
}

impl Conversion {
    /// Number of subtitle entries emitted
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Convert one script starting at the given clock
pub fn convert_script(text: &str, clock: RunningClock, settings: &SrtSettings) -> ScriptConversion {
    let blocks = pack_blocks(split_sentences(text), settings);
    let (entries, clock) = allocate(blocks, clock, settings);
    ScriptConversion {
        srt: srt::render(&entries),
        entries,
        clock,
    }
}

/// Convert scripts in order into one SRT document.
///
/// Blank scripts are skipped without touching the clock. Every converted
/// script except the last one in the list is followed by the inter-script
/// pause.
pub fn convert_scripts<S: AsRef<str>>(scripts: &[S], settings: &SrtSettings) -> Conversion {
    let mut srt = String::new();
    let mut entries = Vec::new();
    let mut clock = RunningClock::default();
    let mut scripts_converted = 0;

    for (idx, script) in scripts.iter().enumerate() {
        let text = script.as_ref().trim();
        if text.is_empty() {
            continue;
        }

        let converted = convert_script(text, clock, settings);
        tracing::debug!(
            "Script {} converted: {} entries, clock now {}s",
            idx + 1,
            converted.entries.len(),
            converted.clock.elapsed_secs
        );
        srt.push_str(&converted.srt);
        entries.extend(converted.entries);
        clock = converted.clock;
        scripts_converted += 1;

        if idx < scripts.len() - 1 {
            clock = clock.pause(settings.script_gap_secs);
        }
    }

    srt.truncate(srt.trim_end().len());

    Conversion {
        srt,
        entries,
        scripts_converted,
        clock,
    }
}
