//! SubRip formatting

use std::fmt;

use super::timing::SubtitleEntry;

/// Format whole seconds as an SRT timestamp (HH:MM:SS,000)
///
/// Milliseconds are always zero since block times are whole seconds.
pub fn format_srt_timestamp(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02},000", hours, minutes, seconds)
}

impl fmt::Display for SubtitleEntry {
    /// Four lines: index, time range, text, blank line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n\n",
            self.index,
            format_srt_timestamp(self.start_secs),
            format_srt_timestamp(self.end_secs),
            self.text.trim()
        )
    }
}

/// Render entries as one SRT document body
pub fn render(entries: &[SubtitleEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.to_string());
    }
    output
}
