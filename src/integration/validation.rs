//! SRT validation utilities

use crate::subtitle::SrtSettings;

/// One entry read back from SRT text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub index: usize,
    pub start_secs: u64,
    pub end_secs: u64,
    pub text: String,
}

/// Parse `HH:MM:SS,mmm` into whole seconds
fn parse_timestamp(value: &str) -> Result<u64, String> {
    let (clock, millis) = value
        .split_once(',')
        .ok_or_else(|| format!("Missing milliseconds in {:?}", value))?;
    if millis != "000" {
        return Err(format!("Non-zero milliseconds in {:?}", value));
    }
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Malformed timestamp {:?}", value));
    }
    let mut secs = 0u64;
    for (part, scale) in parts.iter().zip([3600u64, 60, 1]) {
        if part.len() < 2 {
            return Err(format!("Unpadded field in {:?}", value));
        }
        let n: u64 = part
            .parse()
            .map_err(|_| format!("Bad number in {:?}", value))?;
        secs += n * scale;
    }
    Ok(secs)
}

/// Parse SRT text produced by the converter
pub fn parse_srt(content: &str) -> Result<Vec<ParsedEntry>, String> {
    if content.is_empty() {
        return Ok(Vec::new());
    }

    content
        .split("\n\n")
        .map(|block| {
            let mut lines = block.lines();
            let index = lines
                .next()
                .and_then(|l| l.parse().ok())
                .ok_or_else(|| format!("Bad index line in block {:?}", block))?;
            let times = lines
                .next()
                .ok_or_else(|| format!("Missing time line in block {:?}", block))?;
            let (start, end) = times
                .split_once(" --> ")
                .ok_or_else(|| format!("Bad time line {:?}", times))?;
            let text: Vec<&str> = lines.collect();
            if text.len() != 1 {
                return Err(format!("Expected one text line in block {:?}", block));
            }
            Ok(ParsedEntry {
                index,
                start_secs: parse_timestamp(start)?,
                end_secs: parse_timestamp(end)?,
                text: text[0].to_string(),
            })
        })
        .collect()
}

/// Validate converter output against its ordering, timing and size rules
pub fn validate_srt(content: &str, settings: &SrtSettings) -> ValidationResult {
    let entries = match parse_srt(content) {
        Ok(entries) => entries,
        Err(e) => return ValidationResult::fail(e),
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if content.ends_with(char::is_whitespace) {
        errors.push("Output has trailing whitespace".to_string());
    }

    let in_script_gap = settings.block_gap_secs;
    let between_scripts_gap = settings.block_gap_secs + settings.script_gap_secs;

    for (i, entry) in entries.iter().enumerate() {
        if entry.index != i + 1 {
            errors.push(format!("Entry {} has index {}", i + 1, entry.index));
        }
        if entry.end_secs - entry.start_secs != settings.block_duration_secs {
            errors.push(format!(
                "Entry {} lasts {}s",
                entry.index,
                entry.end_secs - entry.start_secs
            ));
        }

        let words = entry.text.split_whitespace().count();
        let chars = entry.text.chars().count();
        if words > settings.max_words_per_block {
            errors.push(format!("Entry {} has {} words", entry.index, words));
        }
        if chars > settings.max_chars_per_block {
            if words == 1 {
                warnings.push(format!(
                    "Entry {} is a single {}-char word",
                    entry.index, chars
                ));
            } else {
                errors.push(format!("Entry {} has {} chars", entry.index, chars));
            }
        }
        if entry.text.contains("  ") || entry.text != entry.text.trim() {
            errors.push(format!("Entry {} has unnormalized whitespace", entry.index));
        }

        if i > 0 {
            let gap = entry.start_secs as i64 - entries[i - 1].end_secs as i64;
            if gap != in_script_gap as i64 && gap != between_scripts_gap as i64 {
                errors.push(format!(
                    "Gap of {}s before entry {}",
                    gap, entry.index
                ));
            }
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:00:00,000"), Ok(0));
        assert_eq!(parse_timestamp("01:02:03,000"), Ok(3723));
        assert!(parse_timestamp("00:00:00,500").is_err());
        assert!(parse_timestamp("0:00:00,000").is_err());
    }

    #[test]
    fn test_validate_valid_srt() {
        let content = "1\n00:00:00,000 --> 00:00:30,000\nOne.\n\n\
                       2\n00:00:40,000 --> 00:01:10,000\nTwo.\n\n\
                       3\n00:11:20,000 --> 00:11:50,000\nThree.";
        let result = validate_srt(content, &SrtSettings::default());
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_validate_catches_index_gap() {
        let content = "1\n00:00:00,000 --> 00:00:30,000\nOne.\n\n\
                       3\n00:00:40,000 --> 00:01:10,000\nTwo.";
        let result = validate_srt(content, &SrtSettings::default());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_validate_catches_bad_gap() {
        let content = "1\n00:00:00,000 --> 00:00:30,000\nOne.\n\n\
                       2\n00:00:35,000 --> 00:01:05,000\nTwo.";
        let result = validate_srt(content, &SrtSettings::default());
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("Gap of 5s"));
    }

    #[test]
    fn test_validate_empty() {
        assert!(validate_srt("", &SrtSettings::default()).is_valid);
    }
}
