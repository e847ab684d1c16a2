//! Sentence splitting
//!
//! A sentence unit is a regex match of text ending in one or more of `.`,
//! `!`, `?`, or whatever text is left after the last match. Newline runs
//! also match but never produce text of their own. Text the scan steps over
//! without matching (an unterminated line in front of a newline run, or
//! leading terminators) is dropped.

use regex::Matches;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Lazy iterator over the trimmed sentence units of a script
pub struct Sentences<'t> {
    text: &'t str,
    matches: Matches<'static, 't>,
    /// Byte offset just past the last match
    pos: usize,
    done: bool,
}

impl<'t> Sentences<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            matches: regex!(r"[^.!?]+[.!?]+|\n+").find_iter(text),
            pos: 0,
            done: false,
        }
    }
}

/// Split a script into sentence units
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences::new(text)
}

fn unit(fragment: &str) -> Option<&str> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

impl<'t> Iterator for Sentences<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.done {
            return None;
        }
        for m in self.matches.by_ref() {
            self.pos = m.end();
            if let Some(sentence) = unit(m.as_str()) {
                return Some(sentence);
            }
        }
        self.done = true;
        unit(&self.text[self.pos..])
    }
}
