//! Block packing
//!
//! Sentence units are packed greedily into blocks, bounded by a character
//! limit and a word limit. A unit that cannot fit in any block on its own is
//! cut into word chunks, each of which becomes a standalone block.

use super::SrtSettings;

/// Text destined for a single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
}

impl Block {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
impl Block {
    /// Number of whitespace separated words
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of characters (not bytes)
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy block accumulator
#[derive(Debug, Default)]
struct Accumulator {
    text: String,
    words: usize,
    chars: usize,
}

impl Accumulator {
    fn push(&mut self, sentence: &str, words: usize, chars: usize) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(sentence);
        self.words += words;
        self.chars += chars;
    }

    /// Take the pending block, leaving the accumulator empty
    fn flush(&mut self) -> Option<Block> {
        if self.text.is_empty() {
            return None;
        }
        let block = Block::new(std::mem::take(&mut self.text));
        self.words = 0;
        self.chars = 0;
        Some(block)
    }
}

/// Pack sentence units into blocks.
///
/// Character totals count one extra separator per sentence when testing
/// whether a sentence fits, except for the sentence that opens a fresh block
/// after a flush, which is counted bare.
pub fn pack_blocks<'a, I>(sentences: I, settings: &SrtSettings) -> Vec<Block>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_chars = settings.max_chars_per_block;
    let max_words = settings.max_words_per_block;

    let mut blocks = Vec::new();
    let mut current = Accumulator::default();

    for raw in sentences {
        let sentence = normalize_whitespace(raw);
        if sentence.is_empty() {
            continue;
        }
        let words = sentence.split_whitespace().count();
        let bare_chars = sentence.chars().count();
        let chars = bare_chars + 1;

        if chars > max_chars || words > max_words {
            blocks.extend(current.flush());
            let chunks = split_word_chunks(&sentence, max_chars, max_words);
            tracing::trace!(
                "Oversized sentence ({} chars, {} words) split into {} chunks",
                bare_chars,
                words,
                chunks.len()
            );
            blocks.extend(chunks.into_iter().map(Block::new));
            continue;
        }

        if current.words + words <= max_words && current.chars + chars <= max_chars {
            current.push(&sentence, words, chars);
        } else {
            blocks.extend(current.flush());
            current.push(&sentence, words, bare_chars);
        }
    }

    blocks.extend(current.flush());
    blocks
}

/// Split text into chunks of whole words under both limits.
///
/// A word longer than `max_chars` cannot be cut and is returned as a chunk
/// of its own.
pub fn split_word_chunks(text: &str, max_chars: usize, max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    let mut chars = 0usize;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        let added = if words.is_empty() { len } else { len + 1 };

        if chars + added > max_chars || words.len() + 1 > max_words {
            if !words.is_empty() {
                chunks.push(words.join(" "));
            }
            words.clear();
            words.push(word);
            chars = len;
        } else {
            words.push(word);
            chars += added;
        }
    }

    if !words.is_empty() {
        chunks.push(words.join(" "));
    }
    chunks
}
