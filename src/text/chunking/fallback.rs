//! Length-bounded chunking for text without timing
//!
//! Splits on whitespace and packs words greedily, so a chunk never starts or
//! ends inside a word. Lengths are counted in `char`s.

use super::types::{Chunk, ChunkType};
use tracing::warn;

/// Greedy word accumulator for a single chunking pass
struct WordBuffer {
    max_chars: usize,
    text: String,
    chars: usize,
    words: usize,
}

impl WordBuffer {
    fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            text: String::new(),
            chars: 0,
            words: 0,
        }
    }

    fn fits(&self, word_chars: usize) -> bool {
        self.words == 0 || self.chars + 1 + word_chars <= self.max_chars
    }

    fn push(&mut self, word: &str, word_chars: usize) {
        if self.words > 0 {
            self.text.push(' ');
            self.chars += 1;
        }
        self.text.push_str(word);
        self.chars += word_chars;
        self.words += 1;
    }

    /// Close the buffered chunk, if any
    fn take(&mut self, chunk_index: usize) -> Option<Chunk> {
        if self.words == 0 {
            return None;
        }
        let chunk_type = if self.chars > self.max_chars {
            ChunkType::OversizedWord
        } else {
            ChunkType::LengthBounded
        };
        let text = std::mem::take(&mut self.text);
        self.chars = 0;
        self.words = 0;
        Some(Chunk::from_text(text, chunk_index, chunk_type))
    }
}

/// Split `text` into chunks of at most `max_chunk_chars` characters.
///
/// Words are separated by a single space in the output. A word longer than the
/// limit is emitted alone as an [`ChunkType::OversizedWord`] chunk instead of
/// being cut. `max_chunk_chars` is expected to be positive (validated by
/// [`super::config::ChunkingConfig::validate`]).
pub fn chunk_plain_text(text: &str, max_chunk_chars: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buffer = WordBuffer::new(max_chunk_chars);

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if !buffer.fits(word_chars) {
            chunks.extend(buffer.take(chunks.len()));
        }
        if word_chars > max_chunk_chars {
            warn!(
                "Word of {} chars exceeds max_chunk_chars={}, keeping it whole",
                word_chars, max_chunk_chars
            );
        }
        buffer.push(word, word_chars);
    }
    chunks.extend(buffer.take(chunks.len()));

    chunks
}
