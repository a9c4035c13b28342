//! BitReader: reads a stream of 32 bit words one bit at a time.
//!
//! The reader can start at any word of the slice, so a dictionary (or anything else) may
//! precede the packed data in the same stream.

const WORD_BITS: u32 = 32;

/// Reads bits, most significant first, out of a slice of 32 bit words.
#[derive(Debug)]
pub struct BitReader<'a> {
    words: &'a [u32],
    cursor: usize,
    bit_index: u32,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned at word `start`.
    pub fn new(words: &'a [u32], start: usize) -> Self {
        Self {
            words,
            cursor: start,
            bit_index: 0,
        }
    }

    /// Return the next bit (1 or 0), or None if there is no more data to read.
    pub fn bit(&mut self) -> Option<u32> {
        let word = *self.words.get(self.cursor)?;
        let bit = (word >> (WORD_BITS - 1 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == WORD_BITS {
            self.cursor += 1;
            self.bit_index = 0;
        }
        Some(bit)
    }

    /// Returns the next whole word. Only meaningful on a word boundary; any partly read word
    /// is skipped first.
    pub fn word(&mut self) -> Option<u32> {
        if self.bit_index > 0 {
            self.cursor += 1;
            self.bit_index = 0;
        }
        let word = *self.words.get(self.cursor)?;
        self.cursor += 1;
        Some(word)
    }

    /// Debugging function. Report current position as [word.bit].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
