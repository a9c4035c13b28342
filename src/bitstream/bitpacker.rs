/// Packs variable length codes into a stream of 32 bit words, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u32>,
    word: u32,
    bits_left: u32,
}

impl BitPacker {
    /// Create a new BitPacker with room for `size` words. Call flush() to push the last,
    /// partly filled word before reading `output`.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            word: 0,
            bits_left: 32,
        }
    }

    /// Writes the low `len` bits of `code`, highest of those bits first. A code that does not
    /// fit the current word is split: its high bits finish this word and the rest start the
    /// next one. `len` may be anything up to 64.
    pub fn out(&mut self, code: u64, len: u32) {
        let mut len = len;
        while len > self.bits_left {
            let spill = len - self.bits_left;
            let high = (code >> spill) & low_mask(self.bits_left);
            self.word = shift_in(self.word, self.bits_left, high);
            self.output.push(self.word);
            self.word = 0;
            self.bits_left = 32;
            len = spill;
        }
        self.word = shift_in(self.word, len, code & low_mask(len));
        self.bits_left -= len;
    }

    /// Pushes the current word, padding the unused low bits with zeros. A word is always
    /// pushed, even an empty one, so a stream with no codes still ends in one word.
    pub fn flush(&mut self) {
        self.output.push(shift_in(self.word, self.bits_left, 0));
        self.word = 0;
        self.bits_left = 32;
    }

    /// Debugging function to return the number of words.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.output.len(), 32 - self.bits_left)
    }
}

/// Mask for the low `n` bits, n in 0..=64.
fn low_mask(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1 << n) - 1
    }
}

/// Shift `word` left by `n` (0..=32) and or in `bits`.
fn shift_in(word: u32, n: u32, bits: u64) -> u32 {
    (((word as u64) << n) | bits) as u32
}
