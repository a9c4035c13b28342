//! The capabilities a value needs before it can be huffman coded.
//!
//! Characters (bytes) and arbitrary tokens are two instances of the same contract: equality
//! and hashing so a symbol can key the leaf table, and a total order so ties during the tree
//! merge always resolve the same way.

use std::fmt::Debug;
use std::hash::Hash;

/// A value that can sit in a huffman leaf.
pub trait Symbol: Clone + Eq + Hash + Ord + Debug {
    /// Returns a value that is never equal to `self`. Used to give a one-symbol alphabet the
    /// second leaf every tree needs.
    fn companion(&self) -> Self;
}

/// A symbol that can travel as a single 32 bit value in the word container.
pub trait WordSymbol: Symbol {
    fn to_word(&self) -> u32;
    /// None if the word does not name a valid symbol.
    fn from_word(word: u32) -> Option<Self>;
}

macro_rules! complement_symbol {
    ($($t:ty),*) => {
        $(
            impl Symbol for $t {
                fn companion(&self) -> Self {
                    !*self
                }
            }
        )*
    };
}

// For bytes this is 255 - b, the companion the byte container has always used.
complement_symbol!(u8, u16, u32, u64, i32, i64);

impl Symbol for char {
    fn companion(&self) -> Self {
        let c = *self as u32;
        // Latin-1 complement for the low range, otherwise flip the low bit. Flipping bit 0
        // never lands inside the surrogate block or past char::MAX.
        let other = if c <= 0xff { 0xff - c } else { c ^ 1 };
        char::from_u32(other).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl Symbol for String {
    fn companion(&self) -> Self {
        let mut chars = self.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.companion().to_string(),
            _ => format!("{}+", self),
        }
    }
}

impl WordSymbol for u8 {
    fn to_word(&self) -> u32 {
        *self as u32
    }
    fn from_word(word: u32) -> Option<Self> {
        u8::try_from(word).ok()
    }
}

impl WordSymbol for u16 {
    fn to_word(&self) -> u32 {
        *self as u32
    }
    fn from_word(word: u32) -> Option<Self> {
        u16::try_from(word).ok()
    }
}

impl WordSymbol for u32 {
    fn to_word(&self) -> u32 {
        *self
    }
    fn from_word(word: u32) -> Option<Self> {
        Some(word)
    }
}

impl WordSymbol for char {
    fn to_word(&self) -> u32 {
        *self as u32
    }
    fn from_word(word: u32) -> Option<Self> {
        char::from_u32(word)
    }
}
