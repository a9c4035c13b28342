//! The compression module lays huffman output out as a single stream and drives the file tools.
//!
//! Two containers exist, chosen by what is being compressed:
//! - Byte strings: the dictionary is a symbol byte followed by a depth byte per leaf, then the
//!   payload (symbol count and packed words) as big-endian 4 byte groups.
//! - Word sequences: everything is a u32. The dictionary alternates symbol and depth, then the
//!   count and the packed words follow.
//!
//! In both, the payload starts right after the last dictionary entry the tree needed. There
//! is no separator and no checksum.
//!
//! Depth bytes are `b'0' + depth`. Depths 1-9 therefore read as the decimal digits older
//! streams used, while deeper leaves still take exactly one byte.

pub mod compress;
pub mod decompress;

/// Appended to a file name on compression, stripped on decompression.
pub const SUFFIX: &str = ".huf";

/// Depth bytes are offset from ASCII zero.
pub(crate) const DEPTH_BASE: u8 = b'0';

/// Most dictionary entries a tree is sized for up front. A byte container can never hold more
/// leaves than this; word trees grow past it as needed.
pub(crate) const ENTRY_HINT: usize = 256;
