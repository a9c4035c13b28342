//! Canonical huffman coding of byte strings and arbitrary symbol sequences.
//!
//! A tree is built from symbol frequencies with a deterministic tie-break, so the same input
//! always gives the same tree. The tree is shipped as a dictionary of leaf depths, from which
//! the decompressor rebuilds it exactly, and the data is packed into 32 bit words.
//!
//! Basic usage:
//!
//! ```
//! use huffpack::{compress_bytes, decompress_bytes};
//!
//! let packed = compress_bytes(b"aaaabbbcc").unwrap();
//! assert_eq!(decompress_bytes(&packed).unwrap(), b"aaaabbbcc");
//! ```
//!
//! The command line tool compresses files in the same format:
//!
//! `$> huffpack -z notes.txt`
//!
//! This will compress the file and create notes.txt.huf.
//! The original file will be deleted unless `-k` is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress_bytes, compress_words};
pub use compression::decompress::{decompress_bytes, decompress_words};
pub use error::{HuffError, Result};
pub use huffman_coding::huffman::{Compressed, Huffman};
pub use huffman_coding::symbol::{Symbol, WordSymbol};
