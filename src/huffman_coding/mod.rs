//! The huffman module builds, ships and applies canonical huffman trees.
//!
//! - symbol: what a value must support to be coded (equality, hashing, ordering).
//! - tree: the arena that stores nodes and parent links, and walks a leaf up to its code.
//! - tree_from_weights: frequency count and the bottom-up merge with its fixed tie-breaks.
//! - dictionary: a tree reduced to its (symbol, depth) leaves and rebuilt from them.
//! - huffman: the coder. It owns one tree, derives codes lazily and packs or unpacks data.
//!
//! A tree is built once per compression and rebuilt from the dictionary on decompression.
//! It is never shared between threads, and codes derived from it live exactly as long as it.
//!

pub mod dictionary;
pub mod huffman;
pub mod symbol;
pub mod tree;
pub mod tree_from_weights;
