//! The bitstream module forms the I/O subsystem for huffpack.
//!
//! Huffman codes are packed most significant bit first into 32 bit words. A code that does
//! not fit the word being filled is split across the word boundary. The reader walks the same
//! words back one bit at a time and may start at any word, so a payload can follow other data
//! in one stream.
//!
pub mod bitpacker;
pub mod bitreader;
