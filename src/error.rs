//! Error types shared by the huffman coder, the wire containers and the file tools.

use thiserror::Error;

/// Everything that can stop a build, compress or decompress operation.
///
/// All of these are fatal to the operation that raised them. Nothing is retried and
/// no partial output is handed back.
#[derive(Debug, Error)]
pub enum HuffError {
    /// No data to build a tree from, or no dictionary entries to install.
    #[error("empty input: nothing to build a huffman tree from")]
    EmptyInput,

    /// A symbol being packed has no leaf in the current tree.
    #[error("symbol {0} is not in the huffman tree")]
    UnknownSymbol(String),

    /// Dictionary entries ran out (or made no sense) before the tree was complete.
    #[error("malformed dictionary at entry {entry}: {reason}")]
    MalformedDictionary { entry: usize, reason: &'static str },

    /// The payload ended before all declared symbols were decoded.
    #[error("payload truncated after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: usize, expected: usize },

    /// The payload does not even hold its leading symbol count.
    #[error("payload is missing its symbol count")]
    MissingCount,

    /// Decompression was asked to work on an empty stream.
    #[error("compressed stream is empty, no dictionary to read")]
    MissingDictionary,

    /// A dictionary or code was requested before any tree exists.
    #[error("no huffman tree has been built or installed")]
    NoTree,

    /// A leaf is too deep to be written as a single depth byte.
    #[error("leaf depth {0} cannot be stored in a byte dictionary")]
    DepthOverflow(u32),

    /// A leaf is deeper than the widest code we can hold.
    #[error("code length {0} exceeds the 64 bit code limit")]
    CodeTooLong(u32),

    /// The symbol count does not fit the 32 bit count word.
    #[error("{0} symbols do not fit a 32 bit count")]
    TooManySymbols(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffError>;
