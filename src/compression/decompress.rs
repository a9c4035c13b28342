use std::fs;
use std::io::{self, Read, Write};

use log::{debug, info, warn};

use super::compress::{remove_input, show, write_output};
use super::{DEPTH_BASE, ENTRY_HINT, SUFFIX};
use crate::error::{HuffError, Result};
use crate::huffman_coding::dictionary::{reconstruct_with, Entry};
use crate::huffman_coding::huffman::Huffman;
use crate::huffman_coding::symbol::WordSymbol;
use crate::tools::cli::HufOpts;

/// Decompress a byte container back into the original bytes.
pub fn decompress_bytes(stream: &[u8]) -> Result<Vec<u8>> {
    decode_bytes(&mut Huffman::new(), stream)
}

/// Decompress a byte container, leaving the rebuilt tree installed in `huffman`.
///
/// The payload is read as whole 4 byte words. A payload that does not end on a word boundary
/// fails with `TruncatedStream`.
pub fn decode_bytes(huffman: &mut Huffman<u8>, stream: &[u8]) -> Result<Vec<u8>> {
    if stream.is_empty() {
        return Err(HuffError::MissingDictionary);
    }
    let hint = (stream.len() / 2).min(ENTRY_HINT);
    let (tree, used) = reconstruct_with(hint, |i| byte_entry(stream, i))?;
    huffman.set_tree(tree);
    debug!("Dictionary of {} entries, payload at byte {}", used, used * 2);

    let payload = &stream[used * 2..];
    let chunks = payload.chunks_exact(4);
    let stray = chunks.remainder().len();
    let words: Vec<u32> = chunks
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    if stray > 0 {
        warn!("Payload ends with {} stray bytes", stray);
        let expected = *words.first().ok_or(HuffError::MissingCount)? as usize;
        return Err(HuffError::TruncatedStream {
            decoded: 0,
            expected,
        });
    }
    huffman.decompress_data(&words, 0)
}

fn byte_entry(stream: &[u8], i: usize) -> Result<Option<Entry<u8>>> {
    match (stream.get(2 * i), stream.get(2 * i + 1)) {
        (Some(&symbol), Some(&depth)) => depth
            .checked_sub(DEPTH_BASE)
            .map(|d| Some(Entry::new(symbol, d as u32)))
            .ok_or(HuffError::MalformedDictionary {
                entry: i,
                reason: "depth byte below '0'",
            }),
        _ => Ok(None),
    }
}

/// Decompress a word container back into the original symbols.
pub fn decompress_words<S: WordSymbol>(stream: &[u32]) -> Result<Vec<S>> {
    if stream.is_empty() {
        return Err(HuffError::MissingDictionary);
    }
    let hint = (stream.len() / 2).min(ENTRY_HINT);
    let (tree, used) = reconstruct_with(hint, |i| word_entry(stream, i))?;
    let mut huffman = Huffman::new();
    huffman.set_tree(tree);
    huffman.decompress_data(stream, used * 2)
}

fn word_entry<S: WordSymbol>(stream: &[u32], i: usize) -> Result<Option<Entry<S>>> {
    match (stream.get(2 * i), stream.get(2 * i + 1)) {
        (Some(&symbol), Some(&depth)) => S::from_word(symbol)
            .map(|sym| Some(Entry::new(sym, depth)))
            .ok_or(HuffError::MalformedDictionary {
                entry: i,
                reason: "word is not a valid symbol",
            }),
        _ => Ok(None),
    }
}

/// Decompress every file named in opts, or stdin to stdout when no file is named.
pub fn decompress_file(opts: &HufOpts) -> Result<()> {
    if opts.files.is_empty() {
        let out = unpack_reporting(opts, "stdin", &read_stdin()?)?;
        io::stdout().write_all(&out)?;
        return Ok(());
    }

    for fname in &opts.files {
        let stream = fs::read(fname)?;
        let out = unpack_reporting(opts, fname, &stream)?;
        write_output(opts, &output_name(fname), &out)?;
        remove_input(opts, fname)?;
    }
    Ok(())
}

/// Decompress every file named in opts in memory, writing nothing.
pub fn test_file(opts: &HufOpts) -> Result<()> {
    if opts.files.is_empty() {
        unpack_reporting(opts, "stdin", &read_stdin()?)?;
        info!("stdin: ok");
        return Ok(());
    }
    for fname in &opts.files {
        unpack_reporting(opts, fname, &fs::read(fname)?)?;
        info!("{}: ok", fname);
    }
    Ok(())
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut stream = Vec::new();
    io::stdin().read_to_end(&mut stream)?;
    Ok(stream)
}

fn unpack_reporting(opts: &HufOpts, name: &str, stream: &[u8]) -> Result<Vec<u8>> {
    let mut huffman = Huffman::new();
    let out = decode_bytes(&mut huffman, stream)?;
    show(opts, &huffman);
    info!(
        "{}: {} bytes in, {} bytes out",
        name,
        stream.len(),
        out.len()
    );
    Ok(out)
}

/// Strip our suffix, or tack on ".out" when the name does not carry it.
fn output_name(fname: &str) -> String {
    match fname.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => {
            warn!("Can't guess original name for {}, using {}.out", fname, fname);
            format!("{}.out", fname)
        }
    }
}
