use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{info, warn};

use super::{DEPTH_BASE, SUFFIX};
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::{Compressed, Huffman};
use crate::huffman_coding::symbol::WordSymbol;
use crate::tools::cli::{HufOpts, Output};

/// Compress a byte string into the byte container.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    encode_bytes(&Huffman::new().compress(data)?)
}

/// Lay out a compressed byte string: (symbol, depth byte) pairs, then the payload words
/// big-endian.
pub fn encode_bytes(compressed: &Compressed<u8>) -> Result<Vec<u8>> {
    let mut out =
        Vec::with_capacity(compressed.dictionary.len() * 2 + compressed.payload.len() * 4);
    for entry in &compressed.dictionary {
        out.push(entry.symbol);
        out.push(depth_byte(entry.depth)?);
    }
    for word in &compressed.payload {
        out.extend_from_slice(&word.to_be_bytes());
    }
    Ok(out)
}

fn depth_byte(depth: u32) -> Result<u8> {
    u8::try_from(depth)
        .ok()
        .and_then(|d| d.checked_add(DEPTH_BASE))
        .ok_or(HuffError::DepthOverflow(depth))
}

/// Compress a sequence of word symbols into the word container.
pub fn compress_words<S: WordSymbol>(data: &[S]) -> Result<Vec<u32>> {
    Ok(encode_words(&Huffman::new().compress(data)?))
}

/// Lay out compressed word symbols: symbol, depth, symbol, depth, ..., then the payload.
pub fn encode_words<S: WordSymbol>(compressed: &Compressed<S>) -> Vec<u32> {
    let mut out = Vec::with_capacity(compressed.dictionary.len() * 2 + compressed.payload.len());
    for entry in &compressed.dictionary {
        out.push(entry.symbol.to_word());
        out.push(entry.depth);
    }
    out.extend_from_slice(&compressed.payload);
    out
}

/// Compress every file named in opts, or stdin to stdout when no file is named.
pub fn compress_file(opts: &HufOpts) -> Result<()> {
    if opts.files.is_empty() {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        let out = compress_reporting(opts, "stdin", &data)?;
        io::stdout().write_all(&out)?;
        return Ok(());
    }

    for fname in &opts.files {
        let data = fs::read(fname)?;
        let out = compress_reporting(opts, fname, &data)?;
        write_output(opts, &format!("{}{}", fname, SUFFIX), &out)?;
        remove_input(opts, fname)?;
    }
    Ok(())
}

fn compress_reporting(opts: &HufOpts, name: &str, data: &[u8]) -> Result<Vec<u8>> {
    let mut huffman = Huffman::new();
    let compressed = huffman.compress(data)?;
    show(opts, &huffman);
    let out = encode_bytes(&compressed)?;
    info!(
        "{}: {} bytes in, {} bytes out ({:.1}% of input)",
        name,
        data.len(),
        out.len(),
        100.0 * out.len() as f64 / data.len() as f64
    );
    Ok(out)
}

/// Print the tree and/or dictionary when asked. Goes to stderr so stdout output stays clean.
pub(crate) fn show(opts: &HufOpts, huffman: &Huffman<u8>) {
    if opts.show_tree {
        if let Some(tree) = huffman.tree() {
            eprintln!("{}", tree.describe(label));
        }
    }
    if opts.show_dictionary {
        if let Ok(dictionary) = huffman.dictionary() {
            for entry in dictionary {
                eprintln!("{:>6}  {}", label(&entry.symbol), entry.depth);
            }
        }
    }
}

fn label(byte: &u8) -> String {
    (*byte as char).escape_default().to_string()
}

/// Write to stdout or to `fname`, refusing to replace an existing file unless forced.
pub(crate) fn write_output(opts: &HufOpts, fname: &str, data: &[u8]) -> Result<()> {
    match opts.output {
        Output::Stdout => io::stdout().write_all(data)?,
        Output::File => {
            if Path::new(fname).exists() && !opts.force_overwrite {
                warn!("Output file {} already exists.", fname);
                return Err(HuffError::Io(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists, use --force to overwrite", fname),
                )));
            }
            fs::write(fname, data)?;
        }
    }
    Ok(())
}

/// Delete the input once its output is safely written, unless asked to keep it.
pub(crate) fn remove_input(opts: &HufOpts, fname: &str) -> Result<()> {
    if !opts.keep_input_files && matches!(opts.output, Output::File) {
        fs::remove_file(fname)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bytes_layout_test() {
        let out = compress_bytes("aaaabbbcc".as_bytes()).unwrap();
        let mut expected = b"a1b2c2".to_vec();
        expected.extend_from_slice(&[0, 0, 0, 9, 0x0a, 0xbc, 0, 0]);
        assert_eq!(out, expected);
    }

    #[test]
    fn single_symbol_layout_test() {
        let out = compress_bytes("zzzz".as_bytes()).unwrap();
        assert_eq!(
            out,
            vec![b'z', b'1', 255 - b'z', b'1', 0, 0, 0, 4, 0, 0, 0, 0]
        );
    }

    #[test]
    fn words_layout_test() {
        let out = compress_words(&[1_u32, 1, 1, 2, 2, 3]).unwrap();
        assert_eq!(out, vec![1, 1, 2, 2, 3, 2, 6, 0x1580_0000]);
    }

    #[test]
    fn empty_test() {
        assert!(matches!(compress_bytes(&[]), Err(HuffError::EmptyInput)));
        assert!(matches!(
            compress_words::<u32>(&[]),
            Err(HuffError::EmptyInput)
        ));
    }

    #[test]
    fn depth_byte_test() {
        assert_eq!(depth_byte(1).unwrap(), b'1');
        assert_eq!(depth_byte(10).unwrap(), b':');
        assert!(matches!(
            depth_byte(300),
            Err(HuffError::DepthOverflow(300))
        ));
        assert!(matches!(
            depth_byte(255 - b'0' as u32 + 1),
            Err(HuffError::DepthOverflow(_))
        ));
    }

    #[test]
    fn compress_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.txt");
        fs::write(&path, "aaaabbbcc").unwrap();
        let fname = path.to_string_lossy().to_string();
        let opts = HufOpts {
            files: vec![fname.clone()],
            ..HufOpts::new()
        };
        compress_file(&opts).unwrap();
        assert!(!path.exists());
        let packed = fs::read(format!("{}{}", fname, SUFFIX)).unwrap();
        assert_eq!(&packed[..6], b"a1b2c2");
    }

    #[test]
    fn no_overwrite_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.txt");
        fs::write(&path, "abc").unwrap();
        let fname = path.to_string_lossy().to_string();
        fs::write(format!("{}{}", fname, SUFFIX), "old").unwrap();
        let mut opts = HufOpts {
            files: vec![fname.clone()],
            keep_input_files: true,
            ..HufOpts::new()
        };
        assert!(matches!(compress_file(&opts), Err(HuffError::Io(_))));
        assert_eq!(fs::read(format!("{}{}", fname, SUFFIX)).unwrap(), b"old");

        opts.force_overwrite = true;
        compress_file(&opts).unwrap();
        assert!(path.exists());
        assert_ne!(fs::read(format!("{}{}", fname, SUFFIX)).unwrap(), b"old");
    }
}
