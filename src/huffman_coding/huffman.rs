use log::{debug, info, trace};

use super::dictionary::{self, Entry};
use super::symbol::Symbol;
use super::tree::{Code, NodeData, Tree};
use super::tree_from_weights::build_tree;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};

/// A dictionary and its packed payload. The payload is the symbol count followed by the
/// packed code words.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Compressed<S> {
    pub dictionary: Vec<Entry<S>>,
    pub payload: Vec<u32>,
}

/// A huffman coder. Owns one tree at a time and the codes derived from it so far.
///
/// Codes are worked out the first time a symbol is packed and kept in a table indexed by leaf.
/// Building or installing a tree throws the table away.
#[derive(Debug, Clone)]
pub struct Huffman<S: Symbol> {
    tree: Option<Tree<S>>,
    codes: Vec<Option<Code>>,
}

impl<S: Symbol> Default for Huffman<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> Huffman<S> {
    pub fn new() -> Self {
        Self {
            tree: None,
            codes: Vec::new(),
        }
    }

    /// Create a coder with the tree described by `entries` already installed.
    pub fn with_dictionary(entries: &[Entry<S>]) -> Result<Self> {
        let mut huffman = Self::new();
        huffman.set_dictionary(entries)?;
        Ok(huffman)
    }

    pub fn tree(&self) -> Option<&Tree<S>> {
        self.tree.as_ref()
    }

    /// Replace the current tree.
    pub fn set_tree(&mut self, tree: Tree<S>) {
        self.codes = vec![None; tree.node_count()];
        self.tree = Some(tree);
    }

    /// Count `data` and build its tree.
    pub fn build_tree(&mut self, data: &[S]) -> Result<()> {
        let tree = build_tree(data)?;
        self.set_tree(tree);
        Ok(())
    }

    /// The current tree's leaves as (symbol, depth) entries.
    pub fn dictionary(&self) -> Result<Vec<Entry<S>>> {
        let tree = self.tree.as_ref().ok_or(HuffError::NoTree)?;
        Ok(dictionary::serialize(tree))
    }

    /// Install the tree described by `entries`. Returns how many entries the tree used; any
    /// entries after those are ignored.
    pub fn set_dictionary(&mut self, entries: &[Entry<S>]) -> Result<usize> {
        if entries.is_empty() {
            return Err(HuffError::EmptyInput);
        }
        let (tree, used) = dictionary::reconstruct(entries)?;
        self.set_tree(tree);
        Ok(used)
    }

    /// The code for `symbol`, derived on first use.
    pub fn code(&mut self, symbol: &S) -> Result<Code> {
        let tree = self.tree.as_ref().ok_or(HuffError::NoTree)?;
        let leaf = tree
            .leaf(symbol)
            .ok_or_else(|| HuffError::UnknownSymbol(format!("{:?}", symbol)))?;
        if let Some(code) = self.codes[leaf] {
            return Ok(code);
        }
        let code = tree.path_code(leaf)?;
        self.codes[leaf] = Some(code);
        Ok(code)
    }

    /// Pack `data` with the current tree: one count word, then the codes packed into words.
    pub fn compress_data(&mut self, data: &[S]) -> Result<Vec<u32>> {
        let count = u32::try_from(data.len()).map_err(|_| HuffError::TooManySymbols(data.len()))?;
        let mut bp = BitPacker::new(data.len() / 16 + 2);
        // The count word leads the payload.
        bp.output.push(count);
        for sym in data {
            let code = self.code(sym)?;
            bp.out(code.bits, code.len);
        }
        bp.flush();
        trace!("Packed {} symbols, ending at {}", count, bp.loc());
        Ok(bp.output)
    }

    /// Unpack a payload starting at word `start` of `words` with the current tree.
    ///
    /// Only running out of words is detected. A payload that is long enough but was packed
    /// with a different tree, or was damaged, decodes to whatever its bits spell.
    pub fn decompress_data(&self, words: &[u32], start: usize) -> Result<Vec<S>> {
        let tree = self.tree.as_ref().ok_or(HuffError::NoTree)?;
        let mut br = BitReader::new(words, start);
        let expected = br.word().ok_or(HuffError::MissingCount)? as usize;

        // Every symbol takes at least one bit.
        let room = words.len().saturating_sub(start.saturating_add(1)).saturating_mul(32);
        let mut data = Vec::with_capacity(expected.min(room));

        for decoded in 0..expected {
            let mut node = tree.root();
            loop {
                match &tree.node(node).node_data {
                    NodeData::Leaf(sym) => {
                        data.push(sym.clone());
                        break;
                    }
                    NodeData::Kids { zero, one } => {
                        node = match br.bit() {
                            Some(0) => *zero,
                            Some(_) => *one,
                            None => {
                                return Err(HuffError::TruncatedStream { decoded, expected })
                            }
                        }
                    }
                }
            }
        }
        trace!("Unpacked {} symbols, ending at {}", expected, br.loc());
        Ok(data)
    }

    /// Build a tree from `data` and return its dictionary with the packed payload.
    pub fn compress(&mut self, data: &[S]) -> Result<Compressed<S>> {
        self.build_tree(data)?;
        let dictionary = self.dictionary()?;
        let payload = self.compress_data(data)?;
        info!(
            "Compressed {} symbols: {} dictionary entries, {} payload words",
            data.len(),
            dictionary.len(),
            payload.len()
        );
        Ok(Compressed {
            dictionary,
            payload,
        })
    }

    /// Install the dictionary carried by `compressed` and unpack its payload.
    pub fn decompress(&mut self, compressed: &Compressed<S>) -> Result<Vec<S>> {
        if compressed.dictionary.is_empty() {
            return Err(HuffError::MissingDictionary);
        }
        let used = self.set_dictionary(&compressed.dictionary)?;
        debug!("Installed dictionary of {} entries", used);
        self.decompress_data(&compressed.payload, 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_test() {
        let text = "aaaabbbcc".as_bytes();
        let mut huffman = Huffman::new();
        let compressed = huffman.compress(text).unwrap();
        assert_eq!(compressed.dictionary.len(), 3);
        assert_eq!(compressed.payload, vec![9, 0x0abc_0000]);
        assert_eq!(Huffman::new().decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn single_symbol_test() {
        let text = "zzzz".as_bytes();
        let mut huffman = Huffman::new();
        let compressed = huffman.compress(text).unwrap();
        assert_eq!(huffman.tree().unwrap().leaf_count(), 2);
        assert_eq!(compressed.payload, vec![4, 0]);
        assert_eq!(Huffman::new().decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn generic_test() {
        let data = [1_u32, 1, 1, 2, 2, 3];
        let compressed = Huffman::new().compress(&data).unwrap();
        assert_eq!(compressed.payload, vec![6, 0x1580_0000]);
        assert_eq!(Huffman::new().decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn token_test() {
        let words: Vec<String> = "it was the best of times it was the worst of times"
            .split(' ')
            .map(String::from)
            .collect();
        let compressed = Huffman::new().compress(&words).unwrap();
        assert_eq!(Huffman::new().decompress(&compressed).unwrap(), words);
    }

    #[test]
    fn single_token_test() {
        let words = vec!["ab".to_string(); 3];
        let mut huffman = Huffman::new();
        let compressed = huffman.compress(&words).unwrap();
        assert!(huffman.tree().unwrap().leaf(&"ab+".to_string()).is_some());
        assert_eq!(Huffman::new().decompress(&compressed).unwrap(), words);
    }

    #[test]
    fn empty_test() {
        let mut huffman: Huffman<u8> = Huffman::new();
        assert!(matches!(huffman.compress(&[]), Err(HuffError::EmptyInput)));
        assert!(huffman.tree().is_none());
        assert!(matches!(
            huffman.set_dictionary(&[]),
            Err(HuffError::EmptyInput)
        ));
        let empty = Compressed {
            dictionary: vec![],
            payload: vec![0, 0],
        };
        assert!(matches!(
            huffman.decompress(&empty),
            Err(HuffError::MissingDictionary)
        ));
    }

    #[test]
    fn no_tree_test() {
        let mut huffman: Huffman<u8> = Huffman::new();
        assert!(matches!(huffman.dictionary(), Err(HuffError::NoTree)));
        assert!(matches!(huffman.code(&b'a'), Err(HuffError::NoTree)));
        assert!(matches!(
            huffman.decompress_data(&[1, 0], 0),
            Err(HuffError::NoTree)
        ));
    }

    #[test]
    fn lazy_code_test() {
        let mut huffman = Huffman::new();
        huffman.build_tree("aaaabbbcc".as_bytes()).unwrap();
        assert!(huffman.codes.iter().all(Option::is_none));
        assert_eq!(huffman.code(&b'b').unwrap(), Code { bits: 0b10, len: 2 });
        assert_eq!(huffman.codes.iter().filter(|c| c.is_some()).count(), 1);
        // A rebuild drops every derived code.
        huffman.build_tree("xy".as_bytes()).unwrap();
        assert!(huffman.codes.iter().all(Option::is_none));
    }

    #[test]
    fn unknown_symbol_test() {
        let mut huffman = Huffman::new();
        huffman.build_tree("abc".as_bytes()).unwrap();
        assert!(matches!(
            huffman.compress_data("abd".as_bytes()),
            Err(HuffError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn separate_dictionary_test() {
        // Dictionary and payload moved separately, payload at an offset in a shared stream.
        let text = "hello huffman".as_bytes();
        let mut sender = Huffman::new();
        sender.build_tree(text).unwrap();
        let dict = sender.dictionary().unwrap();
        let mut stream = vec![0xdead_beef, 0xfeed_face];
        stream.extend(sender.compress_data(text).unwrap());

        let receiver = Huffman::with_dictionary(&dict).unwrap();
        assert_eq!(receiver.decompress_data(&stream, 2).unwrap(), text);
        assert!(receiver.tree().unwrap().same_shape(sender.tree().unwrap()));
    }

    #[test]
    fn reuse_tree_test() {
        let mut huffman = Huffman::new();
        huffman.build_tree("abcabcabc".as_bytes()).unwrap();
        let payload = huffman.compress_data("cab".as_bytes()).unwrap();
        assert_eq!(huffman.decompress_data(&payload, 0).unwrap(), b"cab");
        let nothing = huffman.compress_data(&[]).unwrap();
        assert_eq!(nothing, vec![0, 0]);
        assert!(huffman.decompress_data(&nothing, 0).unwrap().is_empty());
    }

    #[test]
    fn truncated_test() {
        let text = "abcdefghabcdefgh".as_bytes();
        let mut huffman = Huffman::new();
        let compressed = huffman.compress(text).unwrap();
        // 16 symbols of 3 bits need two words; drop the second.
        let short = &compressed.payload[..2];
        assert!(matches!(
            huffman.decompress_data(short, 0),
            Err(HuffError::TruncatedStream {
                decoded: 10,
                expected: 16
            })
        ));
        assert!(matches!(
            huffman.decompress_data(&[], 0),
            Err(HuffError::MissingCount)
        ));
        assert!(matches!(
            huffman.decompress_data(&compressed.payload, usize::MAX),
            Err(HuffError::MissingCount)
        ));
    }

    #[test]
    fn skewed_round_trip_test() {
        // Fibonacci weights give the deepest possible tree, with codes crossing word borders.
        let mut data = Vec::new();
        let (mut a, mut b) = (1, 1);
        for sym in 0..20_u32 {
            data.extend(std::iter::repeat(sym).take(a));
            let next = a + b;
            a = b;
            b = next;
        }
        let mut huffman = Huffman::new();
        let compressed = huffman.compress(&data).unwrap();
        assert!(huffman.tree().unwrap().height() >= 18);
        assert!(huffman.tree().unwrap().verify());
        assert_eq!(Huffman::new().decompress(&compressed).unwrap(), data);
    }
}
