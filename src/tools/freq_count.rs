use rustc_hash::FxHashMap;

use crate::huffman_coding::symbol::Symbol;

/// Returns a frequency count of the input data, one entry per distinct symbol in the order
/// the symbols were first seen.
pub fn freqs<S: Symbol>(data: &[S]) -> Vec<(S, u64)> {
    let mut index: FxHashMap<&S, usize> = FxHashMap::default();
    let mut counts: Vec<(S, u64)> = Vec::new();
    data.iter().for_each(|sym| match index.get(sym) {
        Some(&i) => counts[i].1 += 1,
        None => {
            index.insert(sym, counts.len());
            counts.push((sym.clone(), 1));
        }
    });
    counts
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn first_seen_order_test() {
        let counts = freqs("abracadabra".as_bytes());
        assert_eq!(
            counts,
            vec![(b'a', 5), (b'b', 2), (b'r', 2), (b'c', 1), (b'd', 1)]
        );
    }

    #[test]
    fn empty_test() {
        assert!(freqs::<u32>(&[]).is_empty());
    }

    #[test]
    fn token_test() {
        let words = ["to", "be", "or", "not", "to", "be"].map(String::from);
        let counts = freqs(&words);
        assert_eq!(counts[0], ("to".to_string(), 2));
        assert_eq!(counts[3], ("not".to_string(), 1));
    }
}
