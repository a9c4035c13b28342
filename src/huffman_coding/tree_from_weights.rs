//! Builds the canonical huffman tree for a run of symbols.
//!
//! Symbols are counted in first-seen order and the two lightest roots are merged until one
//! remains. Which child gets the zero edge is fixed by height and then by symbol order, so the
//! same frequencies in the same order always give the same tree. Decompression never depends on
//! this (the tree travels in the dictionary), but tests and repeated runs do.

use log::{debug, trace};

use super::symbol::Symbol;
use super::tree::{NodeId, Tree};
use crate::error::{HuffError, Result};
use crate::tools::freq_count::freqs;

/// Count the symbols in `data` and build their tree.
pub fn build_tree<S: Symbol>(data: &[S]) -> Result<Tree<S>> {
    tree_from_weights(freqs(data))
}

/// Build a tree from (symbol, frequency) pairs. The order of `weights` is the scan order used
/// to break frequency ties. Symbols must be distinct.
pub fn tree_from_weights<S: Symbol>(mut weights: Vec<(S, u64)>) -> Result<Tree<S>> {
    // We want at least two different symbols.
    if weights.len() == 1 {
        let companion = weights[0].0.companion();
        trace!("Adding companion symbol {:?} to a one symbol tree", companion);
        weights.push((companion, 0));
    }
    if weights.is_empty() {
        return Err(HuffError::EmptyInput);
    }

    let mut tree = Tree::with_capacity(weights.len());
    let mut roots: Vec<NodeId> = Vec::with_capacity(weights.len());
    for (sym, weight) in weights {
        let leaf = tree
            .add_leaf(sym, weight)
            .ok_or(HuffError::MalformedDictionary {
                entry: roots.len(),
                reason: "symbol listed twice",
            })?;
        roots.push(leaf);
    }

    // Pare the roots down to one node, keeping the scan order stable.
    while roots.len() > 1 {
        let (least, second) = two_lightest(&tree, &roots);
        let (zero, one) = if least_takes_zero(&tree, roots[least], roots[second]) {
            (roots[least], roots[second])
        } else {
            (roots[second], roots[least])
        };
        roots[least] = tree.join(zero, one);
        roots.remove(second);
    }
    tree.set_root(roots[0]);

    debug!(
        "Built huffman tree: {} leaves, height {}, {} symbols",
        tree.leaf_count(),
        tree.height(),
        tree.node(tree.root()).weight
    );
    Ok(tree)
}

/// Positions in `roots` of the lightest and second lightest nodes. On equal weights the node
/// found first wins.
fn two_lightest<S: Symbol>(tree: &Tree<S>, roots: &[NodeId]) -> (usize, usize) {
    let weight = |i: usize| tree.node(roots[i]).weight;
    let (mut least, mut second) = if weight(1) < weight(0) { (1, 0) } else { (0, 1) };
    for i in 2..roots.len() {
        if weight(i) < weight(least) {
            second = least;
            least = i;
        } else if weight(i) < weight(second) {
            second = i;
        }
    }
    (least, second)
}

/// The shorter node takes the zero edge. On equal heights the smaller symbol does, and two
/// internal nodes (no symbol) leave the lightest on zero.
fn least_takes_zero<S: Symbol>(tree: &Tree<S>, least: NodeId, second: NodeId) -> bool {
    let (l, s) = (tree.node(least), tree.node(second));
    match l.height.cmp(&s.height) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => l.symbol() <= s.symbol(),
    }
}
