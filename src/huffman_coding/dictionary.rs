//! Dictionary codec: a tree travels as its leaves alone.
//!
//! A full binary tree is fixed by its leaves in zero-before-one order together with each
//! leaf's depth. While rebuilding, the depth of the next unread entry says whether it is the
//! child being resolved (depth matches) or sits further down (depth is larger), so no
//! internal node needs to be sent.

use super::symbol::Symbol;
use super::tree::{NodeId, Tree, MAX_CODE_LENGTH};
use crate::error::{HuffError, Result};

/// One serialized leaf.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Entry<S> {
    pub symbol: S,
    /// Edges between the leaf and the root.
    pub depth: u32,
}

impl<S> Entry<S> {
    pub fn new(symbol: S, depth: u32) -> Self {
        Self { symbol, depth }
    }
}

/// List the tree's leaves, zero subtree first, with their depths.
pub fn serialize<S: Symbol>(tree: &Tree<S>) -> Vec<Entry<S>> {
    tree.leaves_in_order()
        .into_iter()
        .filter_map(|(id, depth)| {
            tree.node(id)
                .symbol()
                .map(|sym| Entry::new(sym.clone(), depth))
        })
        .collect()
}

/// Rebuild a tree from a slice of entries. Entries past the ones the tree needs are left
/// alone. Returns the tree and how many entries it used.
pub fn reconstruct<S: Symbol>(entries: &[Entry<S>]) -> Result<(Tree<S>, usize)> {
    reconstruct_with(entries.len(), |i| Ok(entries.get(i).cloned()))
}

/// Rebuild a tree from entries fetched one at a time by index. `entry_at` returns None once
/// the source is exhausted, or an error if the data at that index is not a valid entry. This
/// lets a container decode entries straight out of a stream that also carries the payload.
pub fn reconstruct_with<S, F>(size_hint: usize, mut entry_at: F) -> Result<(Tree<S>, usize)>
where
    S: Symbol,
    F: FnMut(usize) -> Result<Option<Entry<S>>>,
{
    let mut tree = Tree::with_capacity(size_hint);
    let (zero, cursor) = resolve(&mut tree, &mut entry_at, 1, 0)?;
    let (one, cursor) = resolve(&mut tree, &mut entry_at, 1, cursor)?;
    let root = tree.join(zero, one);
    tree.set_root(root);
    Ok((tree, cursor))
}

/// Resolve the child at `depth` starting with the entry under `cursor`. Returns the child and
/// the cursor just past the entries it used.
fn resolve<S, F>(
    tree: &mut Tree<S>,
    entry_at: &mut F,
    depth: u32,
    cursor: usize,
) -> Result<(NodeId, usize)>
where
    S: Symbol,
    F: FnMut(usize) -> Result<Option<Entry<S>>>,
{
    let entry = entry_at(cursor)?.ok_or(HuffError::MalformedDictionary {
        entry: cursor,
        reason: "entries exhausted before the tree was complete",
    })?;

    if entry.depth > MAX_CODE_LENGTH {
        return Err(HuffError::MalformedDictionary {
            entry: cursor,
            reason: "leaf deeper than the longest code",
        });
    }

    if entry.depth == depth {
        let leaf = tree
            .add_leaf(entry.symbol, 0)
            .ok_or(HuffError::MalformedDictionary {
                entry: cursor,
                reason: "symbol listed twice",
            })?;
        Ok((leaf, cursor + 1))
    } else if entry.depth > depth {
        // Deeper leaf: this child is internal. Nothing consumed yet.
        let (zero, cursor) = resolve(tree, entry_at, depth + 1, cursor)?;
        let (one, cursor) = resolve(tree, entry_at, depth + 1, cursor)?;
        Ok((tree.join(zero, one), cursor))
    } else {
        Err(HuffError::MalformedDictionary {
            entry: cursor,
            reason: "leaf shallower than the node it must fill",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::tree_from_weights::build_tree;

    fn entries(list: &[(char, u32)]) -> Vec<Entry<char>> {
        list.iter().map(|&(s, d)| Entry::new(s, d)).collect()
    }

    #[test]
    fn serialize_test() {
        let tree = build_tree(&"aaaabbbcc".chars().collect::<Vec<_>>()).unwrap();
        assert_eq!(
            serialize(&tree),
            entries(&[('a', 1), ('b', 2), ('c', 2)])
        );
    }

    #[test]
    fn round_trip_test() {
        let text: Vec<char> = "a man, a plan, a canal: panama".chars().collect();
        let tree = build_tree(&text).unwrap();
        let dict = serialize(&tree);
        let (rebuilt, used) = reconstruct(&dict).unwrap();
        assert_eq!(used, dict.len());
        assert!(rebuilt.same_shape(&tree));
        assert!(rebuilt.verify());
        assert_eq!(serialize(&rebuilt), dict);
    }

    #[test]
    fn trailing_entries_test() {
        // The dictionary only needs the first three entries.
        let dict = entries(&[('x', 2), ('y', 2), ('z', 1), ('q', 7)]);
        let (tree, used) = reconstruct(&dict).unwrap();
        assert_eq!(used, 3);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.leaf(&'q'), None);
        let (zero, one) = tree.kids(tree.root()).unwrap();
        assert!(tree.kids(zero).is_some());
        assert_eq!(tree.node(one).symbol(), Some(&'z'));
    }

    #[test]
    fn exhausted_test() {
        let dict = entries(&[('a', 1), ('b', 2)]);
        assert!(matches!(
            reconstruct(&dict),
            Err(HuffError::MalformedDictionary { entry: 2, .. })
        ));
        assert!(matches!(
            reconstruct::<char>(&[]),
            Err(HuffError::MalformedDictionary { entry: 0, .. })
        ));
    }

    #[test]
    fn shallow_entry_test() {
        let dict = entries(&[('a', 0), ('b', 1)]);
        assert!(matches!(
            reconstruct(&dict),
            Err(HuffError::MalformedDictionary { entry: 0, .. })
        ));
    }

    #[test]
    fn too_deep_test() {
        let dict = entries(&[('a', 1000), ('b', 1)]);
        assert!(reconstruct(&dict).is_err());
    }

    #[test]
    fn duplicate_symbol_test() {
        let dict = entries(&[('a', 1), ('a', 1)]);
        assert!(matches!(
            reconstruct(&dict),
            Err(HuffError::MalformedDictionary { entry: 1, .. })
        ));
    }

    #[test]
    fn fallible_source_test() {
        let result: Result<(Tree<char>, usize)> = reconstruct_with(2, |i| {
            if i == 0 {
                Ok(Some(Entry::new('a', 1)))
            } else {
                Err(HuffError::MalformedDictionary {
                    entry: i,
                    reason: "bad symbol",
                })
            }
        });
        assert!(matches!(
            result,
            Err(HuffError::MalformedDictionary { entry: 1, .. })
        ));
    }
}
