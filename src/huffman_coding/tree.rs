//! Arena storage for a full binary huffman tree.
//!
//! Nodes live in one `Vec` and refer to each other by index. Children are owned through
//! `NodeData::Kids`; the `parent` index is a plain back-link used only to walk from a leaf
//! up to the root when a code is derived.

use std::fmt;

use rustc_hash::FxHashMap;

use super::symbol::Symbol;
use crate::error::{HuffError, Result};

/// Longest code a leaf may have. Codes are held in a u64.
pub const MAX_CODE_LENGTH: u32 = 64;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData<S> {
    Kids { zero: NodeId, one: NodeId },
    Leaf(S),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node<S> {
    /// Frequency of the symbol, or the sum of both children.
    pub weight: u64,
    /// 0 for a leaf, otherwise 1 + the taller child.
    pub height: u32,
    pub parent: Option<NodeId>,
    pub node_data: NodeData<S>,
}

impl<S> Node<S> {
    pub fn symbol(&self) -> Option<&S> {
        match &self.node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids { .. } => None,
        }
    }
}

/// A leaf's code. Bit 0 is the edge nearest the leaf, bit `len - 1` the edge at the root, so
/// emitting from the high bit down replays the root-to-leaf path.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Code {
    pub bits: u64,
    pub len: u32,
}

#[derive(Debug, Clone)]
pub struct Tree<S: Symbol> {
    nodes: Vec<Node<S>>,
    root: NodeId,
    leaves: FxHashMap<S, NodeId>,
}

impl<S: Symbol> Tree<S> {
    /// Start an empty arena. The tree is not usable until `set_root` is called.
    pub(crate) fn with_capacity(leaves: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(leaves.saturating_mul(2)),
            root: 0,
            leaves: FxHashMap::default(),
        }
    }

    /// Add a detached leaf. Returns None if the symbol already has a leaf.
    pub(crate) fn add_leaf(&mut self, symbol: S, weight: u64) -> Option<NodeId> {
        if self.leaves.contains_key(&symbol) {
            return None;
        }
        let id = self.nodes.len();
        self.leaves.insert(symbol.clone(), id);
        self.nodes.push(Node {
            weight,
            height: 0,
            parent: None,
            node_data: NodeData::Leaf(symbol),
        });
        Some(id)
    }

    /// Make a new internal node over two detached nodes and return it.
    pub(crate) fn join(&mut self, zero: NodeId, one: NodeId) -> NodeId {
        let id = self.nodes.len();
        let (z, o) = (&self.nodes[zero], &self.nodes[one]);
        let node = Node {
            weight: z.weight + o.weight,
            height: 1 + z.height.max(o.height),
            parent: None,
            node_data: NodeData::Kids { zero, one },
        };
        self.nodes[zero].parent = Some(id);
        self.nodes[one].parent = Some(id);
        self.nodes.push(node);
        id
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id]
    }

    /// Children of an internal node as (zero, one), None for a leaf.
    pub fn kids(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        match self.nodes[id].node_data {
            NodeData::Kids { zero, one } => Some((zero, one)),
            NodeData::Leaf(_) => None,
        }
    }

    /// The leaf holding `symbol`, if any.
    pub fn leaf(&self, symbol: &S) -> Option<NodeId> {
        self.leaves.get(symbol).copied()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn height(&self) -> u32 {
        self.nodes[self.root].height
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Leaves with their depth, zero subtree before one subtree.
    pub fn leaves_in_order(&self) -> Vec<(NodeId, u32)> {
        let mut out = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![(self.root, 0_u32)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id].node_data {
                NodeData::Kids { zero, one } => {
                    // one pushed first so zero comes off the stack first
                    stack.push((one, depth + 1));
                    stack.push((zero, depth + 1));
                }
                NodeData::Leaf(_) => out.push((id, depth)),
            }
        }
        out
    }

    /// Walk from a leaf to the root collecting its code.
    pub fn path_code(&self, leaf: NodeId) -> Result<Code> {
        let mut bits = 0_u64;
        let mut len = 0_u32;
        let mut current = leaf;
        while let Some(parent) = self.nodes[current].parent {
            if len == MAX_CODE_LENGTH {
                return Err(HuffError::CodeTooLong(self.depth(leaf)));
            }
            if let NodeData::Kids { one, .. } = self.nodes[parent].node_data {
                if one == current {
                    bits |= 1 << len;
                }
            }
            len += 1;
            current = parent;
        }
        Ok(Code { bits, len })
    }

    /// Check the shape invariants: two children per internal node, weight and height rules,
    /// parent links pointing back at the owner and a leaf table matching the leaves.
    pub fn verify(&self) -> bool {
        if self.nodes.is_empty() || self.nodes[self.root].parent.is_some() {
            return false;
        }
        let mut seen_leaves = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            match &node.node_data {
                NodeData::Kids { zero, one } => {
                    let (z, o) = (&self.nodes[*zero], &self.nodes[*one]);
                    if node.weight != z.weight + o.weight
                        || node.height != 1 + z.height.max(o.height)
                        || z.parent != Some(id)
                        || o.parent != Some(id)
                    {
                        return false;
                    }
                    stack.push(*zero);
                    stack.push(*one);
                }
                NodeData::Leaf(sym) => {
                    if node.height != 0 || self.leaf(sym) != Some(id) {
                        return false;
                    }
                    seen_leaves += 1;
                }
            }
        }
        seen_leaves == self.leaf_count() && seen_leaves >= 2
    }

    /// Same shape and same symbols at the same places. Weights are not compared, so a tree
    /// rebuilt from its dictionary matches the tree it came from.
    pub fn same_shape(&self, other: &Tree<S>) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (&self.nodes[a].node_data, &other.nodes[b].node_data) {
                (NodeData::Kids { zero: az, one: ao }, NodeData::Kids { zero: bz, one: bo }) => {
                    stack.push((*az, *bz));
                    stack.push((*ao, *bo));
                }
                (NodeData::Leaf(x), NodeData::Leaf(y)) if x == y => {}
                _ => return false,
            }
        }
        true
    }

    /// Render the tree as `[symbol,frequency,height](zero,one)`, using `label` for symbols.
    pub fn describe<F: Fn(&S) -> String>(&self, label: F) -> String {
        let mut out = String::new();
        self.describe_node(self.root, &label, &mut out);
        out
    }

    fn describe_node<F: Fn(&S) -> String>(&self, id: NodeId, label: &F, out: &mut String) {
        let node = &self.nodes[id];
        match &node.node_data {
            NodeData::Kids { zero, one } => {
                out.push_str(&format!("[null,{},{}](", node.weight, node.height));
                self.describe_node(*zero, label, out);
                out.push(',');
                self.describe_node(*one, label, out);
                out.push(')');
            }
            NodeData::Leaf(sym) => {
                out.push_str(&format!("[{},{},{}]", label(sym), node.weight, node.height));
            }
        }
    }
}

impl<S: Symbol> fmt::Display for Tree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(|sym| format!("{:?}", sym)))
    }
}
