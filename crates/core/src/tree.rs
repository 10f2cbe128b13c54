//! Huffman tree construction.
//!
//! Nodes live in a flat arena and refer to their children by [`NodeId`].
//! Leaves are allocated first, one per present symbol in ascending symbol
//! order; each merge appends one internal node. A node's id is therefore
//! also the order in which it entered the priority queue.
//!
//! # Tie-break
//!
//! The queue pops the node with the smallest `(weight, id)`. Among equal
//! weights, older nodes win: leaves before merged nodes, lower symbols before
//! higher ones. The same frequency table always yields the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Handle to a node in a [`PrefixTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the prefix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    /// Always has both children; the tree is full.
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A full binary tree whose leaves are the symbols of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Queue entry ordered so that `BinaryHeap` pops the lightest, oldest node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    weight: u64,
    id: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PrefixTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node popped becomes the left child, the second the right.
    /// A single-symbol table produces a lone leaf root.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if no symbol is present.
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        let symbols = freqs.len();
        if symbols == 0 {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        let mut nodes = Vec::with_capacity(2 * symbols - 1);
        let mut queue = BinaryHeap::with_capacity(symbols);

        for (symbol, weight) in freqs.iter() {
            let id = NodeId(nodes.len() as u32);
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(QueueEntry { weight, id });
        }

        let root = loop {
            let Some(first) = queue.pop() else {
                return Err(HuffmanError::EmptyFrequencyTable.into());
            };
            let Some(second) = queue.pop() else {
                break first.id;
            };

            let weight = first.weight + second.weight;
            let id = NodeId(nodes.len() as u32);
            nodes.push(Node::Internal {
                weight,
                left: first.id,
                right: second.id,
            });
            queue.push(QueueEntry { weight, id });

            trace!(left = first.id.0, right = second.id.0, weight, "merged nodes");
        };

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by handle.
    ///
    /// Handles are only produced by this tree, so they are always in range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// All nodes in allocation order: leaves first, then merges.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.len() - self.leaf_count()
    }

    /// Weight of the root, equal to the length of the counted input.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max
    }
}
