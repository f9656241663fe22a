use log::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

use super::tree::{NodeId, Tree};

/// Payload of a Huffman tree node. Leaves carry their symbol, internal nodes
/// only the synthesized weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weighted {
    pub symbol: Option<u8>,
    pub weight: u64,
}

impl Weighted {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Self {
            symbol: Some(symbol),
            weight,
        }
    }

    /// Combine rule for internal nodes: the weights add up, the symbol is dropped.
    pub fn sum(right: &Self, left: &Self) -> Self {
        Self {
            symbol: None,
            weight: right.weight + left.weight,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    tree: Tree<Weighted>,
    root: NodeId,
}

impl HuffmanTree {
    /// Builds the tree for `table`. The result only depends on the table, so
    /// compression and decompression arrive at the same shape.
    ///
    /// Nodes are kept in a list ordered by weight. Each round takes the two
    /// lightest nodes `a` and `b`, joins them under a parent with `a` on the
    /// right and `b` on the left, puts the parent at the front of the list and
    /// stable-sorts again. Equal weights therefore keep their relative order,
    /// and a fresh parent sorts ahead of older nodes of the same weight.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        // The root carries the sum of every count, and no other node weighs more
        if table.is_empty() || table.checked_total().is_none() {
            return Err(Error::InvalidData);
        }

        let mut tree = Tree::new();
        let mut nodes = table
            .iter()
            .map(|(symbol, count)| tree.leaf(Weighted::leaf(symbol, count)))
            .collect::<Vec<_>>();
        nodes.sort_by_key(|&id| tree.value(id).weight);

        while nodes.len() > 1 {
            let a = nodes.remove(0);
            let b = nodes.remove(0);
            let parent = tree.join(a, b, Weighted::sum);
            nodes.insert(0, parent);
            nodes.sort_by_key(|&id| tree.value(id).weight);
        }

        let root = nodes[0];
        debug!(
            "built tree with {} nodes, root weight {}",
            tree.len(),
            tree.value(root).weight
        );
        Ok(Self { tree, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &Tree<Weighted> {
        &self.tree
    }

    pub fn weight(&self, id: NodeId) -> u64 {
        self.tree.value(id).weight
    }

    /// Symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        self.tree.value(id).symbol
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.tree.is_leaf(id)
    }

    /// Follows one edge down from `id`: `false` selects the left child, `true`
    /// the right one. Returns `None` on a leaf.
    pub fn step(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        if bit {
            self.tree.right(id)
        } else {
            self.tree.left(id)
        }
    }
}
