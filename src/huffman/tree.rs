/// Index of a node inside a [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Which child slot a node occupies under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>, // (left, right)
}

/// Binary tree stored as an arena. Children are owned by index and each node
/// keeps a back link to its parent, set once when the parent is created.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf(&mut self, value: T) -> NodeId {
        self.push(Node {
            value,
            parent: None,
            children: None,
        })
    }

    /// Creates a parent over `right` and `left`, whose payload is produced by
    /// `combine(right, left)`. Both children must still be roots.
    pub fn join<F>(&mut self, right: NodeId, left: NodeId, combine: F) -> NodeId
    where
        F: FnOnce(&T, &T) -> T,
    {
        debug_assert!(right != left);
        debug_assert!(self.parent(right).is_none() && self.parent(left).is_none());

        let value = combine(self.value(right), self.value(left));
        let parent = self.push(Node {
            value,
            parent: None,
            children: Some((left, right)),
        });

        self.nodes[left.0].parent = Some(parent);
        self.nodes[right.0].parent = Some(parent);
        parent
    }

    pub fn value(&self, id: NodeId) -> &T {
        &self.nodes[id.0].value
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// `(left, right)` for internal nodes, `None` for leaves.
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.nodes[id.0].children
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).map(|(left, _)| left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).map(|(_, right)| right)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_none()
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes[id.0].parent.is_none()
    }

    /// Position of `id` under its parent, or `None` for a root.
    pub fn side(&self, id: NodeId) -> Option<Side> {
        let (left, right) = self.children(self.parent(id)?)?;
        if left == id {
            Some(Side::Left)
        } else if right == id {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Leaves in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids().filter(|&id| self.is_leaf(id))
    }

    /// The first parentless node. Once every join is done this is the only one.
    pub fn root(&self) -> Option<NodeId> {
        self.ids().find(|&id| self.is_root(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    fn push(&mut self, node: Node<T>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}
