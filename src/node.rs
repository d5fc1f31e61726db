//! Tree nodes.
//!
//! A node is either a [`Leaf`] holding items directly or a [`Branch`] holding
//! child nodes. Both carry the exact bounding box of everything beneath them.
//! Every leaf sits at height 1 and a branch is always one level above its
//! children, so all leaves of a tree are at the same depth.

use serde::{Deserialize, Serialize};

use crate::bbox::{BBox, Indexable};

/// A node of the tree: a leaf of items or a branch of child nodes.
///
/// Serialized with a `"type"` tag of `"leaf"` or `"branch"`.
#[expect(clippy::exhaustive_enums, reason = "a node is either a leaf or a branch")]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node<T> {
    /// Items stored directly.
    Leaf(Leaf<T>),
    /// Child nodes one level lower.
    Branch(Branch<T>),
}

/// Bottom level of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaf<T> {
    #[serde(flatten)]
    pub(crate) bbox: BBox,
    pub(crate) children: Vec<T>,
}

/// Interior level of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch<T> {
    #[serde(flatten)]
    pub(crate) bbox: BBox,
    pub(crate) height: usize,
    pub(crate) children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// A leaf with no items, the root of an empty tree.
    pub(crate) fn empty_leaf() -> Self {
        Self::Leaf(Leaf { bbox: BBox::EMPTY, children: Vec::new() })
    }

    /// Bounding box of everything in this subtree.
    pub fn bbox(&self) -> &BBox {
        match self {
            Self::Leaf(leaf) => &leaf.bbox,
            Self::Branch(branch) => &branch.bbox,
        }
    }

    pub(crate) fn bbox_mut(&mut self) -> &mut BBox {
        match self {
            Self::Leaf(leaf) => &mut leaf.bbox,
            Self::Branch(branch) => &mut branch.bbox,
        }
    }

    /// Height of the subtree; 1 for a leaf.
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.height,
        }
    }

    /// Returns true for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Number of direct entries: items of a leaf or children of a branch.
    pub fn len(&self) -> usize {
        match self {
            Self::Leaf(leaf) => leaf.children.len(),
            Self::Branch(branch) => branch.children.len(),
        }
    }

    /// Returns true if the node has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The leaf, if this node is one.
    pub fn as_leaf(&self) -> Option<&Leaf<T>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    /// The branch, if this node is one.
    pub fn as_branch(&self) -> Option<&Branch<T>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => Some(branch),
        }
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        match self {
            Self::Leaf(leaf) => &mut leaf.children,
            Self::Branch(_) => unreachable!("branch nodes hold no items"),
        }
    }

    pub(crate) fn child_nodes_mut(&mut self) -> &mut Vec<Self> {
        match self {
            Self::Leaf(_) => unreachable!("leaf nodes hold no child nodes"),
            Self::Branch(branch) => &mut branch.children,
        }
    }
}

impl<T: Indexable> Node<T> {
    /// Recomputes the box from the node's direct entries.
    pub(crate) fn recalc_bbox(&mut self) {
        match self {
            Self::Leaf(leaf) => leaf.recalc_bbox(),
            Self::Branch(branch) => branch.recalc_bbox(),
        }
    }
}

/// Nodes are ordered by their own boxes when a branch is split.
impl<T> Indexable for Node<T> {
    #[inline]
    fn bbox(&self) -> BBox {
        *Node::bbox(self)
    }
}

impl<T> Leaf<T> {
    /// Bounding box of the items.
    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    /// Items stored in this leaf.
    pub fn items(&self) -> &[T] {
        &self.children
    }
}

impl<T: Indexable> Leaf<T> {
    pub(crate) fn new(children: Vec<T>) -> Self {
        let mut leaf = Self { bbox: BBox::EMPTY, children };
        leaf.recalc_bbox();
        leaf
    }

    pub(crate) fn recalc_bbox(&mut self) {
        self.bbox = BBox::union_all(self.children.iter().map(Indexable::bbox));
    }
}

impl<T> Branch<T> {
    /// Creates a branch over `children`, each of height `height - 1`.
    ///
    /// # Panics
    /// If `height` is below 2.
    pub(crate) fn new(children: Vec<Node<T>>, height: usize) -> Self {
        assert!(height > 1, "branch height must be at least 2, got {height}");
        let mut branch = Self { bbox: BBox::EMPTY, height, children };
        branch.recalc_bbox();
        branch
    }

    /// Bounding box of the children.
    pub fn bbox(&self) -> &BBox {
        &self.bbox
    }

    /// Height of the subtree rooted here.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Child nodes, each one level lower.
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    pub(crate) fn recalc_bbox(&mut self) {
        self.bbox = BBox::union_all(self.children.iter().map(|child| *child.bbox()));
    }
}
