//! Snapshots of the node tree, in memory and as JSON.
//!
//! A snapshot is the exact node layout: every node's box, its leaf or branch
//! tag, a branch's height and the ordered children. Restoring one checks the
//! structural invariants first, so a restored tree answers queries exactly
//! like the one it was taken from.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::bbox::{BBox, Indexable};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::rtree::RTree;

impl<T: Indexable> RTree<T> {
    /// Deep copy of the node tree.
    pub fn snapshot(&self) -> Node<T>
    where
        T: Clone,
    {
        self.root.clone()
    }

    /// Replaces the whole tree with `root`.
    ///
    /// The node limits of this tree are kept; they only steer future splits.
    ///
    /// # Errors
    /// [`Error::InvalidSnapshot`] if a branch is empty, shorter than 2, not
    /// exactly one level above each child, or if any node's box is not the
    /// union of its entries. The tree is left unchanged in that case.
    pub fn restore(&mut self, root: Node<T>) -> Result<&mut Self> {
        validate(&root)?;
        debug!("restored tree of height {}", root.height());
        self.root = root;
        Ok(self)
    }

    /// Encodes the node tree as JSON.
    ///
    /// # Errors
    /// [`Error::Json`] if an item fails to serialize.
    ///
    /// # Examples
    /// ```
    /// use aabb_rtree::{BBox, RTree};
    ///
    /// let mut tree = RTree::new();
    /// tree.insert(BBox::new(0.0, 0.0, 1.0, 1.0));
    /// let json = tree.to_json()?;
    ///
    /// let mut copy: RTree<BBox> = RTree::new();
    /// copy.from_json(&json)?;
    /// assert_eq!(copy.all(), tree.all());
    /// # Ok::<(), aabb_rtree::Error>(())
    /// ```
    pub fn to_json(&self) -> Result<String>
    where
        T: Serialize,
    {
        Ok(serde_json::to_string(&self.root)?)
    }

    /// Replaces the whole tree with one decoded from JSON.
    ///
    /// # Errors
    /// [`Error::Json`] for malformed JSON, [`Error::InvalidSnapshot`] as for
    /// [`restore`](Self::restore).
    pub fn from_json(&mut self, json: &str) -> Result<&mut Self>
    where
        T: DeserializeOwned,
    {
        let root: Node<T> = serde_json::from_str(json)?;
        self.restore(root)
    }
}

/// Checks heights and boxes of every node below `root`.
fn validate<T: Indexable>(root: &Node<T>) -> Result<()> {
    let mut nodes_to_check = vec![root];

    while let Some(node) = nodes_to_check.pop() {
        let expected = match node {
            Node::Leaf(leaf) => BBox::union_all(leaf.children.iter().map(Indexable::bbox)),
            Node::Branch(branch) => {
                if branch.height < 2 {
                    return Err(Error::InvalidSnapshot(format!(
                        "branch of height {} below the minimum of 2",
                        branch.height
                    )));
                }
                if branch.children.is_empty() {
                    return Err(Error::InvalidSnapshot(format!(
                        "empty branch at height {}",
                        branch.height
                    )));
                }
                if let Some(child) = branch.children.iter().find(|child| child.height() + 1 != branch.height) {
                    return Err(Error::InvalidSnapshot(format!(
                        "branch of height {} holds a child of height {}",
                        branch.height,
                        child.height()
                    )));
                }
                nodes_to_check.extend(&branch.children);
                BBox::union_all(branch.children.iter().map(|child| *child.bbox()))
            }
        };

        if *node.bbox() != expected {
            return Err(Error::InvalidSnapshot(format!(
                "node box {} differs from the union of its entries {expected}",
                node.bbox()
            )));
        }
    }

    Ok(())
}
