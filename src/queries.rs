//! Read-only queries on [`RTree`].
//!
//! All traversals use an explicit work list instead of recursion, so deep
//! trees cannot exhaust the call stack.

use crate::bbox::{BBox, Indexable};
use crate::node::Node;
use crate::rtree::RTree;

impl<T: Indexable> RTree<T> {
    /// Queries for all items whose box intersects `bbox` (bounds inclusive)
    ///
    /// The order of the results depends on the tree layout but is the same
    /// for repeated queries on an unchanged tree.
    pub fn search(&self, bbox: &BBox) -> Vec<&T> {
        let mut results = Vec::new();
        self.search_into(bbox, &mut results);
        results
    }

    /// Like [`search`](Self::search), but appends to `results` so the vector
    /// can be reused across queries.
    pub fn search_into<'a>(&'a self, bbox: &BBox, results: &mut Vec<&'a T>) {
        if !bbox.intersects(self.root.bbox()) {
            return;
        }

        let mut nodes_to_search: Vec<&Node<T>> = Vec::new();
        let mut node = Some(&self.root);

        while let Some(current) = node {
            match current {
                Node::Leaf(leaf) => {
                    results.extend(leaf.children.iter().filter(|item| bbox.intersects(&item.bbox())));
                }
                Node::Branch(branch) => {
                    for child in &branch.children {
                        let child_bbox = child.bbox();
                        if !bbox.intersects(child_bbox) {
                            continue;
                        }
                        if bbox.contains(child_bbox) {
                            collect_all(child, results);
                        } else {
                            nodes_to_search.push(child);
                        }
                    }
                }
            }
            node = nodes_to_search.pop();
        }
    }

    /// Returns true if any item's box intersects `bbox`.
    ///
    /// Stops at the first intersecting item or the first subtree lying
    /// entirely inside `bbox`.
    pub fn collides(&self, bbox: &BBox) -> bool {
        if !bbox.intersects(self.root.bbox()) {
            return false;
        }

        let mut nodes_to_search: Vec<&Node<T>> = Vec::new();
        let mut node = Some(&self.root);

        while let Some(current) = node {
            match current {
                Node::Leaf(leaf) => {
                    if leaf.children.iter().any(|item| bbox.intersects(&item.bbox())) {
                        return true;
                    }
                }
                Node::Branch(branch) => {
                    for child in &branch.children {
                        let child_bbox = child.bbox();
                        if !bbox.intersects(child_bbox) {
                            continue;
                        }
                        // a branch is never empty, so a contained one has an item
                        if bbox.contains(child_bbox) {
                            return true;
                        }
                        nodes_to_search.push(child);
                    }
                }
            }
            node = nodes_to_search.pop();
        }

        false
    }
}

impl<T> RTree<T> {
    /// Returns every stored item.
    pub fn all(&self) -> Vec<&T> {
        let mut results = Vec::new();
        collect_all(&self.root, &mut results);
        results
    }

    /// Returns the number of items
    ///
    /// Walks the whole tree, so this is linear in the number of nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut nodes_to_search = vec![&self.root];
        while let Some(node) = nodes_to_search.pop() {
            match node {
                Node::Leaf(leaf) => count += leaf.children.len(),
                Node::Branch(branch) => nodes_to_search.extend(&branch.children),
            }
        }
        count
    }
}

/// Appends every item below `node` without testing any boxes.
fn collect_all<'a, T>(node: &'a Node<T>, results: &mut Vec<&'a T>) {
    let mut nodes_to_search = vec![node];
    while let Some(node) = nodes_to_search.pop() {
        match node {
            Node::Leaf(leaf) => results.extend(&leaf.children),
            Node::Branch(branch) => nodes_to_search.extend(&branch.children),
        }
    }
}
