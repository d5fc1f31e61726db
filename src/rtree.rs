//! Dynamic R-tree over axis-aligned bounding boxes.
//!
//! Insertion descends by least area enlargement and splits overflowing nodes
//! along the axis with the smaller total margin, at the index with the least
//! overlap. Removal prunes emptied nodes and shrinks boxes on the way up but
//! never reinserts entries from underfull nodes.

use std::cmp::Ordering;
use std::mem;

use log::{debug, trace};

use crate::bbox::{BBox, Indexable};
use crate::node::{Branch, Leaf, Node};

/// Default maximum number of entries per node.
pub const DEFAULT_MAX_ENTRIES: usize = 9;
/// Smallest accepted maximum; lower values are raised to it.
pub const MIN_MAX_ENTRIES: usize = 4;

/// Dynamic R-tree for spatial queries
///
/// Items of any [`Indexable`] type are kept in leaves; branches hold child
/// nodes. Every node's box is exactly the union of its entries' boxes and all
/// leaves are at the same depth. Non-root nodes keep between
/// [`min_entries`](Self::min_entries) and [`max_entries`](Self::max_entries)
/// entries while the tree only grows; removal may leave nodes underfull.
///
/// # Examples
/// ```
/// use aabb_rtree::{BBox, RTree};
///
/// let mut tree = RTree::new();
/// tree.insert(BBox::new(0.0, 0.0, 1.0, 1.0))
///     .insert(BBox::new(5.0, 5.0, 6.0, 6.0));
///
/// let found = tree.search(&BBox::new(0.0, 0.0, 2.0, 2.0));
/// assert_eq!(found, vec![&BBox::new(0.0, 0.0, 1.0, 1.0)]);
/// assert!(tree.collides(&BBox::new(4.0, 4.0, 7.0, 7.0)));
/// ```
#[derive(Clone, Debug)]
pub struct RTree<T> {
    /// Sole entry point into the node tree
    pub(crate) root: Node<T>,
    /// Split threshold: nodes may hold at most this many entries
    pub(crate) max_entries: usize,
    /// Minimum fill of either half of a split
    pub(crate) min_entries: usize,
}

/// What gets appended to the node chosen by an insertion.
pub(crate) enum Entry<T> {
    /// A single item, stored in a leaf
    Item(T),
    /// A whole subtree, stored in a branch one level above it
    Node(Node<T>),
}

impl<T> RTree<T> {
    /// Creates a new empty tree with the default maximum of 9 entries per node
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a new empty tree holding at most `max_entries` per node.
    ///
    /// Values below 4 are raised to 4. The minimum fill is 40% of the
    /// maximum, but never below 2.
    pub fn with_max_entries(max_entries: usize) -> Self {
        let max_entries = max_entries.max(MIN_MAX_ENTRIES);
        // ceil(0.4 * max) without going through floats
        let min_entries = (max_entries * 2).div_ceil(5).max(2);
        Self { root: Node::empty_leaf(), max_entries, min_entries }
    }

    /// Maximum number of entries per node.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum number of entries on either side of a split.
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// Height of the tree; 1 while the root is a leaf.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Returns whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Read-only view of the root node.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Removes every item, leaving an empty leaf as the root.
    pub fn clear(&mut self) -> &mut Self {
        self.root = Node::empty_leaf();
        debug!("tree cleared");
        self
    }

    /// Replaces the root with a branch over the old root and `sibling`.
    pub(crate) fn split_root(&mut self, sibling: Node<T>) {
        let node = mem::replace(&mut self.root, Node::empty_leaf());
        let height = node.height() + 1;
        self.root = Node::Branch(Branch::new(vec![node, sibling], height));
        debug!("root split, tree height is now {height}");
    }
}

impl<T: Indexable> RTree<T> {
    /// Inserts an item, keyed by its [`Indexable::bbox`].
    pub fn insert(&mut self, item: T) -> &mut Self {
        self.insert_item(item);
        self
    }

    pub(crate) fn insert_item(&mut self, item: T) {
        let bbox = item.bbox();
        let level = self.root.height() - 1;
        self.insert_entry(Entry::Item(item), &bbox, level);
    }

    /// Places `entry` in a node at depth `level` and repairs the path above.
    ///
    /// Items go to leaves (`level` = height - 1); a subtree of height `h` goes
    /// to a branch at depth `height - h - 1`.
    pub(crate) fn insert_entry(&mut self, entry: Entry<T>, bbox: &BBox, level: usize) {
        // find the best node for accommodating the entry, saving the path to it
        let path = self.choose_subtree(bbox, level);

        let node = node_at_mut(&mut self.root, &path);
        match (&mut *node, entry) {
            (Node::Leaf(leaf), Entry::Item(item)) => leaf.children.push(item),
            (Node::Branch(branch), Entry::Node(child)) => {
                debug_assert_eq!(child.height() + 1, branch.height, "subtree inserted at wrong level");
                branch.children.push(child);
            }
            _ => unreachable!("insertion level does not match the entry kind"),
        }
        node.bbox_mut().extend(bbox);

        // split on node overflow; propagate upwards if necessary
        let mut level = Some(path.len());
        while let Some(depth) = level {
            if node_at_mut(&mut self.root, &path[..depth]).len() <= self.max_entries {
                break;
            }
            self.split(&path, depth);
            level = depth.checked_sub(1);
        }

        // a root split rebuilds the root box; otherwise the remaining ancestors grow
        if let Some(depth) = level {
            extend_path(&mut self.root, &path[..depth], bbox);
        }
    }

    /// Child indices from the root down to the node that should receive an
    /// entry with box `bbox`, stopping at a leaf or at depth `level`.
    fn choose_subtree(&self, bbox: &BBox, level: usize) -> Vec<usize> {
        let mut path = Vec::with_capacity(level);
        let mut node = &self.root;

        while let Node::Branch(branch) = node {
            if path.len() == level {
                break;
            }
            let index = choose_child(&branch.children, bbox);
            path.push(index);
            node = &branch.children[index];
        }

        path
    }

    /// Splits the overflowing node at `path[..depth]` into two.
    fn split(&mut self, path: &[usize], depth: usize) {
        let node = node_at_mut(&mut self.root, &path[..depth]);
        let min_entries = self.min_entries;

        let sibling = match node {
            Node::Leaf(leaf) => {
                let rest = split_entries(&mut leaf.children, min_entries);
                leaf.recalc_bbox();
                Node::Leaf(Leaf::new(rest))
            }
            Node::Branch(branch) => {
                let rest = split_entries(&mut branch.children, min_entries);
                branch.recalc_bbox();
                Node::Branch(Branch::new(rest, branch.height))
            }
        };

        match depth.checked_sub(1) {
            Some(parent) => node_at_mut(&mut self.root, &path[..parent]).child_nodes_mut().push(sibling),
            None => self.split_root(sibling),
        }
    }

    /// Removes one item equal to `item`. Does nothing if there is none.
    pub fn remove(&mut self, item: &T) -> &mut Self
    where
        T: PartialEq,
    {
        self.remove_by(item, |a, b| a == b)
    }

    /// Removes one stored item for which `equals(item, stored)` holds.
    /// Does nothing if there is none.
    ///
    /// Only subtrees whose box contains `item.bbox()` are searched, so a
    /// matching item must report the same box as the stored one.
    pub fn remove_by<F>(&mut self, item: &T, mut equals: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let bbox = item.bbox();
        let Some((path, index)) = self.find_item(item, &bbox, &mut equals) else {
            return self;
        };

        drop(node_at_mut(&mut self.root, &path).items_mut().remove(index));
        self.condense(&path);
        self
    }

    /// Depth-first search for the leaf holding `item`, returning the child
    /// indices leading to it and the item's position in it.
    fn find_item<F>(&self, item: &T, bbox: &BBox, equals: &mut F) -> Option<(Vec<usize>, usize)>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let root = match &self.root {
            Node::Leaf(leaf) => return find_in_leaf(leaf, item, equals).map(|index| (Vec::new(), index)),
            Node::Branch(branch) if branch.bbox.contains(bbox) => branch,
            Node::Branch(_) => return None,
        };

        // each frame is a branch on the current path and the next child to visit
        let mut frames: Vec<(&Branch<T>, usize)> = vec![(root, 0)];
        while let Some(frame) = frames.last_mut() {
            let branch = frame.0;
            let index = frame.1;
            frame.1 += 1;

            let Some(child) = branch.children.get(index) else {
                let _ = frames.pop();
                continue;
            };

            match child {
                Node::Leaf(leaf) => {
                    if let Some(position) = find_in_leaf(leaf, item, equals) {
                        let path = frames.iter().map(|&(_, next)| next - 1).collect();
                        return Some((path, position));
                    }
                }
                Node::Branch(inner) => {
                    if inner.bbox.contains(bbox) {
                        frames.push((inner, 0));
                    }
                }
            }
        }

        None
    }

    /// Walks `path` bottom-up after a removal, dropping emptied nodes and
    /// recomputing the boxes of the ones that remain.
    fn condense(&mut self, path: &[usize]) {
        for depth in (0..=path.len()).rev() {
            let node = node_at_mut(&mut self.root, &path[..depth]);
            if !node.is_empty() {
                node.recalc_bbox();
                continue;
            }

            match depth.checked_sub(1) {
                Some(parent) => {
                    let siblings = node_at_mut(&mut self.root, &path[..parent]).child_nodes_mut();
                    drop(siblings.remove(path[parent]));
                }
                None => {
                    let _ = self.clear();
                }
            }
        }
    }
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Node reached from `root` by following the child indices in `path`.
fn node_at_mut<'a, T>(root: &'a mut Node<T>, path: &[usize]) -> &'a mut Node<T> {
    path.iter().fold(root, |node, &index| &mut node.child_nodes_mut()[index])
}

/// Extends the box of every node on `path`, root included, by `bbox`.
fn extend_path<T>(root: &mut Node<T>, path: &[usize], bbox: &BBox) {
    root.bbox_mut().extend(bbox);
    let mut node = root;
    for &index in path {
        node = &mut node.child_nodes_mut()[index];
        node.bbox_mut().extend(bbox);
    }
}

fn find_in_leaf<T, F>(leaf: &Leaf<T>, item: &T, equals: &mut F) -> Option<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    leaf.children.iter().position(|candidate| equals(item, candidate))
}

/// Index of the child needing the least area enlargement to cover `bbox`,
/// ties broken by the smaller area.
fn choose_child<T>(children: &[Node<T>], bbox: &BBox) -> usize {
    let mut target = 0;
    let mut min_area = f64::INFINITY;
    let mut min_enlargement = f64::INFINITY;

    for (index, child) in children.iter().enumerate() {
        let area = child.bbox().area();
        let enlargement = bbox.enlarged_area(child.bbox()) - area;

        if enlargement < min_enlargement {
            min_enlargement = enlargement;
            min_area = area;
            target = index;
        } else if enlargement == min_enlargement && area < min_area {
            min_area = area;
            target = index;
        }
    }

    target
}

/// Sorts an overflowing entry list along the better axis and cuts it at the
/// best index, returning the entries for the new sibling.
fn split_entries<E: Indexable>(entries: &mut Vec<E>, min_entries: usize) -> Vec<E> {
    choose_split_axis(entries, min_entries);
    let split_index = choose_split_index(entries, min_entries);
    trace!("splitting {} entries at {split_index}", entries.len());
    entries.split_off(split_index)
}

/// Leaves `entries` sorted by the lower coordinate of the axis whose
/// distributions have the smaller total margin.
fn choose_split_axis<E: Indexable>(entries: &mut [E], min_entries: usize) {
    entries.sort_by(E::compare_min_x);
    let x_margin = all_dist_margin(entries, min_entries);

    entries.sort_by(E::compare_min_y);
    let y_margin = all_dist_margin(entries, min_entries);

    // already sorted by min y unless x wins
    if x_margin < y_margin {
        entries.sort_by(E::compare_min_x);
    }
    trace!(
        "split axis {} (margins x = {x_margin}, y = {y_margin})",
        if x_margin < y_margin { 'x' } else { 'y' }
    );
}

/// Total margin of every split distribution where both sides hold at least
/// `min_entries` entries, for the current ordering.
fn all_dist_margin<E: Indexable>(entries: &[E], min_entries: usize) -> f64 {
    let total = entries.len();
    let middle = &entries[min_entries..total - min_entries];

    let mut left = dist_bbox(&entries[..min_entries]);
    let mut right = dist_bbox(&entries[total - min_entries..]);
    let mut margin = left.margin() + right.margin();

    for entry in middle {
        left.extend(&entry.bbox());
        margin += left.margin();
    }
    for entry in middle.iter().rev() {
        right.extend(&entry.bbox());
        margin += right.margin();
    }

    margin
}

/// Split index with the least overlap between the two halves, ties broken by
/// the smaller combined area.
fn choose_split_index<E: Indexable>(entries: &[E], min_entries: usize) -> usize {
    let total = entries.len();
    let mut index = None;
    let mut min_overlap = f64::INFINITY;
    let mut min_area = f64::INFINITY;

    for i in min_entries..=total - min_entries {
        let bbox1 = dist_bbox(&entries[..i]);
        let bbox2 = dist_bbox(&entries[i..]);

        let overlap = bbox1.intersection_area(&bbox2);
        let area = bbox1.area() + bbox2.area();

        match overlap.partial_cmp(&min_overlap) {
            Some(Ordering::Less) => {
                min_overlap = overlap;
                min_area = area;
                index = Some(i);
            }
            Some(Ordering::Equal) if area < min_area => {
                min_area = area;
                index = Some(i);
            }
            _ => {}
        }
    }

    index.unwrap_or(total - min_entries)
}

/// Box covering a run of entries.
fn dist_bbox<E: Indexable>(entries: &[E]) -> BBox {
    BBox::union_all(entries.iter().map(Indexable::bbox))
}
