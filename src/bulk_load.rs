//! Bulk loading: builds a packed subtree from a whole batch by recursive
//! tiling, then merges it into the existing tree.

use std::mem;

use log::debug;

use crate::bbox::Indexable;
use crate::node::{Branch, Leaf, Node};
use crate::rtree::{Entry, RTree};
use crate::select::multi_select;

impl<T: Indexable> RTree<T> {
    /// Inserts a batch of items at once.
    ///
    /// The batch is packed into square-ish, evenly filled tiles which gives
    /// much better query locality than inserting items one by one, and is
    /// faster too. Batches smaller than [`min_entries`](Self::min_entries)
    /// are inserted one by one. Loading into a non-empty tree merges the new
    /// subtree in; this works best when the batch and the existing items
    /// cover separate areas.
    ///
    /// # Examples
    /// ```
    /// use aabb_rtree::{BBox, RTree};
    ///
    /// let boxes: Vec<BBox> = (0..100)
    ///     .map(|i| BBox::new(i as f64, 0.0, i as f64 + 0.5, 1.0))
    ///     .collect();
    ///
    /// let mut tree = RTree::new();
    /// tree.load(boxes);
    /// assert_eq!(tree.len(), 100);
    /// assert_eq!(tree.search(&BBox::new(10.2, 0.2, 12.2, 0.4)).len(), 3);
    /// ```
    pub fn load<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return self;
        }

        if items.len() < self.min_entries {
            for item in items {
                self.insert_item(item);
            }
            return self;
        }

        let count = items.len();
        let mut node = self.build(items, None);
        debug!("bulk-built {count} items into a subtree of height {}", node.height());

        if self.root.is_empty() {
            // save as is if tree is empty
            self.root = node;
        } else if self.root.height() == node.height() {
            // split root if trees have the same height
            self.split_root(node);
        } else {
            if self.root.height() < node.height() {
                // swap trees if inserted one is bigger
                mem::swap(&mut self.root, &mut node);
            }

            // insert the small tree into the large tree at appropriate level
            let level = self.root.height() - node.height() - 1;
            let bbox = *node.bbox();
            self.insert_entry(Entry::Node(node), &bbox, level);
        }

        self
    }

    /// Packs `items` into a subtree. `height` is `None` for the top call,
    /// which picks the height and the root fan-out.
    fn build(&self, mut items: Vec<T>, height: Option<usize>) -> Node<T> {
        let n = items.len();
        let mut m = self.max_entries;

        if n <= m {
            // reached leaf level; return leaf
            return Node::Leaf(Leaf::new(items));
        }

        let height = match height {
            Some(height) => height,
            None => {
                let (height, subtree_capacity) = target_height(n, m);
                // target number of root entries to maximize storage utilization
                m = n.div_ceil(subtree_capacity);
                height
            }
        };

        // split the items into m mostly square tiles
        let n2 = n.div_ceil(m);
        let n1 = n2 * ceil_sqrt(m);

        multi_select(&mut items, 0, n - 1, n1, T::compare_min_x);

        let mut children = Vec::with_capacity(m);
        let mut columns = items.into_iter();
        loop {
            let mut column: Vec<T> = columns.by_ref().take(n1).collect();
            if column.is_empty() {
                break;
            }

            let last = column.len() - 1;
            multi_select(&mut column, 0, last, n2, T::compare_min_y);

            let mut groups = column.into_iter();
            loop {
                let group: Vec<T> = groups.by_ref().take(n2).collect();
                if group.is_empty() {
                    break;
                }
                // pack each entry recursively
                children.push(self.build(group, Some(height - 1)));
            }
        }

        Node::Branch(Branch::new(children, height))
    }
}

/// Smallest height whose full tree holds `n` entries at fan-out `m`, i.e.
/// `ceil(log_m(n))`, together with the capacity of one subtree below the
/// root (`m^(height - 1)`).
fn target_height(n: usize, m: usize) -> (usize, usize) {
    let mut height = 1;
    let mut capacity = m;
    while capacity < n {
        capacity = capacity.saturating_mul(m);
        height += 1;
    }
    (height, capacity / m)
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = 1;
    while root * root < n {
        root += 1;
    }
    root
}
