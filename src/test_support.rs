//! Helpers shared by the test modules.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generate::random_boxes;
use crate::{BBox, Indexable, Node, RTree};

/// Boxes tagged with their index, so results can be compared as id sets.
pub(crate) type Tagged = (BBox, usize);

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(crate) fn tagged_boxes(seed: u64, count: usize, size: f64) -> Vec<Tagged> {
    random_boxes(&mut rng(seed), count, size).into_iter().zip(0..).collect()
}

/// Sorted ids of the boxes intersecting `query`, by linear scan.
pub(crate) fn brute_force(items: &[Tagged], query: &BBox) -> Vec<usize> {
    let mut ids: Vec<usize> = items.iter().filter(|(b, _)| b.intersects(query)).map(|&(_, id)| id).collect();
    ids.sort_unstable();
    ids
}

pub(crate) fn sorted_ids(found: &[&Tagged]) -> Vec<usize> {
    let mut ids: Vec<usize> = found.iter().map(|&&(_, id)| id).collect();
    ids.sort_unstable();
    ids
}

/// Checks box containment, balance and fan-out of every node.
///
/// The lower fan-out bound is only checked with `check_min_fill`, since
/// removals and the last tile of a bulk load may leave nodes underfull.
pub(crate) fn assert_invariants<T: Indexable>(tree: &RTree<T>, check_min_fill: bool) {
    let mut stack: Vec<(&Node<T>, bool)> = vec![(tree.root(), true)];

    while let Some((node, is_root)) = stack.pop() {
        assert!(node.len() <= tree.max_entries(), "node holds {} entries", node.len());
        if check_min_fill && !is_root {
            assert!(node.len() >= tree.min_entries(), "node holds only {} entries", node.len());
        }

        let expected = match node {
            Node::Leaf(leaf) => BBox::union_all(leaf.items().iter().map(Indexable::bbox)),
            Node::Branch(branch) => {
                for child in branch.children() {
                    assert_eq!(child.height() + 1, branch.height(), "unbalanced child");
                    stack.push((child, false));
                }
                BBox::union_all(branch.children().iter().map(|child| *child.bbox()))
            }
        };
        assert_eq!(*node.bbox(), expected, "stale node box");
    }
}
