//! Bulk load a batch, then remove items again.
use aabb_rtree::generate::random_boxes;
use aabb_rtree::prelude::*;
use rand::SeedableRng;

fn main() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let boxes = random_boxes(&mut rng, 10_000, 1.0);

    let mut tree = RTree::new();
    tree.load(boxes.iter().copied());
    println!("Loaded {} boxes, height {}", tree.len(), tree.height());

    // Remove every other box
    for b in boxes.iter().step_by(2) {
        tree.remove(b);
    }
    println!("After removal: {} boxes, height {}", tree.len(), tree.height());
    assert_eq!(tree.len(), 5_000, "Half of the boxes should remain");

    // A box that was never inserted is ignored
    tree.remove(&BBox::new(-5.0, -5.0, -4.0, -4.0));
    assert_eq!(tree.len(), 5_000, "Removing an unknown box changes nothing");

    tree.clear();
    assert!(tree.is_empty(), "Cleared tree should be empty");
}
