//! Find boxes that intersect a query rectangle.
use aabb_rtree::prelude::*;

fn main() {
    let mut tree = RTree::new();
    tree.insert((BBox::new(0.0, 0.0, 1.0, 1.0), "a"));  // Box a
    tree.insert((BBox::new(2.0, 2.0, 3.0, 3.0), "b"));  // Box b (outside query)
    tree.insert((BBox::new(0.5, 0.5, 1.5, 1.5), "c"));  // Box c

    let results: Vec<&str> = tree
        .search(&BBox::new(0.7, 0.7, 1.3, 1.3))
        .into_iter()
        .map(|&(_, name)| name)
        .collect();
    println!("Intersecting: {:?}", results);

    // Query rectangle (0.7, 0.7, 1.3, 1.3) intersects boxes a and c, but not box b
    assert_eq!(results.len(), 2, "Expected 2 intersecting boxes");
    assert!(results.contains(&"a"), "Box a should intersect");
    assert!(results.contains(&"c"), "Box c should intersect");
    assert!(!results.contains(&"b"), "Box b should not intersect");

    assert!(tree.collides(&BBox::from_point(2.5, 2.5)), "Point lies inside box b");
}
