//! Save and restore the tree as JSON
use aabb_rtree::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== RTree JSON Save/Load Example ===");

    let mut tree = RTree::new();
    tree.insert((BBox::new(10.0, 10.0, 15.0, 15.0), 0));   // Box 0
    tree.insert((BBox::new(20.0, 20.0, 25.0, 25.0), 1));   // Box 1
    tree.insert((BBox::new(30.0, 10.0, 35.0, 15.0), 2));   // Box 2

    // Save tree to file
    std::fs::write("/tmp/rtree.json", tree.to_json()?)?;
    println!("Saved tree to /tmp/rtree.json");

    // Query before saving (for comparison)
    let query = BBox::new(15.0, 15.0, 25.0, 25.0);
    let before = tree.search(&query);
    println!("Original tree intersecting query result count: {}", before.len());

    // Load tree from file
    let mut loaded: RTree<(BBox, i32)> = RTree::new();
    loaded.from_json(&std::fs::read_to_string("/tmp/rtree.json")?)?;
    println!("Loaded tree from /tmp/rtree.json");

    // Query after loading (should be identical)
    let after = loaded.search(&query);
    println!("Loaded tree intersecting query result count: {}", after.len());
    assert_eq!(before, after, "Query results should match");
    println!("Results match!\n");

    // Snapshots are validated before they replace the tree
    println!("=== Testing Snapshot Validation ===");
    let tampered = std::fs::read_to_string("/tmp/rtree.json")?.replacen("\"maxX\":35.0", "\"maxX\":36.0", 1);
    match loaded.from_json(&tampered) {
        Ok(_) => println!("Should have rejected a stale bounding box"),
        Err(e) => println!("Correctly rejected tampered file: {}", e),
    }
    assert_eq!(loaded.len(), 3, "Rejected snapshot leaves the tree alone");

    Ok(())
}
