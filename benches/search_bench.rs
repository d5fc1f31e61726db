//! Benchmark for `search` performance
//!
//! This benchmark measures `load` and `search` on an `RTree` with 1M randomly
//! distributed bounding boxes. Queries are performed with varying size
//! categories (100%, 50%, 10%, 1%, 0.01% of the space).

use aabb_rtree::generate::{SPACE, random_boxes};
use aabb_rtree::{BBox, RTree};
use rand::SeedableRng;
use std::time::Instant;

/// Benchmark search operations with different query box sizes
fn bench_search(tree: &RTree<BBox>, queries: &[BBox], percentage_str: &str) {
    let mut results = Vec::new();
    let mut found = 0;
    let start = Instant::now();

    for query in queries {
        results.clear();
        tree.search_into(query, &mut results);
        found += results.len();
    }

    let elapsed = start.elapsed();
    println!(
        "{} searches {}%: {}ms ({} results)",
        queries.len(),
        percentage_str,
        elapsed.as_millis(),
        found
    );
}

/// Benchmark existence checks, which stop at the first hit
fn bench_collides(tree: &RTree<BBox>, queries: &[BBox], percentage_str: &str) {
    let start = Instant::now();
    let hits = queries.iter().filter(|query| tree.collides(query)).count();
    let elapsed = start.elapsed();
    println!(
        "{} collides {}%: {}ms ({} hits)",
        queries.len(),
        percentage_str,
        elapsed.as_millis(),
        hits
    );
}

fn main() {
    println!("AABB R-tree Search Benchmark");
    println!("============================\n");

    let num_items = 1_000_000;
    let num_tests = 1_000;

    // Fixed seed for reproducibility
    let seed = 95756739_u64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let items = random_boxes(&mut rng, num_items, 1.0);

    let full = vec![BBox::new(0.0, 0.0, SPACE, SPACE); num_tests];
    let boxes_50 = random_boxes(&mut rng, num_tests, (0.5_f64).sqrt() * SPACE);
    let boxes_10 = random_boxes(&mut rng, num_tests, (0.1_f64).sqrt() * SPACE);
    let boxes_1 = random_boxes(&mut rng, num_tests, 10.0);
    let boxes_001 = random_boxes(&mut rng, num_tests, 1.0);

    // Build index
    println!("Loading index with {} items...", num_items);
    let start = Instant::now();
    let mut tree = RTree::new();
    tree.load(items);
    let build_time = start.elapsed();

    println!(
        "Index loaded in {:.2}ms (height {})\n",
        build_time.as_secs_f64() * 1000.0,
        tree.height()
    );

    println!("Running search benchmarks:");
    println!("-----------------------");
    bench_search(&tree, &full, "100");
    bench_search(&tree, &boxes_50, "50");
    bench_search(&tree, &boxes_10, "10");
    bench_search(&tree, &boxes_1, "1");
    bench_search(&tree, &boxes_001, "0.01");
    println!();

    println!("Running collides benchmarks:");
    println!("-----------------------");
    bench_collides(&tree, &boxes_10, "10");
    bench_collides(&tree, &boxes_001, "0.01");
    println!();
}
