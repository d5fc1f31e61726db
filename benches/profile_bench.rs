//! Profiling benchmark to measure time spent in the different tree operations

use aabb_rtree::generate::random_boxes;
use aabb_rtree::{BBox, RTree};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::time::Instant;

fn millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn main() {
    println!("AABB R-tree Profiling Benchmark");
    println!("===============================\n");

    let num_items = 1_000_000;
    let num_tests = 1_000;

    let seed = 95756739_u64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let items: Vec<(BBox, usize)> = random_boxes(&mut rng, num_items, 1.0).into_iter().zip(0..).collect();
    let queries = random_boxes(&mut rng, num_tests, 1.0);

    // One by one insertion
    let start = Instant::now();
    let mut inserted = RTree::new();
    for &item in &items {
        inserted.insert(item);
    }
    println!("insert {} items one by one:      {:>12.2}ms", num_items, millis(start));

    // Bulk load
    let start = Instant::now();
    let mut loaded = RTree::new();
    loaded.load(items.iter().copied());
    println!("bulk load {} items:              {:>12.2}ms", num_items, millis(start));

    // Bulk load in ten batches, merged into the existing tree
    let start = Instant::now();
    let mut batched = RTree::new();
    for batch in items.chunks(num_items / 10) {
        batched.load(batch.iter().copied());
    }
    println!("bulk load in 10 batches:                {:>12.2}ms", millis(start));

    for (name, tree) in [("inserted", &inserted), ("loaded", &loaded), ("batched", &batched)] {
        let mut results = Vec::new();
        let start = Instant::now();
        for query in &queries {
            results.clear();
            tree.search_into(query, &mut results);
        }
        println!(
            "search 0.01% on {} tree - {} queries: {:>12.3}µs/query",
            name,
            num_tests,
            millis(start) * 1000.0 / num_tests as f64
        );
    }

    // Remove a tenth of the items in random order
    let mut doomed = items[..num_items / 10].to_vec();
    doomed.shuffle(&mut rng);
    let start = Instant::now();
    for item in &doomed {
        loaded.remove(item);
    }
    println!("remove {} items:                  {:>12.2}ms", doomed.len(), millis(start));
    println!("remaining items: {}, height {}", loaded.len(), loaded.height());
}
