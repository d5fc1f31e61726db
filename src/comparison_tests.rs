//! Comparison tests between RTree queries and a brute-force linear scan

#[cfg(test)]
mod tests {
    use crate::generate::random_boxes;
    use crate::test_support::{
        Tagged, assert_invariants, brute_force, init_logging, rng, sorted_ids, tagged_boxes,
    };
    use crate::{BBox, RTree};

    /// Query boxes of every size class, from point-like up to half the space.
    fn queries(seed: u64, count: usize) -> Vec<BBox> {
        let mut r = rng(seed);
        [1.0, 10.0, 31.6, 70.7]
            .into_iter()
            .flat_map(|size| random_boxes(&mut r, count, size))
            .collect()
    }

    fn assert_matches_brute_force(tree: &RTree<Tagged>, items: &[Tagged], queries: &[BBox]) {
        for query in queries {
            let found = tree.search(query);
            let expected = brute_force(items, query);
            assert_eq!(sorted_ids(&found), expected, "Search results differ for {query}");
            assert_eq!(tree.collides(query), !expected.is_empty(), "collides disagrees for {query}");
        }
    }

    #[test]
    fn test_loaded_tree_matches_brute_force() {
        init_logging();
        let items = tagged_boxes(100, 1_000, 1.0);
        let mut tree = RTree::new();
        tree.load(items.clone());

        assert_matches_brute_force(&tree, &items, &queries(101, 25));
    }

    #[test]
    fn test_inserted_tree_matches_brute_force() {
        let items = tagged_boxes(102, 1_000, 1.0);
        let mut tree = RTree::new();
        for &item in &items {
            tree.insert(item);
        }

        assert_matches_brute_force(&tree, &items, &queries(103, 25));
    }

    #[test]
    fn test_insert_and_load_agree() {
        let items = tagged_boxes(104, 2_000, 3.0);
        let mut inserted = RTree::new();
        for &item in &items {
            inserted.insert(item);
        }
        let mut loaded = RTree::new();
        loaded.load(items);

        for query in queries(105, 25) {
            assert_eq!(
                sorted_ids(&inserted.search(&query)),
                sorted_ids(&loaded.search(&query)),
                "Insert-built and load-built trees disagree for {query}"
            );
        }
    }

    #[test]
    fn test_node_sizes_match_brute_force() {
        for max_entries in [4, 9, 16] {
            let items = tagged_boxes(106, 1_500, 2.0);
            let mut tree = RTree::with_max_entries(max_entries);
            tree.load(items[..1_000].iter().copied());
            for &item in &items[1_000..] {
                tree.insert(item);
            }

            assert_eq!(tree.len(), 1_500, "max_entries = {max_entries}");
            assert_invariants(&tree, false);
            assert_matches_brute_force(&tree, &items, &queries(107, 10));
        }
    }

    #[test]
    fn test_results_after_removals() {
        let mut items = tagged_boxes(108, 1_000, 2.0);
        let mut tree = RTree::new();
        tree.load(items.clone());

        // drop every third item
        let removed: Vec<Tagged> = items.iter().copied().filter(|&(_, id)| id % 3 == 0).collect();
        for item in &removed {
            tree.remove(item);
        }
        items.retain(|&(_, id)| id % 3 != 0);

        assert_eq!(tree.len(), items.len());
        assert_invariants(&tree, false);
        assert_matches_brute_force(&tree, &items, &queries(109, 25));
    }

    #[test]
    fn test_mixed_workload_matches_brute_force() {
        let batches = tagged_boxes(110, 3_000, 1.5);
        let mut items: Vec<Tagged> = Vec::new();
        let mut tree = RTree::new();

        for (round, chunk) in batches.chunks(500).enumerate() {
            if round % 2 == 0 {
                tree.load(chunk.iter().copied());
            } else {
                for &item in chunk {
                    tree.insert(item);
                }
            }
            items.extend_from_slice(chunk);

            let (gone, kept): (Vec<Tagged>, Vec<Tagged>) = items.iter().partition(|&&(_, id)| id % 7 == round);
            for item in &gone {
                tree.remove(item);
            }
            items = kept;

            assert_eq!(tree.len(), items.len(), "Round {round}");
            assert_invariants(&tree, false);
        }

        assert_matches_brute_force(&tree, &items, &queries(111, 15));
    }

    #[test]
    fn test_json_round_trip_keeps_results() {
        let items = tagged_boxes(112, 800, 2.0);
        let mut tree = RTree::new();
        tree.load(items.clone());

        let json = tree.to_json().expect("serializable");
        let mut copy: RTree<Tagged> = RTree::new();
        copy.from_json(&json).expect("valid snapshot");

        assert_eq!(copy.height(), tree.height());
        assert_matches_brute_force(&copy, &items, &queries(113, 10));
        for query in queries(114, 5) {
            assert_eq!(copy.search(&query), tree.search(&query), "Node layout changed for {query}");
        }
    }
}
