//! # AABB R-tree - Dynamic Spatial Index
//!
//! A Rust library providing a dynamic R-tree over axis-aligned bounding boxes
//! (AABBs). Items can be inserted, removed and bulk loaded at any time; the
//! tree stays balanced and answers range and collision queries in
//! logarithmic time.
//!
//! ## Features
//!
//! - **Any Item Type**: Store anything implementing [`Indexable`], or plain [`BBox`]es
//! - **Bulk Loading**: Pack a whole batch into square, evenly filled tiles
//! - **Dynamic Updates**: Insert and remove items between queries, no rebuild step
//! - **Snapshots**: Copy the exact node layout out and back in, or through JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use aabb_rtree::prelude::*;
//!
//! // Create a new spatial index
//! let mut tree = RTree::new();
//!
//! // Add some bounding boxes (min_x, min_y, max_x, max_y)
//! tree.insert(BBox::new(0.0, 0.0, 2.0, 2.0));    // large box
//! tree.insert(BBox::new(1.0, 1.0, 3.0, 3.0));    // overlapping box
//! tree.insert(BBox::new(5.0, 5.0, 6.0, 6.0));    // distant box
//! tree.insert(BBox::new(1.5, 1.5, 2.5, 2.5));    // small box inside others
//!
//! // Query for boxes intersecting a region
//! let results = tree.search(&BBox::new(1.2, 1.2, 2.8, 2.8));
//! assert_eq!(results.len(), 3);
//!
//! // Cheap existence check
//! assert!(tree.collides(&BBox::new(4.0, 4.0, 7.0, 7.0)));
//!
//! // Items can be removed again
//! tree.remove(&BBox::new(5.0, 5.0, 6.0, 6.0));
//! assert!(!tree.collides(&BBox::new(4.0, 4.0, 7.0, 7.0)));
//! ```
//!
//! ## How It Works
//!
//! Every node stores the exact bounding box of its entries. Leaves hold
//! items, branches hold nodes one level lower, and all leaves sit at the
//! same depth. A query only descends into nodes whose box intersects it, and
//! collects whole subtrees without further checks once a node lies fully
//! inside the query.
//!
//! Inserting descends along the least area enlargement. A node that grows
//! past [`RTree::max_entries`] is split along the axis with the smaller total
//! margin, at the point with the least overlap between the halves. Bulk
//! loading sorts the batch into tiles with [`select::multi_select`] instead
//! of sorting it fully.

pub mod bbox;
mod bulk_load;
pub mod error;
pub mod generate;
pub mod node;
pub mod prelude;
mod queries;
pub mod rtree;
pub mod select;
mod snapshot;

#[cfg(test)]
mod comparison_tests;
#[cfg(test)]
mod test_support;

pub use bbox::{BBox, Indexable};
pub use error::{Error, Result};
pub use node::{Branch, Leaf, Node};
pub use rtree::RTree;
