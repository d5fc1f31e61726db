//! Random test data.
//!
//! Boxes are spread over a 100x100 coordinate space, each extending up to
//! `size` along either axis from its lower corner.

use rand::Rng;

use crate::bbox::BBox;

/// Side of the square coordinate space the boxes are drawn from.
pub const SPACE: f64 = 100.0;

/// Generate a random bounding box with extents variable UP TO `size`
pub fn random_box<R: Rng>(rng: &mut R, size: f64) -> BBox {
    let min_x = rng.random::<f64>() * (SPACE - size);
    let min_y = rng.random::<f64>() * (SPACE - size);
    BBox::new(
        min_x,
        min_y,
        min_x + size * rng.random::<f64>(),
        min_y + size * rng.random::<f64>(),
    )
}

/// Generate `count` random boxes with [`random_box`].
///
/// # Examples
/// ```
/// use aabb_rtree::generate::random_boxes;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let boxes = random_boxes(&mut rng, 10, 1.0);
/// assert_eq!(boxes.len(), 10);
/// assert!(boxes.iter().all(|b| b.max_x - b.min_x <= 1.0));
/// ```
pub fn random_boxes<R: Rng>(rng: &mut R, count: usize, size: f64) -> Vec<BBox> {
    (0..count).map(|_| random_box(rng, size)).collect()
}
