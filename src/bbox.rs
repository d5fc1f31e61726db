//! Axis-aligned bounding boxes and the geometry the tree is built on.
//!
//! Every function here is total: degenerate (zero-area) boxes are valid, and
//! [`BBox::EMPTY`] acts as the identity element for [`BBox::union`].

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

/// Box structure: minX, minY, maxX, maxY
///
/// Serialized with camel-case field names (`minX`, `minY`, `maxX`, `maxY`).
/// JSON has no infinities, so the bounds of [`BBox::EMPTY`] are written as
/// `null` and read back as the matching infinity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    /// Minimum X coordinate
    #[serde(deserialize_with = "lower_bound")]
    pub min_x: f64,
    /// Minimum Y coordinate
    #[serde(deserialize_with = "lower_bound")]
    pub min_y: f64,
    /// Maximum X coordinate
    #[serde(deserialize_with = "upper_bound")]
    pub max_x: f64,
    /// Maximum Y coordinate
    #[serde(deserialize_with = "upper_bound")]
    pub max_y: f64,
}

fn lower_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

fn upper_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

impl BBox {
    /// The empty box. Extending it by any box yields that box.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Creates a box from its corners (min_x, min_y, max_x, max_y).
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Creates a zero-area box at a point.
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Smallest box covering every box in `boxes`; [`BBox::EMPTY`] for none.
    pub fn union_all<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        boxes.into_iter().fold(Self::EMPTY, |acc, b| acc.union(&b))
    }

    /// Returns true for the accumulation identity (nothing covered yet).
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Smallest box covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows `self` in place so that it covers `other`.
    pub fn extend(&mut self, other: &Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Area of the box.
    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }

    /// Half perimeter of the box.
    pub fn margin(&self) -> f64 {
        (self.max_x - self.min_x) + (self.max_y - self.min_y)
    }

    /// Overlap test on both axes, bounds inclusive.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        other.min_x <= self.max_x
            && other.min_y <= self.max_y
            && other.max_x >= self.min_x
            && other.max_y >= self.min_y
    }

    /// Returns true if `self` fully encloses `other`, bounds inclusive.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Area of the overlap of the two boxes, 0 if they are disjoint.
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);

        (max_x - min_x).max(0.0) * (max_y - min_y).max(0.0)
    }

    /// Area of the union of the two boxes.
    pub fn enlarged_area(&self, other: &Self) -> f64 {
        (other.max_x.max(self.max_x) - other.min_x.min(self.min_x))
            * (other.max_y.max(self.max_y) - other.min_y.min(self.min_y))
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Display for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BBox({}, {}, {}, {})", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Anything that can be stored in an [`RTree`](crate::RTree).
///
/// `bbox` is the rectangle-extraction hook; it is called whenever the tree
/// needs the item's box and its result is never cached. The two comparators
/// order items by their lower coordinate during splits and bulk loading and
/// may be overridden when a cheaper comparison is available.
///
/// # Examples
/// ```
/// use aabb_rtree::{BBox, Indexable};
///
/// struct Building {
///     name: &'static str,
///     footprint: BBox,
/// }
///
/// impl Indexable for Building {
///     fn bbox(&self) -> BBox {
///         self.footprint
///     }
/// }
///
/// let b = Building { name: "depot", footprint: BBox::new(0.0, 0.0, 4.0, 2.0) };
/// assert_eq!(b.bbox().area(), 8.0);
/// assert_eq!(b.name, "depot");
/// ```
pub trait Indexable {
    /// Bounding box of the item.
    fn bbox(&self) -> BBox;

    /// Orders two items by the lower X coordinate of their boxes.
    fn compare_min_x(&self, other: &Self) -> Ordering {
        self.bbox().min_x.total_cmp(&other.bbox().min_x)
    }

    /// Orders two items by the lower Y coordinate of their boxes.
    fn compare_min_y(&self, other: &Self) -> Ordering {
        self.bbox().min_y.total_cmp(&other.bbox().min_y)
    }
}

impl Indexable for BBox {
    #[inline]
    fn bbox(&self) -> BBox {
        *self
    }

    fn compare_min_x(&self, other: &Self) -> Ordering {
        self.min_x.total_cmp(&other.min_x)
    }

    fn compare_min_y(&self, other: &Self) -> Ordering {
        self.min_y.total_cmp(&other.min_y)
    }
}

/// A box paired with an arbitrary payload.
impl<V> Indexable for (BBox, V) {
    #[inline]
    fn bbox(&self) -> BBox {
        self.0
    }
}

impl<T: Indexable + ?Sized> Indexable for &T {
    fn bbox(&self) -> BBox {
        (**self).bbox()
    }

    fn compare_min_x(&self, other: &Self) -> Ordering {
        (**self).compare_min_x(*other)
    }

    fn compare_min_y(&self, other: &Self) -> Ordering {
        (**self).compare_min_y(*other)
    }
}

impl<T: Indexable + ?Sized> Indexable for Box<T> {
    fn bbox(&self) -> BBox {
        (**self).bbox()
    }

    fn compare_min_x(&self, other: &Self) -> Ordering {
        (**self).compare_min_x(other)
    }

    fn compare_min_y(&self, other: &Self) -> Ordering {
        (**self).compare_min_y(other)
    }
}
