//! Partial ordering primitives used to tile a batch during bulk loading.
//!
//! [`quickselect`] puts one element into its sorted position in expected
//! linear time. [`multi_select`] builds on it to cut a range into contiguous
//! groups of about `n` elements, each group ordered before the next, without
//! sorting inside any group.

use std::cmp::Ordering;

/// Ranges longer than this are narrowed by sampling before partitioning.
const SAMPLE_THRESHOLD: usize = 600;

/// Rearranges `items[left..=right]` so that `items[k]` holds the element that
/// would be there if the range were sorted by `compare`. Everything in
/// `[left, k)` compares less than or equal to it and everything in
/// `(k, right]` greater than or equal.
///
/// Uses Floyd-Rivest sampling on large ranges.
///
/// # Panics
/// If `k` is outside `left..=right` or `right` is out of bounds.
///
/// # Examples
/// ```
/// use aabb_rtree::select::quickselect;
///
/// let mut values = [9, 1, 8, 2, 7, 3];
/// quickselect(&mut values, 2, 0, 5, |a, b| a.cmp(b));
/// assert_eq!(values[2], 3);
/// assert!(values[..2].iter().all(|&v| v <= 3));
/// assert!(values[3..].iter().all(|&v| v >= 3));
/// ```
pub fn quickselect<T, F>(items: &mut [T], k: usize, left: usize, right: usize, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(left <= k && k <= right, "k = {k} is outside {left}..={right}");
    assert!(right < items.len(), "range end {right} is out of bounds");
    select_step(items, k, left, right, &mut compare);
}

fn select_step<T, F>(items: &mut [T], k: usize, mut left: usize, mut right: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while right > left {
        if right - left > SAMPLE_THRESHOLD {
            let (sample_left, sample_right) = sample_bounds(k, left, right);
            select_step(items, k, sample_left, sample_right, compare);
        }

        // pivot parked at `left` while the rest is partitioned around it
        items.swap(left, k);
        let mut i = left + 1;
        let mut j = right;
        loop {
            while i <= j && compare(&items[i], &items[left]) == Ordering::Less {
                i += 1;
            }
            while i <= j && compare(&items[j], &items[left]) == Ordering::Greater {
                j -= 1;
            }
            if i >= j {
                break;
            }
            items.swap(i, j);
            i += 1;
            j -= 1;
        }
        items.swap(left, j);

        match j.cmp(&k) {
            Ordering::Less => left = j + 1,
            Ordering::Greater => right = j - 1,
            Ordering::Equal => break,
        }
    }
}

/// Sub-range around `k` that very likely contains the k-th element.
#[expect(
    clippy::cast_possible_truncation,
    reason = "bounds are clamped to the range right after the cast"
)]
fn sample_bounds(k: usize, left: usize, right: usize) -> (usize, usize) {
    let n = (right - left + 1) as f64;
    let m = (k - left + 1) as f64;
    let z = n.ln();
    let s = 0.5 * (2.0 * z / 3.0).exp();
    let sd = 0.5 * (z * s * (n - s) / n).sqrt() * if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 };
    let k = k as f64;

    let new_left = (k - m * s / n + sd).floor().max(0.0) as usize;
    let new_right = (k + (n - m) * s / n + sd).floor().max(0.0) as usize;
    (left.max(new_left), right.min(new_right))
}

/// Partitions `items[left..=right]` into contiguous groups of at most `n`
/// elements such that every group is ordered before the next under
/// `compare`. Elements inside a group stay unsorted.
///
/// Works through an explicit stack of sub-ranges, halving each one with
/// [`quickselect`] at a group boundary until it is no longer than `n`.
///
/// # Panics
/// If `n` is zero or `right` is out of bounds.
///
/// # Examples
/// ```
/// use aabb_rtree::select::multi_select;
///
/// let mut values: Vec<u32> = (0..20).rev().collect();
/// multi_select(&mut values, 0, 19, 5, |a, b| a.cmp(b));
/// let max_first = values[..5].iter().max().copied();
/// let min_second = values[5..10].iter().min().copied();
/// assert!(max_first <= min_second);
/// ```
pub fn multi_select<T, F>(items: &mut [T], left: usize, right: usize, n: usize, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(n > 0, "group size must be positive");
    assert!(right < items.len(), "range end {right} is out of bounds");

    let mut stack = vec![(left, right)];
    while let Some((left, right)) = stack.pop() {
        if right - left <= n {
            continue;
        }

        let mid = left + (right - left).div_ceil(n * 2) * n;
        select_step(items, mid, left, right, &mut compare);

        stack.push((left, mid));
        stack.push((mid, right));
    }
}
