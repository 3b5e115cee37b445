//! Back-to-front ordering for sprites sharing a scene
//!
//! Sprites are re-sorted every frame. Depths that differ by less than
//! [`DEPTH_TIE_TOLERANCE`] compare equal, so two sprites drifting past each
//! other do not swap draw order on every tiny change (visible flicker).

use std::cmp::Ordering;

use crate::consts::DEPTH_TIE_TOLERANCE;

/// Compare two depths, treating near-equal values as ties
#[inline]
pub fn compare_depth(a: f32, b: f32, tolerance: f32) -> Ordering {
    let diff = a - b;
    if diff < -tolerance {
        Ordering::Less
    } else if diff > tolerance {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Stable insertion sort by ascending depth (far first) with a tie tolerance
///
/// The tolerance comparator is not a total order, so the standard library
/// sorts cannot be used with it. Frame-to-frame the slice is almost sorted,
/// which keeps insertion sort close to linear.
pub fn sort_by_depth_with<T, F>(items: &mut [T], tolerance: f32, depth: F)
where
    F: Fn(&T) -> f32,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare_depth(depth(&items[j]), depth(&items[j - 1]), tolerance) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sort back-to-front with the default tolerance
pub fn sort_back_to_front<T, F>(items: &mut [T], depth: F)
where
    F: Fn(&T) -> f32,
{
    sort_by_depth_with(items, DEPTH_TIE_TOLERANCE, depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Item {
        id: u32,
        z: f32,
    }

    fn items(depths: &[f32]) -> Vec<Item> {
        depths
            .iter()
            .enumerate()
            .map(|(i, &z)| Item { id: i as u32, z })
            .collect()
    }

    fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_compare_depth() {
        assert_eq!(compare_depth(1.0, 5.0, 1.0), Ordering::Less);
        assert_eq!(compare_depth(5.0, 1.0, 1.0), Ordering::Greater);
        assert_eq!(compare_depth(5.0, 5.5, 1.0), Ordering::Equal);
        assert_eq!(compare_depth(5.0, 6.0, 1.0), Ordering::Equal);
        assert_eq!(compare_depth(5.0, 6.01, 1.0), Ordering::Less);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut v = items(&[5.0, 5.0, 1.0]);
        sort_back_to_front(&mut v, |i| i.z);
        let depths: Vec<f32> = v.iter().map(|i| i.z).collect();
        assert_eq!(depths, vec![1.0, 5.0, 5.0]);
        assert_eq!(ids(&v), vec![2, 0, 1]);
    }

    #[test]
    fn test_near_ties_not_swapped() {
        let mut v = items(&[5.4, 5.0]);
        sort_back_to_front(&mut v, |i| i.z);
        assert_eq!(ids(&v), vec![0, 1]);
    }

    #[test]
    fn test_far_to_near() {
        let mut v = items(&[300.0, 10.0, 599.0, 150.0]);
        sort_back_to_front(&mut v, |i| i.z);
        assert_eq!(ids(&v), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<Item> = Vec::new();
        sort_back_to_front(&mut empty, |i| i.z);
        let mut one = items(&[3.0]);
        sort_back_to_front(&mut one, |i| i.z);
        assert_eq!(ids(&one), vec![0]);
    }

    #[test]
    fn test_zero_tolerance_is_plain_stable_sort() {
        let mut v = items(&[2.0, 1.0, 2.0, 0.5]);
        sort_by_depth_with(&mut v, 0.0, |i| i.z);
        assert_eq!(ids(&v), vec![3, 1, 0, 2]);
    }
}
