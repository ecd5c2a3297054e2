//! Linear co-scan merges over ascending, duplicate-free slices
//!
//! Both inputs must already be ascending and duplicate-free under the
//! comparison in use. Inputs that violate this produce unspecified (but
//! memory-safe) output; nothing is re-sorted or corrected here.

use std::cmp::Ordering;
use std::convert::Infallible;

/// Union of two ascending, duplicate-free slices.
///
/// Every element of either input appears exactly once in the result,
/// which is again ascending.
pub fn union<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    match try_union_by(a, b, Ord::cmp, |x, _| Ok::<_, Infallible>(x.clone())) {
        Ok(merged) => merged,
        Err(never) => match never {},
    }
}

/// Intersection of two ascending, duplicate-free slices.
pub fn intersection<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    match try_intersection_by(a, b, Ord::cmp, |x, _| Ok::<_, Infallible>(x.clone())) {
        Ok(merged) => merged,
        Err(never) => match never {},
    }
}

/// Union keyed by `cmp`, combining elements that compare equal.
///
/// Elements found on one side only are cloned into the result; elements
/// present on both sides are replaced by `combine(left, right)`. The first
/// error returned by `combine` aborts the merge.
pub fn try_union_by<T, E, C, F>(a: &[T], b: &[T], mut cmp: C, mut combine: F) -> Result<Vec<T>, E>
where
    T: Clone,
    C: FnMut(&T, &T) -> Ordering,
    F: FnMut(&T, &T) -> Result<T, E>,
{
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match cmp(&a[i], &b[j]) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.push(combine(&a[i], &b[j])?);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    Ok(out)
}

/// Intersection keyed by `cmp`, combining elements that compare equal.
pub fn try_intersection_by<T, E, C, F>(
    a: &[T],
    b: &[T],
    mut cmp: C,
    mut combine: F,
) -> Result<Vec<T>, E>
where
    C: FnMut(&T, &T) -> Ordering,
    F: FnMut(&T, &T) -> Result<T, E>,
{
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match cmp(&a[i], &b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(combine(&a[i], &b[j])?);
                i += 1;
                j += 1;
            }
        }
    }
    Ok(out)
}
