//! Ascending, duplicate-free value sets

use std::fmt;

use crate::merge;

/// An ascending, duplicate-free sequence of totally ordered elements.
///
/// The invariant is established on construction, so the merge operations
/// can rely on the co-scan preconditions without re-checking them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SortedSet<T> {
    items: Vec<T>,
}

impl<T> SortedSet<T> {
    /// Create an empty set
    pub const fn new() -> Self {
        SortedSet { items: Vec::new() }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in ascending order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Ord> SortedSet<T> {
    /// Build a set from arbitrary input, sorting and dropping duplicates.
    pub fn from_unsorted(mut items: Vec<T>) -> Self {
        items.sort_unstable();
        items.dedup();
        SortedSet { items }
    }

    /// Wrap a vector that is already ascending and duplicate-free.
    ///
    /// Returns `None` if the vector does not satisfy the invariant.
    pub fn from_sorted(items: Vec<T>) -> Option<Self> {
        if items.windows(2).all(|w| w[0] < w[1]) {
            Some(SortedSet { items })
        } else {
            None
        }
    }

    /// Membership test (binary search)
    pub fn contains(&self, item: &T) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// Insert an element, keeping the set ascending.
    ///
    /// Returns false if the element was already present.
    pub fn insert(&mut self, item: T) -> bool {
        match self.items.binary_search(&item) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, item);
                true
            }
        }
    }

    /// Whether every element of `self` is in `other`
    pub fn is_subset(&self, other: &SortedSet<T>) -> bool {
        let mut rest = other.items.iter();
        self.items
            .iter()
            .all(|item| rest.by_ref().any(|candidate| candidate == item))
    }
}

impl<T: Ord + Clone> SortedSet<T> {
    /// Elements present in either set
    pub fn union(&self, other: &SortedSet<T>) -> SortedSet<T> {
        SortedSet {
            items: merge::union(&self.items, &other.items),
        }
    }

    /// Elements present in both sets
    pub fn intersection(&self, other: &SortedSet<T>) -> SortedSet<T> {
        SortedSet {
            items: merge::intersection(&self.items, &other.items),
        }
    }
}

impl<T> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for SortedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SortedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
