//! Sable utilities
//!
//! Ordered value-set support shared by the lattice kinds whose elements
//! carry an enumerable domain (function pointers, return addresses,
//! struct field names).

#![warn(missing_docs)]

pub mod merge;
pub mod sorted;

pub use merge::{intersection, union};
pub use sorted::SortedSet;
