//! Sable Type Lattice
//!
//! Hash-consed type values with meet, join and dual, used by global type
//! inference, plus the bit-shape classifier consumed by lowering.
//!
//! Every type is created through a kind factory (for example
//! [`IntType::make`] or [`OopType::make`]) and comes back as a [`TypeId`]
//! handle. Structurally equal types always share one handle, so handle
//! equality is type equality.

#![warn(missing_docs)]

pub mod bitshape;
pub mod error;
pub mod kinds;
pub mod lattice;
pub mod limits;
pub mod registry;
pub mod ty;

pub use bitshape::{classify, require_conversion, BitShape};
pub use error::TypeError;
pub use kinds::{
    Field, FltType, FunPtrType, FunType, IntType, NameType, NilType, OopType, RpcType, StrType,
    StructType, TupleType,
};
pub use lattice::{check_startup, standard_types, LawViolation};
pub use registry::RegistryStats;
pub use ty::{Kind, Type, TypeId};
