//! Per-kind payloads and meet rules
//!
//! Each kind owns its factories (which intern through the registry), its
//! structural dual and the meet rule for pairs where it is the lower kind.

pub mod func;
pub mod num;
pub mod oop;
pub mod simple;
pub mod wrapper;

pub use func::{FunPtrType, FunType, RpcType};
pub use num::{FltType, IntType};
pub use oop::{Field, OopType, StrType, StructType, TupleType};
pub use wrapper::{NameType, NilType};
