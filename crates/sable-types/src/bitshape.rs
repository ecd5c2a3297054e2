//! Bit-shape classification
//!
//! Decides, once inference has settled, whether a value of one type can be
//! handed to a consumer expecting another type without touching its bits,
//! with an explicit conversion sequence, or not at all.

use std::fmt;
use std::sync::Arc;

use crate::error::TypeError;
use crate::kinds::{FltType, IntType};
use crate::limits::flt_mantissa_bits;
use crate::ty::{Type, TypeId};

/// Representation compatibility between two types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitShape {
    /// One side is still a choice; nothing can be decided yet
    UnknownTop,
    /// The representations are bit-identical
    Free,
    /// An explicit conversion sequence is needed
    BitChanging,
    /// No legal conversion exists
    Incompatible,
}

impl BitShape {
    /// Legacy numeric code: -1, 0, 1 or 99
    pub fn code(self) -> i32 {
        match self {
            BitShape::UnknownTop => -1,
            BitShape::Free => 0,
            BitShape::BitChanging => 1,
            BitShape::Incompatible => 99,
        }
    }

    fn rank(self) -> u8 {
        match self {
            BitShape::Free => 0,
            BitShape::BitChanging => 1,
            BitShape::UnknownTop => 2,
            BitShape::Incompatible => 3,
        }
    }

    /// The less favourable of two verdicts
    pub fn worst(self, other: BitShape) -> BitShape {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for BitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BitShape::UnknownTop => "unknown",
            BitShape::Free => "free",
            BitShape::BitChanging => "bit-changing",
            BitShape::Incompatible => "incompatible",
        })
    }
}

impl TypeId {
    /// Classify converting a value of `self` into `to`
    pub fn bit_shape(self, to: TypeId) -> BitShape {
        classify(self, to)
    }
}

/// Classify converting a value of type `from` into type `to`
pub fn classify(from: TypeId, to: TypeId) -> BitShape {
    let shape = shape_of(from, to);
    tracing::trace!(from = from.index(), to = to.index(), %shape, "classified conversion");
    shape
}

/// Like [`classify`], but an impossible conversion is a user-facing error.
pub fn require_conversion(from: TypeId, to: TypeId) -> Result<BitShape, TypeError> {
    match classify(from, to) {
        BitShape::Incompatible => Err(TypeError::incompatible(from, to)),
        shape => Ok(shape),
    }
}

/// Peel off any name wrappers
fn strip_names(mut id: TypeId) -> (TypeId, Arc<Type>) {
    let mut ty = id.get();
    while let Type::Name(n) = &*ty {
        id = n.inner;
        ty = id.get();
    }
    (id, ty)
}

fn shape_of(from: TypeId, to: TypeId) -> BitShape {
    if from.above_center() || to.above_center() {
        return BitShape::UnknownTop;
    }
    if from == to {
        return BitShape::Free;
    }
    let (from_id, from_ty) = strip_names(from);
    let (to_id, to_ty) = strip_names(to);
    if from_id == to_id {
        return BitShape::Free;
    }

    match (&*from_ty, &*to_ty) {
        (Type::Universal { .. }, _) | (_, Type::Universal { .. }) => BitShape::Incompatible,

        // Control tokens are not values
        (Type::Ctrl { .. }, _) | (_, Type::Ctrl { .. }) => BitShape::Incompatible,

        // Every value fits the generic machine scalar
        (_, Type::Scalar { .. }) => BitShape::Free,

        (Type::Int(a), Type::Int(b)) => int_to_int(a, b),
        (Type::Int(a), Type::Flt(b)) => int_to_flt(a, b),
        (Type::Flt(a), Type::Flt(b)) => flt_to_flt(a, b),

        // Float to int needs an explicit rounding choice
        (Type::Flt(_), Type::Int(_)) => BitShape::Incompatible,

        (Type::Nil(a), Type::Nil(b)) => match (a.inner, b.inner) {
            (None, _) => BitShape::Free,
            (Some(x), Some(y)) => shape_of(x, y),
            (Some(_), None) => BitShape::Incompatible,
        },
        (_, Type::Nil(b)) => match b.inner {
            Some(inner) => shape_of(from_id, inner),
            None => BitShape::Incompatible,
        },
        (Type::Nil(a), _) if a.is_nil() && to_ty.kind().is_pointer_family() => BitShape::Free,

        // Pointer family
        (_, Type::Oop(_)) if from_ty.kind().is_pointer_family() => BitShape::Free,
        (Type::Str(_), Type::Str(b)) if b.con.is_none() => BitShape::Free,
        (Type::Tuple(a), Type::Tuple(b)) if a.elems.len() == b.elems.len() => a
            .elems
            .iter()
            .zip(&b.elems)
            .fold(BitShape::Free, |acc, (&x, &y)| acc.worst(shape_of(x, y))),
        (Type::Struct(a), Type::Struct(b)) => b.fields.iter().fold(BitShape::Free, |acc, field| {
            acc.worst(match a.field(&field.name) {
                Some(ty) => shape_of(ty, field.ty),
                None => BitShape::Incompatible,
            })
        }),

        // Code addresses: the target must admit every source index
        (Type::FunPtr(a), Type::FunPtr(b)) if a.fidxs.is_subset(&b.fidxs) => BitShape::Free,
        (Type::Rpc(a), Type::Rpc(b)) if a.rpcs.is_subset(&b.rpcs) => BitShape::Free,

        _ => BitShape::Incompatible,
    }
}

fn int_to_int(from: &IntType, to: &IntType) -> BitShape {
    // A constant's width is already the width of its value
    if to.con.is_none() && from.bits <= to.bits {
        BitShape::Free
    } else {
        BitShape::Incompatible
    }
}

fn int_to_flt(from: &IntType, to: &FltType) -> BitShape {
    if to.con.is_some() {
        return BitShape::Incompatible;
    }
    let mantissa = flt_mantissa_bits(to.bits);
    let exact = match from.con {
        Some(c) => c.unsigned_abs() <= 1u64 << mantissa,
        None => from.bits <= mantissa,
    };
    if exact {
        BitShape::BitChanging
    } else {
        BitShape::Incompatible
    }
}

fn flt_to_flt(from: &FltType, to: &FltType) -> BitShape {
    if to.con.is_some() {
        return BitShape::Incompatible;
    }
    if from.con.is_some() {
        return if from.bits <= to.bits {
            BitShape::Free
        } else {
            BitShape::Incompatible
        };
    }
    match from.bits.cmp(&to.bits) {
        std::cmp::Ordering::Equal => BitShape::Free,
        std::cmp::Ordering::Less => BitShape::BitChanging,
        std::cmp::Ordering::Greater => BitShape::Incompatible,
    }
}
