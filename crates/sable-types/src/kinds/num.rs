//! Integer and float kinds
//!
//! A numeric type is either a constant or a width-bounded range. Ranges come
//! in two halves: `~intN` is the choice of any N-bit value, `intN` is every
//! N-bit value. Constants sit on the center line and are their own duals.
//!
//! Widths order the halves in opposite directions: a narrower top is lower
//! than a wider one, a wider bottom is lower than a narrower one.

use std::fmt;

use crate::limits::{flt_width, int_width};
use crate::registry;
use crate::ty::{Type, TypeId};

/// The part of a numeric type the shared meet rule looks at
#[derive(Clone, Copy)]
struct Shape {
    any: bool,
    bits: u8,
    is_con: bool,
}

/// Outcome of the shared meet rule
enum Pick {
    Left,
    Right,
    Range { bits: u8, any: bool },
}

fn meet_shapes(a: Shape, b: Shape) -> Pick {
    match (a.is_con, b.is_con) {
        (true, true) => Pick::Range {
            bits: a.bits.max(b.bits),
            any: false,
        },
        (true, false) => con_vs_range(a, b, Pick::Left),
        (false, true) => con_vs_range(b, a, Pick::Right),
        (false, false) => match (a.any, b.any) {
            (true, true) => Pick::Range {
                bits: a.bits.min(b.bits),
                any: true,
            },
            (false, false) => Pick::Range {
                bits: a.bits.max(b.bits),
                any: false,
            },
            (true, false) => Pick::Right,
            (false, true) => Pick::Left,
        },
    }
}

fn con_vs_range(con: Shape, range: Shape, keep: Pick) -> Pick {
    if range.any && con.bits <= range.bits {
        return keep;
    }
    let bits = if range.any {
        con.bits
    } else {
        con.bits.max(range.bits)
    };
    Pick::Range { bits, any: false }
}

/// Integer constant or range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntType {
    pub(crate) any: bool,
    pub(crate) bits: u8,
    pub(crate) con: Option<i64>,
}

impl IntType {
    pub(crate) const fn raw(any: bool, bits: u8, con: Option<i64>) -> Self {
        IntType { any, bits, con }
    }

    /// Integer range of `bits` width, rounded up to a legal width
    pub fn make(bits: u8, any: bool) -> TypeId {
        registry::intern(Type::Int(IntType::raw(any, int_width(bits), None)))
    }

    /// Integer constant
    pub fn con(value: i64) -> TypeId {
        registry::intern(Type::Int(IntType::raw(false, IntType::width_of(value), Some(value))))
    }

    /// Smallest legal width holding `value`
    pub fn width_of(value: i64) -> u8 {
        if value == 0 || value == 1 {
            1
        } else if i8::try_from(value).is_ok() {
            8
        } else if i16::try_from(value).is_ok() {
            16
        } else if i32::try_from(value).is_ok() {
            32
        } else {
            64
        }
    }

    /// Bit width (for a constant, the width of its value)
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Constant value, if any
    pub fn constant(&self) -> Option<i64> {
        self.con
    }

    pub(crate) fn above_center(&self) -> bool {
        self.con.is_none() && self.any
    }

    pub(crate) fn xdual(&self) -> TypeId {
        match self.con {
            Some(c) => IntType::con(c),
            None => IntType::make(self.bits, !self.any),
        }
    }

    fn shape(&self) -> Shape {
        Shape {
            any: self.any,
            bits: self.bits,
            is_con: self.con.is_some(),
        }
    }

    pub(crate) fn meet(&self, self_id: TypeId, other: &IntType, other_id: TypeId) -> TypeId {
        if self.con.is_some() && self.con == other.con {
            return self_id;
        }
        match meet_shapes(self.shape(), other.shape()) {
            Pick::Left => self_id,
            Pick::Right => other_id,
            Pick::Range { bits, any } => IntType::make(bits, any),
        }
    }
}

impl fmt::Display for IntType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.con {
            Some(c) => write!(f, "{}", c),
            None if self.any => write!(f, "~int{}", self.bits),
            None => write!(f, "int{}", self.bits),
        }
    }
}

/// Float constant or range. Constants are stored as their bit pattern so
/// the type stays hashable; every NaN is stored as the same pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FltType {
    pub(crate) any: bool,
    pub(crate) bits: u8,
    pub(crate) con: Option<u64>,
}

impl FltType {
    pub(crate) const fn raw(any: bool, bits: u8, con: Option<u64>) -> Self {
        FltType { any, bits, con }
    }

    /// Float range of `bits` width, rounded up to 32 or 64
    pub fn make(bits: u8, any: bool) -> TypeId {
        registry::intern(Type::Flt(FltType::raw(any, flt_width(bits), None)))
    }

    /// Float constant
    pub fn con(value: f64) -> TypeId {
        let pattern = if value.is_nan() {
            f64::NAN.to_bits()
        } else {
            value.to_bits()
        };
        registry::intern(Type::Flt(FltType::raw(
            false,
            FltType::width_of(value),
            Some(pattern),
        )))
    }

    /// 32 if `value` survives a round trip through `f32`, else 64
    pub fn width_of(value: f64) -> u8 {
        if value.is_nan() || f64::from(value as f32) == value {
            32
        } else {
            64
        }
    }

    /// Bit width (for a constant, the width of its value)
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Constant value, if any
    pub fn constant(&self) -> Option<f64> {
        self.con.map(f64::from_bits)
    }

    pub(crate) fn above_center(&self) -> bool {
        self.con.is_none() && self.any
    }

    pub(crate) fn xdual(&self) -> TypeId {
        match self.con {
            Some(pattern) => FltType::con(f64::from_bits(pattern)),
            None => FltType::make(self.bits, !self.any),
        }
    }

    fn shape(&self) -> Shape {
        Shape {
            any: self.any,
            bits: self.bits,
            is_con: self.con.is_some(),
        }
    }

    pub(crate) fn meet(&self, self_id: TypeId, other: &FltType, other_id: TypeId) -> TypeId {
        if self.con.is_some() && self.con == other.con {
            return self_id;
        }
        match meet_shapes(self.shape(), other.shape()) {
            Pick::Left => self_id,
            Pick::Right => other_id,
            Pick::Range { bits, any } => FltType::make(bits, any),
        }
    }
}

impl fmt::Display for FltType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.constant() {
            Some(c) => write!(f, "{:?}", c),
            None if self.any => write!(f, "~flt{}", self.bits),
            None => write!(f, "flt{}", self.bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_width_of() {
        assert_eq!(IntType::width_of(0), 1);
        assert_eq!(IntType::width_of(1), 1);
        assert_eq!(IntType::width_of(-1), 8);
        assert_eq!(IntType::width_of(127), 8);
        assert_eq!(IntType::width_of(128), 16);
        assert_eq!(IntType::width_of(-40_000), 32);
        assert_eq!(IntType::width_of(i64::MAX), 64);
    }

    #[test]
    fn test_int_make_rounds_width() {
        assert_eq!(IntType::make(64, false), TypeId::INT64);
        assert_eq!(IntType::make(20, false), TypeId::INT32);
        assert_eq!(IntType::make(1, false), TypeId::BOOL);
        assert_eq!(IntType::make(64, true), TypeId::XINT64);
    }

    #[test]
    fn test_int_constants() {
        let seven = IntType::con(7);
        assert_eq!(seven.to_string(), "7");
        assert_eq!(seven, IntType::con(7));
        assert_eq!(seven.dual(), seven);
        assert!(seven.is_con());
        assert!(!seven.above_center());
    }

    #[test]
    fn test_int_distinct_constants_fall_to_range() {
        assert_eq!(IntType::con(0).meet(IntType::con(1)), Ok(TypeId::BOOL));
        assert_eq!(IntType::con(5).meet(IntType::con(1000)), Ok(IntType::make(16, false)));
    }

    #[test]
    fn test_int_constant_against_ranges() {
        let five = IntType::con(5);
        assert_eq!(five.meet(TypeId::XINT64), Ok(five));
        assert_eq!(five.meet(IntType::make(1, true)), Ok(TypeId::INT8));
        assert_eq!(five.meet(TypeId::INT64), Ok(TypeId::INT64));
        assert_eq!(five.meet(TypeId::BOOL), Ok(TypeId::INT8));
    }

    #[test]
    fn test_int_ranges() {
        let x8 = IntType::make(8, true);
        assert_eq!(x8.meet(TypeId::XINT64), Ok(x8));
        assert_eq!(TypeId::INT8.meet(TypeId::INT32), Ok(TypeId::INT32));
        assert_eq!(TypeId::XINT64.meet(TypeId::INT8), Ok(TypeId::INT8));
        assert_eq!(x8.to_string(), "~int8");
    }

    #[test]
    fn test_int_range_duals() {
        assert_eq!(TypeId::INT64.dual(), TypeId::XINT64);
        assert_eq!(TypeId::INT8.dual(), IntType::make(8, true));
        assert_eq!(TypeId::INT8.dual().dual(), TypeId::INT8);
    }

    #[test]
    fn test_flt_width_of() {
        assert_eq!(FltType::width_of(1.5), 32);
        assert_eq!(FltType::width_of(0.1), 64);
        assert_eq!(FltType::width_of(f64::NAN), 32);
        assert_eq!(FltType::width_of(f64::INFINITY), 32);
    }

    #[test]
    fn test_flt_constants() {
        let half = FltType::con(0.5);
        assert_eq!(half.to_string(), "0.5");
        assert_eq!(half.dual(), half);
        assert_eq!(FltType::con(f64::NAN), FltType::con(-f64::NAN));
        assert_eq!(half.meet(TypeId::XFLT64), Ok(half));
        assert_eq!(half.meet(FltType::con(0.25)), Ok(TypeId::FLT32));
        assert_eq!(half.meet(FltType::con(0.1)), Ok(TypeId::FLT64));
    }

    #[test]
    fn test_flt_ranges() {
        assert_eq!(TypeId::FLT32.meet(TypeId::FLT64), Ok(TypeId::FLT64));
        assert_eq!(TypeId::XFLT64.meet(TypeId::FLT32), Ok(TypeId::FLT32));
        assert_eq!(TypeId::FLT32.dual(), FltType::make(32, true));
        assert_eq!(FltType::make(32, true).to_string(), "~flt32");
    }

    #[test]
    fn test_int_and_flt_widen_to_scalar() {
        assert_eq!(TypeId::INT64.meet(TypeId::FLT64), Ok(TypeId::SCALAR));
        assert_eq!(IntType::con(3).meet(FltType::con(3.0)), Ok(TypeId::SCALAR));
    }
}
