//! Core type definitions for the Sable type lattice

use std::fmt;

use crate::kinds::{
    FltType, FunPtrType, FunType, IntType, NameType, NilType, OopType, RpcType, StrType,
    StructType, TupleType,
};
use crate::registry;

/// Handle to a canonical type in the registry
///
/// Handles are only minted by the registry and are never invalidated, so
/// two handles are equal exactly when the types they name are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Universal top: every kind's choice
    pub const ANY: TypeId = TypeId(0);
    /// Universal bottom: every value of every kind
    pub const ALL: TypeId = TypeId(1);
    /// Every machine scalar
    pub const SCALAR: TypeId = TypeId(2);
    /// Choice of any machine scalar
    pub const XSCALAR: TypeId = TypeId(3);
    /// Control token
    pub const CTRL: TypeId = TypeId(4);
    /// Dead control
    pub const XCTRL: TypeId = TypeId(5);
    /// The nil constant
    pub const NIL: TypeId = TypeId(6);
    /// Any nullable heap pointer
    pub const OOP: TypeId = TypeId(7);
    /// Choice of any nullable heap pointer
    pub const XOOP: TypeId = TypeId(8);
    /// Any string
    pub const STR: TypeId = TypeId(9);
    /// Choice of any string
    pub const XSTR: TypeId = TypeId(10);
    /// 1-bit integer
    pub const BOOL: TypeId = TypeId(11);
    /// 8-bit integer
    pub const INT8: TypeId = TypeId(12);
    /// 32-bit integer
    pub const INT32: TypeId = TypeId(13);
    /// 64-bit integer
    pub const INT64: TypeId = TypeId(14);
    /// Choice of any 64-bit integer
    pub const XINT64: TypeId = TypeId(15);
    /// 32-bit float
    pub const FLT32: TypeId = TypeId(16);
    /// 64-bit float
    pub const FLT64: TypeId = TypeId(17);
    /// Choice of any 64-bit float
    pub const XFLT64: TypeId = TypeId(18);

    /// Raw arena index of this handle
    pub fn index(self) -> u32 {
        self.0
    }

    /// Resolve this handle to its structural value
    pub fn get(self) -> std::sync::Arc<Type> {
        registry::get(self)
    }

    /// Kind tag of the type behind this handle
    pub fn kind(self) -> Kind {
        registry::get(self).kind()
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", registry::get(*self))
    }
}

/// Kind tags, in the fixed total order used by meet dispatch
///
/// For any unordered pair of kinds, the lower-ordered kind owns the meet
/// rule. Wrappers sort before everything they can wrap so that delegation
/// only ever flows one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// `ANY` / `ALL`
    Universal,
    /// The nil constant and nullable wrappers
    Nil,
    /// Named (nominal) wrappers
    Name,
    /// `SCALAR` / `XSCALAR`
    Scalar,
    /// Control tokens
    Ctrl,
    /// Integers
    Int,
    /// Floats
    Flt,
    /// Function pointers
    FunPtr,
    /// Function signatures
    Fun,
    /// Return addresses
    Rpc,
    /// Generic nullable heap pointer
    Oop,
    /// Strings
    Str,
    /// Structs
    Struct,
    /// Tuples
    Tuple,
}

impl Kind {
    /// Short lowercase name of this kind
    pub fn name(self) -> &'static str {
        match self {
            Kind::Universal => "universal",
            Kind::Nil => "nil",
            Kind::Name => "name",
            Kind::Scalar => "scalar",
            Kind::Ctrl => "ctrl",
            Kind::Int => "int",
            Kind::Flt => "flt",
            Kind::FunPtr => "funptr",
            Kind::Fun => "fun",
            Kind::Rpc => "rpc",
            Kind::Oop => "oop",
            Kind::Str => "str",
            Kind::Struct => "struct",
            Kind::Tuple => "tuple",
        }
    }

    /// The nullable heap-pointer family: generic pointer and its sub-kinds
    pub fn is_pointer_family(self) -> bool {
        matches!(self, Kind::Oop | Kind::Str | Kind::Struct | Kind::Tuple)
    }

    /// Concrete value kinds that widen to `SCALAR` when they cannot combine
    pub fn is_scalar_like(self) -> bool {
        matches!(self, Kind::Int | Kind::Flt | Kind::FunPtr | Kind::Fun | Kind::Rpc)
            || self.is_pointer_family()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The structural content of a type
///
/// Values of this enum are candidates until interned; only the registry
/// hands out the canonical [`TypeId`] for one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// `ANY` (`any == true`) or `ALL`
    Universal {
        /// Center flag
        any: bool,
    },
    /// `XSCALAR` (`any == true`) or `SCALAR`
    Scalar {
        /// Center flag
        any: bool,
    },
    /// `XCTRL` (`any == true`) or `CTRL`
    Ctrl {
        /// Center flag
        any: bool,
    },
    /// Nil constant or nullable wrapper
    Nil(NilType),
    /// Named wrapper
    Name(NameType),
    /// Integer
    Int(IntType),
    /// Float
    Flt(FltType),
    /// Function pointer set
    FunPtr(FunPtrType),
    /// Function signature
    Fun(FunType),
    /// Return address set
    Rpc(RpcType),
    /// Generic nullable pointer
    Oop(OopType),
    /// String
    Str(StrType),
    /// Struct
    Struct(StructType),
    /// Tuple
    Tuple(TupleType),
}

impl Type {
    /// Kind tag of this type
    pub fn kind(&self) -> Kind {
        match self {
            Type::Universal { .. } => Kind::Universal,
            Type::Scalar { .. } => Kind::Scalar,
            Type::Ctrl { .. } => Kind::Ctrl,
            Type::Nil(_) => Kind::Nil,
            Type::Name(_) => Kind::Name,
            Type::Int(_) => Kind::Int,
            Type::Flt(_) => Kind::Flt,
            Type::FunPtr(_) => Kind::FunPtr,
            Type::Fun(_) => Kind::Fun,
            Type::Rpc(_) => Kind::Rpc,
            Type::Oop(_) => Kind::Oop,
            Type::Str(_) => Kind::Str,
            Type::Struct(_) => Kind::Struct,
            Type::Tuple(_) => Kind::Tuple,
        }
    }

    /// Get the int payload if this is an integer
    pub fn as_int(&self) -> Option<&IntType> {
        match self {
            Type::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Get the float payload if this is a float
    pub fn as_flt(&self) -> Option<&FltType> {
        match self {
            Type::Flt(f) => Some(f),
            _ => None,
        }
    }

    /// Get the nil payload if this is nil or a nullable wrapper
    pub fn as_nil(&self) -> Option<&NilType> {
        match self {
            Type::Nil(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Universal { any } => f.write_str(if *any { "any" } else { "all" }),
            Type::Scalar { any } => f.write_str(if *any { "~scalar" } else { "scalar" }),
            Type::Ctrl { any } => f.write_str(if *any { "~ctrl" } else { "ctrl" }),
            Type::Nil(n) => write!(f, "{}", n),
            Type::Name(n) => write!(f, "{}", n),
            Type::Int(i) => write!(f, "{}", i),
            Type::Flt(x) => write!(f, "{}", x),
            Type::FunPtr(p) => write!(f, "{}", p),
            Type::Fun(func) => write!(f, "{}", func),
            Type::Rpc(r) => write!(f, "{}", r),
            Type::Oop(o) => write!(f, "{}", o),
            Type::Str(s) => write!(f, "{}", s),
            Type::Struct(s) => write!(f, "{}", s),
            Type::Tuple(t) => write!(f, "{}", t),
        }
    }
}
