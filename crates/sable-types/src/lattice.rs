//! Lattice operations on canonical types
//!
//! Meet is the only primitive; join is derived through the dual. Meet
//! orders its operands by [`Kind`](crate::Kind) and hands the pair to the
//! lower kind, so every unordered kind pair has exactly one owning rule and
//! delegation only flows towards higher kinds or strictly smaller operands.

use std::fmt;

use crate::error::TypeError;
use crate::kinds::{
    oop, simple, FltType, FunPtrType, FunType, IntType, NameType, NilType, OopType, RpcType,
    StrType, StructType, TupleType,
};
use crate::registry;
use crate::ty::{Type, TypeId};

impl TypeId {
    /// Structural complement: flips every center flag, recursively.
    pub fn dual(self) -> TypeId {
        if let Some(d) = registry::cached_dual(self) {
            return d;
        }
        let d = self.get().xdual(self);
        registry::record_dual(self, d);
        d
    }

    /// Greatest lower bound of `self` and `other`.
    ///
    /// Fails only with an internal [`TypeError::NoMeetRule`] when the pair
    /// mixes control with a value kind.
    pub fn meet(self, other: TypeId) -> Result<TypeId, TypeError> {
        if self == other {
            return Ok(self);
        }
        let (a, b) = (self.get(), other.get());
        if b.kind() < a.kind() {
            b.xmeet(other, self, &a)
        } else {
            a.xmeet(self, other, &b)
        }
    }

    /// Least upper bound, the dual of the meet of the duals.
    pub fn join(self, other: TypeId) -> Result<TypeId, TypeError> {
        self.dual().meet(other.dual()).map(TypeId::dual)
    }

    /// Whether `self` lies in its kind's top (choice) half
    pub fn above_center(self) -> bool {
        self.get().above_center()
    }

    /// Whether `self` denotes exactly one runtime value
    pub fn is_con(self) -> bool {
        self.get().is_con()
    }

    /// Whether a later refinement could still make `self` a constant
    pub fn may_be_con(self) -> bool {
        self.above_center()
    }

    /// Whether every value of `self` is also a value of `other`
    pub fn isa(self, other: TypeId) -> bool {
        self.meet(other) == Ok(other)
    }
}

impl Type {
    pub(crate) fn xdual(&self, self_id: TypeId) -> TypeId {
        match self {
            Type::Universal { any } => simple::universal(!any),
            Type::Scalar { any } => simple::scalar(!any),
            Type::Ctrl { any } => simple::ctrl(!any),
            Type::Nil(n) => n.xdual(),
            Type::Name(n) => n.xdual(),
            Type::Int(i) => i.xdual(),
            Type::Flt(x) => x.xdual(),
            Type::FunPtr(p) => p.xdual(),
            Type::Fun(func) => func.xdual(),
            Type::Rpc(r) => r.xdual(),
            Type::Oop(o) => OopType::make(!o.any),
            Type::Str(s) => s.xdual(self_id),
            Type::Struct(s) => s.xdual(),
            Type::Tuple(t) => t.xdual(),
        }
    }

    pub(crate) fn above_center(&self) -> bool {
        match self {
            Type::Universal { any } | Type::Scalar { any } | Type::Ctrl { any } => *any,
            Type::Nil(n) => n.above_center(),
            Type::Name(n) => n.inner.above_center(),
            Type::Int(i) => i.above_center(),
            Type::Flt(x) => x.above_center(),
            Type::FunPtr(p) => p.any,
            Type::Fun(func) => func.any,
            Type::Rpc(r) => r.any,
            Type::Oop(o) => o.any,
            Type::Str(s) => s.above_center(),
            Type::Struct(s) => s.any,
            Type::Tuple(t) => t.any,
        }
    }

    pub(crate) fn is_con(&self) -> bool {
        match self {
            Type::Int(i) => i.con.is_some(),
            Type::Flt(x) => x.con.is_some(),
            Type::Str(s) => s.con.is_some(),
            Type::Nil(n) => n.is_con(),
            Type::Name(n) => n.inner.is_con(),
            Type::FunPtr(p) => p.is_con(),
            Type::Rpc(r) => r.is_con(),
            Type::Tuple(t) => !t.any && t.elems.iter().all(|e| e.is_con()),
            Type::Struct(s) => {
                !s.any && !s.fields.is_empty() && s.fields.iter().all(|f| f.ty.is_con())
            }
            _ => false,
        }
    }

    /// Meet with `self` as the lower-ordered kind
    fn xmeet(&self, self_id: TypeId, other_id: TypeId, other: &Type) -> Result<TypeId, TypeError> {
        debug_assert!(self.kind() <= other.kind());
        match (self, other) {
            (Type::Universal { any }, _) => Ok(simple::meet_universal(*any, self_id, other_id)),
            (Type::Nil(n), _) => n.meet(self_id, other_id, other),
            (Type::Name(n), _) => n.meet(other_id, other),
            (Type::Scalar { any }, _) => simple::meet_scalar(*any, self_id, other_id, other),
            (Type::Ctrl { .. }, Type::Ctrl { .. }) => Ok(TypeId::CTRL),
            (Type::Int(a), Type::Int(b)) => Ok(a.meet(self_id, b, other_id)),
            (Type::Flt(a), Type::Flt(b)) => Ok(a.meet(self_id, b, other_id)),
            (Type::FunPtr(a), Type::FunPtr(b)) => Ok(a.meet(self_id, b, other_id)),
            (Type::Fun(a), Type::Fun(b)) => a.meet(b),
            (Type::Rpc(a), Type::Rpc(b)) => Ok(a.meet(self_id, b, other_id)),
            _ if self.kind().is_pointer_family() && other.kind().is_pointer_family() => {
                oop::meet_family(self_id, self, other_id, other)
            }
            _ if self.kind().is_scalar_like() && other.kind().is_scalar_like() => Ok(TypeId::SCALAR),
            _ => Err(TypeError::no_meet_rule(self_id, other_id)),
        }
    }
}

/// A lattice law that failed for some sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LawViolation {
    /// `meet(ty, ty) != ty`
    Idempotence {
        /// Offending type
        ty: TypeId,
    },
    /// `dual(dual(ty)) != ty`
    Involution {
        /// Offending type
        ty: TypeId,
        /// Its dual
        dual: TypeId,
        /// The dual of the dual
        back: TypeId,
    },
    /// `meet(a, b) != meet(b, a)`
    Commutativity {
        /// Left operand
        a: TypeId,
        /// Right operand
        b: TypeId,
    },
    /// `dual(meet(a, b)) != join(dual(a), dual(b))`
    JoinDuality {
        /// Left operand
        a: TypeId,
        /// Right operand
        b: TypeId,
    },
}

impl fmt::Display for LawViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LawViolation::Idempotence { ty } => write!(f, "meet of {} with itself is not {}", ty, ty),
            LawViolation::Involution { ty, dual, back } => {
                write!(f, "dual of {} is {} whose dual is {}", ty, dual, back)
            }
            LawViolation::Commutativity { a, b } => write!(f, "meet of {} and {} depends on order", a, b),
            LawViolation::JoinDuality { a, b } => {
                write!(f, "join of duals of {} and {} is not the dual of their meet", a, b)
            }
        }
    }
}

/// Check the lattice laws over `samples` and report every failure.
///
/// Pairs whose meet is an internal error count as agreeing when both
/// orders fail.
pub fn check_startup(samples: &[TypeId]) -> Vec<LawViolation> {
    let mut violations = Vec::new();

    for &ty in samples {
        if ty.meet(ty) != Ok(ty) {
            violations.push(LawViolation::Idempotence { ty });
        }
        let dual = ty.dual();
        let back = dual.dual();
        if back != ty {
            violations.push(LawViolation::Involution { ty, dual, back });
        }
    }

    for (i, &a) in samples.iter().enumerate() {
        for &b in &samples[i + 1..] {
            let ab = a.meet(b).ok();
            if ab != b.meet(a).ok() {
                violations.push(LawViolation::Commutativity { a, b });
            }
            if ab.map(TypeId::dual) != a.dual().join(b.dual()).ok() {
                violations.push(LawViolation::JoinDuality { a, b });
            }
        }
    }

    for violation in &violations {
        tracing::warn!(%violation, "lattice law violated");
    }
    tracing::debug!(
        samples = samples.len(),
        violations = violations.len(),
        "lattice self-check finished"
    );
    violations
}

/// A representative sample of every kind, closed under dual
pub fn standard_types() -> Vec<TypeId> {
    let point = StructType::make([("x", TypeId::INT64), ("y", TypeId::STR)], false);
    let base = [
        TypeId::ANY,
        TypeId::ALL,
        TypeId::SCALAR,
        TypeId::XSCALAR,
        TypeId::CTRL,
        TypeId::XCTRL,
        TypeId::NIL,
        TypeId::OOP,
        TypeId::XOOP,
        TypeId::STR,
        TypeId::XSTR,
        StrType::con("hello"),
        StrType::con("world"),
        TypeId::BOOL,
        TypeId::INT8,
        TypeId::INT32,
        TypeId::INT64,
        TypeId::XINT64,
        IntType::make(8, true),
        IntType::con(0),
        IntType::con(1),
        IntType::con(1000),
        IntType::con(-7),
        TypeId::FLT32,
        TypeId::FLT64,
        TypeId::XFLT64,
        FltType::con(1.5),
        FltType::con(0.1),
        FunPtrType::con(1),
        FunPtrType::make([1, 2], false),
        FunPtrType::make([1, 2], true),
        FunPtrType::make([2, 3], true),
        RpcType::con(4),
        RpcType::make([4, 5], true),
        FunType::make(vec![TypeId::INT64], TypeId::FLT64, false),
        TupleType::make(vec![TypeId::INT64, TypeId::STR], false),
        TupleType::make(vec![TypeId::INT64, TypeId::STR, TypeId::FLT64], false),
        point,
        StructType::make([("x", TypeId::FLT64)], false),
        NilType::nullable(TypeId::INT64, false),
        NilType::nullable(TypeId::XINT64, true),
        NameType::make("Point", point),
        NameType::make("Meters", TypeId::FLT64),
    ];

    let mut all: Vec<TypeId> = base.iter().flat_map(|&t| [t, t.dual()]).collect();
    all.sort_unstable();
    all.dedup();
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_of_pointer_bounds() {
        assert_eq!(TypeId::OOP.dual(), TypeId::XOOP);
        assert_eq!(TypeId::XOOP.dual(), TypeId::OOP);
        assert_eq!(TypeId::ANY.dual(), TypeId::ALL);
        assert_eq!(TypeId::NIL.dual(), TypeId::NIL);
    }

    #[test]
    fn test_meet_identity_shortcut() {
        assert_eq!(TypeId::CTRL.meet(TypeId::CTRL), Ok(TypeId::CTRL));
        assert_eq!(TypeId::OOP.meet(TypeId::XOOP), Ok(TypeId::OOP));
    }

    #[test]
    fn test_universal_bounds() {
        assert_eq!(TypeId::ANY.meet(TypeId::CTRL), Ok(TypeId::CTRL));
        assert_eq!(TypeId::STR.meet(TypeId::ALL), Ok(TypeId::ALL));
        assert_eq!(TypeId::ANY.join(TypeId::INT8), Ok(TypeId::ANY));
        assert_eq!(TypeId::ALL.join(TypeId::INT8), Ok(TypeId::INT8));
    }

    #[test]
    fn test_scalar_widening() {
        assert_eq!(TypeId::OOP.meet(TypeId::INT64), Ok(TypeId::SCALAR));
        assert_eq!(TypeId::FLT32.meet(FunPtrType::con(1)), Ok(TypeId::SCALAR));
        assert_eq!(TypeId::XSCALAR.meet(TypeId::STR), Ok(TypeId::STR));
    }

    #[test]
    fn test_ctrl_rules() {
        assert_eq!(TypeId::XCTRL.meet(TypeId::CTRL), Ok(TypeId::CTRL));
        let err = TypeId::CTRL.meet(TypeId::INT64).unwrap_err();
        assert!(err.is_internal());
        assert!(TypeId::SCALAR.meet(TypeId::XCTRL).is_err());
    }

    #[test]
    fn test_join() {
        assert_eq!(TypeId::INT8.join(TypeId::INT32), Ok(TypeId::INT8));
        assert_eq!(TypeId::OOP.join(TypeId::STR), Ok(TypeId::STR));
        assert_eq!(TypeId::STR.join(TypeId::INT64), Ok(TypeId::XSCALAR));
    }

    #[test]
    fn test_center_predicates() {
        assert!(TypeId::XOOP.above_center());
        assert!(!TypeId::OOP.above_center());
        assert!(TypeId::XINT64.may_be_con());
        assert!(IntType::con(4).is_con());
        assert!(!TypeId::INT64.is_con());
        assert!(TypeId::NIL.is_con());
        assert!(!TypeId::NIL.above_center());

        let pair = TupleType::make(vec![IntType::con(1), StrType::con("a")], false);
        assert!(pair.is_con());
        let loose = TupleType::make(vec![IntType::con(1), TypeId::STR], false);
        assert!(!loose.is_con());
    }

    #[test]
    fn test_struct_constants_need_fields() {
        let x = StructType::make([("x", IntType::con(1))], false);
        let y = StructType::make([("y", IntType::con(2))], false);
        assert!(x.is_con());

        let shared = x.meet(y).unwrap();
        assert_eq!(shared, StructType::make(Vec::<(&str, TypeId)>::new(), false));
        assert!(!shared.is_con());
        assert!(!shared.above_center());
    }

    #[test]
    fn test_name_predicates_follow_inner() {
        let named = NameType::make("Mode", IntType::con(2));
        assert!(named.is_con());
        assert!(NameType::make("Any", TypeId::XSTR).above_center());
    }

    #[test]
    fn test_isa() {
        assert!(TypeId::INT8.isa(TypeId::INT64));
        assert!(!TypeId::INT64.isa(TypeId::INT8));
        assert!(StrType::con("x").isa(TypeId::OOP));
        assert!(!TypeId::CTRL.isa(TypeId::INT8));
    }

    #[test]
    fn test_standard_types_closed_under_dual() {
        let samples = standard_types();
        for &t in &samples {
            assert!(samples.contains(&t.dual()), "{} has no dual in the sample", t);
        }
    }

    #[test]
    fn test_startup_check_passes() {
        let violations = check_startup(&standard_types());
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_violation_display() {
        let v = LawViolation::Commutativity {
            a: TypeId::INT8,
            b: TypeId::STR,
        };
        assert_eq!(v.to_string(), "meet of int8 and str depends on order");
    }
}
