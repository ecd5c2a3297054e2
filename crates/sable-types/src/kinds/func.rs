//! Code-address kinds: function pointers, return addresses and signatures

use std::fmt;

use sable_util::SortedSet;

use crate::error::TypeError;
use crate::registry;
use crate::ty::{Type, TypeId};

/// Result of meeting two index sets
enum SetMeet {
    Left,
    Right,
    Set(SortedSet<u32>, bool),
}

/// Tops narrow by intersection, bottoms widen by union, and every bottom
/// lies below every top.
fn meet_sets(a: &SortedSet<u32>, a_any: bool, b: &SortedSet<u32>, b_any: bool) -> SetMeet {
    match (a_any, b_any) {
        (true, true) => SetMeet::Set(a.intersection(b), true),
        (false, false) => SetMeet::Set(a.union(b), false),
        (true, false) => SetMeet::Right,
        (false, true) => SetMeet::Left,
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, sigil: &str, any: bool, set: &SortedSet<u32>) -> fmt::Result {
    if any {
        write!(f, "~")?;
    }
    write!(f, "{}{}", sigil, set)
}

/// Set of function indices a pointer may refer to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunPtrType {
    pub(crate) any: bool,
    pub(crate) fidxs: SortedSet<u32>,
}

impl FunPtrType {
    /// Pointer to any of `fidxs` (or, on the top half, a choice among them)
    pub fn make<I: IntoIterator<Item = u32>>(fidxs: I, any: bool) -> TypeId {
        registry::intern(Type::FunPtr(FunPtrType {
            any,
            fidxs: fidxs.into_iter().collect(),
        }))
    }

    /// Pointer to exactly one function
    pub fn con(fidx: u32) -> TypeId {
        FunPtrType::make([fidx], false)
    }

    /// Function indices
    pub fn fidxs(&self) -> &SortedSet<u32> {
        &self.fidxs
    }

    pub(crate) fn is_con(&self) -> bool {
        !self.any && self.fidxs.len() == 1
    }

    pub(crate) fn xdual(&self) -> TypeId {
        registry::intern(Type::FunPtr(FunPtrType {
            any: !self.any,
            fidxs: self.fidxs.clone(),
        }))
    }

    pub(crate) fn meet(&self, self_id: TypeId, other: &FunPtrType, other_id: TypeId) -> TypeId {
        match meet_sets(&self.fidxs, self.any, &other.fidxs, other.any) {
            SetMeet::Left => self_id,
            SetMeet::Right => other_id,
            SetMeet::Set(fidxs, any) => registry::intern(Type::FunPtr(FunPtrType { any, fidxs })),
        }
    }
}

impl fmt::Display for FunPtrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_set(f, "*", self.any, &self.fidxs)
    }
}

/// Set of return-point indices
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RpcType {
    pub(crate) any: bool,
    pub(crate) rpcs: SortedSet<u32>,
}

impl RpcType {
    /// Return address among `rpcs`
    pub fn make<I: IntoIterator<Item = u32>>(rpcs: I, any: bool) -> TypeId {
        registry::intern(Type::Rpc(RpcType {
            any,
            rpcs: rpcs.into_iter().collect(),
        }))
    }

    /// Exactly one return point
    pub fn con(rpc: u32) -> TypeId {
        RpcType::make([rpc], false)
    }

    /// Return-point indices
    pub fn rpcs(&self) -> &SortedSet<u32> {
        &self.rpcs
    }

    pub(crate) fn is_con(&self) -> bool {
        !self.any && self.rpcs.len() == 1
    }

    pub(crate) fn xdual(&self) -> TypeId {
        registry::intern(Type::Rpc(RpcType {
            any: !self.any,
            rpcs: self.rpcs.clone(),
        }))
    }

    pub(crate) fn meet(&self, self_id: TypeId, other: &RpcType, other_id: TypeId) -> TypeId {
        match meet_sets(&self.rpcs, self.any, &other.rpcs, other.any) {
            SetMeet::Left => self_id,
            SetMeet::Right => other_id,
            SetMeet::Set(rpcs, any) => registry::intern(Type::Rpc(RpcType { any, rpcs })),
        }
    }
}

impl fmt::Display for RpcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_set(f, "#", self.any, &self.rpcs)
    }
}

/// Function signature: argument types and a return type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunType {
    pub(crate) any: bool,
    pub(crate) args: Vec<TypeId>,
    pub(crate) ret: TypeId,
}

impl FunType {
    /// Signature `(args) -> ret`
    pub fn make(args: Vec<TypeId>, ret: TypeId, any: bool) -> TypeId {
        registry::intern(Type::Fun(FunType { any, args, ret }))
    }

    /// Argument types
    pub fn args(&self) -> &[TypeId] {
        &self.args
    }

    /// Return type
    pub fn ret(&self) -> TypeId {
        self.ret
    }

    pub(crate) fn xdual(&self) -> TypeId {
        let args = self.args.iter().map(|a| a.dual()).collect();
        FunType::make(args, self.ret.dual(), !self.any)
    }

    /// Arguments are contravariant: they join while the return type meets.
    /// Signatures of different arity only share `SCALAR`.
    pub(crate) fn meet(&self, other: &FunType) -> Result<TypeId, TypeError> {
        if self.args.len() != other.args.len() {
            return Ok(TypeId::SCALAR);
        }
        let args = self
            .args
            .iter()
            .zip(&other.args)
            .map(|(a, b)| a.join(*b))
            .collect::<Result<Vec<_>, _>>()?;
        let ret = self.ret.meet(other.ret)?;
        Ok(FunType::make(args, ret, self.any && other.any))
    }
}

impl fmt::Display for FunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.any {
            write!(f, "~")?;
        }
        write!(f, "{{")?;
        for arg in &self.args {
            write!(f, "{} ", arg)?;
        }
        write!(f, "-> {}}}", self.ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funptr_display() {
        assert_eq!(FunPtrType::make([3, 1], false).to_string(), "*[1,3]");
        assert_eq!(FunPtrType::make([2], true).to_string(), "~*[2]");
        assert_eq!(RpcType::con(2).to_string(), "#[2]");
    }

    #[test]
    fn test_funptr_constants() {
        let one = FunPtrType::con(1);
        assert!(one.is_con());
        assert!(!FunPtrType::make([1, 2], false).is_con());
        assert!(!FunPtrType::make([1], true).is_con());
    }

    #[test]
    fn test_funptr_bottoms_union() {
        let a = FunPtrType::con(1);
        let b = FunPtrType::con(3);
        assert_eq!(a.meet(b), Ok(FunPtrType::make([1, 3], false)));
    }

    #[test]
    fn test_funptr_tops_intersect() {
        let a = FunPtrType::make([1, 2], true);
        let b = FunPtrType::make([2, 3], true);
        assert_eq!(a.meet(b), Ok(FunPtrType::make([2], true)));
    }

    #[test]
    fn test_funptr_mixed_takes_bottom() {
        let top = FunPtrType::make([1, 2], true);
        let bottom = FunPtrType::con(7);
        assert_eq!(top.meet(bottom), Ok(bottom));
        assert_eq!(bottom.meet(top), Ok(bottom));
    }

    #[test]
    fn test_funptr_dual_flips_half() {
        let a = FunPtrType::make([1, 2], false);
        assert_eq!(a.dual(), FunPtrType::make([1, 2], true));
        assert_eq!(a.dual().dual(), a);
    }

    #[test]
    fn test_rpc_meet() {
        assert_eq!(RpcType::con(4).meet(RpcType::con(5)), Ok(RpcType::make([4, 5], false)));
        assert_eq!(RpcType::con(4).meet(TypeId::INT8), Ok(TypeId::SCALAR));
    }

    #[test]
    fn test_fun_display() {
        let f = FunType::make(vec![TypeId::INT64, TypeId::STR], TypeId::FLT64, false);
        assert_eq!(f.to_string(), "{int64 str -> flt64}");
        let g = FunType::make(vec![], TypeId::NIL, true);
        assert_eq!(g.to_string(), "~{-> nil}");
    }

    #[test]
    fn test_fun_args_join_ret_meets() {
        let f = FunType::make(vec![TypeId::INT8], TypeId::INT8, false);
        let g = FunType::make(vec![TypeId::INT32], TypeId::INT32, false);
        let expected = FunType::make(vec![TypeId::INT8], TypeId::INT32, false);
        assert_eq!(f.meet(g), Ok(expected));
        assert_eq!(g.meet(f), Ok(expected));
    }

    #[test]
    fn test_fun_arity_mismatch() {
        let f = FunType::make(vec![TypeId::INT8], TypeId::INT8, false);
        let g = FunType::make(vec![], TypeId::INT8, false);
        assert_eq!(f.meet(g), Ok(TypeId::SCALAR));
    }

    #[test]
    fn test_fun_dual() {
        let f = FunType::make(vec![TypeId::INT64], TypeId::STR, false);
        let d = FunType::make(vec![TypeId::XINT64], TypeId::XSTR, true);
        assert_eq!(f.dual(), d);
        assert_eq!(d.dual(), f);
    }
}
