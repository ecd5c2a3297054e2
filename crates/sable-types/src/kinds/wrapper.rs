//! Delegating wrapper kinds: nil/nullable and named types
//!
//! Both wrappers sort before every kind they can wrap, so in any pair that
//! involves a wrapper the wrapper's rule decides. Each rule unwraps and
//! re-enters [`TypeId::meet`] on strictly smaller operands.

use std::fmt;
use std::sync::Arc;

use crate::error::TypeError;
use crate::registry;
use crate::ty::{Type, TypeId};

/// The nil constant (`inner == None`) or a nullable wrapper `T?`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NilType {
    pub(crate) inner: Option<TypeId>,
    pub(crate) any: bool,
}

impl NilType {
    pub(crate) const fn raw(inner: Option<TypeId>, any: bool) -> Self {
        NilType { inner, any }
    }

    /// `inner` or nil.
    ///
    /// Types that already admit nil (pointers, scalars, nil itself, the
    /// universal values and names over any of those) are returned as-is.
    pub fn nullable(inner: TypeId, any: bool) -> TypeId {
        let inner_ty = registry::get(inner);
        if matches!(*inner_ty, Type::Universal { .. }) || absorbs_nil(&inner_ty) {
            return inner;
        }
        registry::intern(Type::Nil(NilType::raw(Some(inner), any)))
    }

    /// Wrapped type, or `None` for the nil constant
    pub fn inner(&self) -> Option<TypeId> {
        self.inner
    }

    /// Whether this is the nil constant itself
    pub fn is_nil(&self) -> bool {
        self.inner.is_none()
    }

    pub(crate) fn above_center(&self) -> bool {
        self.inner.is_some() && self.any
    }

    pub(crate) fn is_con(&self) -> bool {
        self.inner.is_none()
    }

    pub(crate) fn xdual(&self) -> TypeId {
        match self.inner {
            None => TypeId::NIL,
            Some(inner) => NilType::nullable(inner.dual(), !self.any),
        }
    }

    /// Nil joins the value set of a non-pointer operand, so `NIL ⊓ T` is
    /// `T?`. Pointers already hold nil and only share `OOP` with it; names
    /// on the other side are stripped first. A nullable meets through its
    /// inner type and keeps the top half only when both sides are top.
    pub(crate) fn meet(
        &self,
        self_id: TypeId,
        other_id: TypeId,
        other: &Type,
    ) -> Result<TypeId, TypeError> {
        match other {
            Type::Ctrl { .. } => return Err(TypeError::no_meet_rule(self_id, other_id)),
            Type::Name(n) => return self_id.meet(n.inner),
            _ => {}
        }

        match (self.inner, other) {
            (None, Type::Nil(NilType { inner: Some(y), .. })) => Ok(NilType::nullable(*y, false)),
            (None, Type::Scalar { any }) => Ok(if *any { TypeId::NIL } else { TypeId::SCALAR }),
            (None, _) if other.kind().is_pointer_family() => Ok(TypeId::OOP),
            (None, _) => Ok(NilType::nullable(other_id, false)),
            (Some(x), Type::Nil(NilType { inner: None, .. })) => Ok(NilType::nullable(x, false)),
            (Some(x), Type::Nil(NilType { inner: Some(y), any })) => {
                Ok(NilType::nullable(x.meet(*y)?, self.any && *any))
            }
            (Some(x), _) => Ok(NilType::nullable(
                x.meet(other_id)?,
                self.any && other_id.above_center(),
            )),
        }
    }
}

/// Types whose values already include nil
fn absorbs_nil(ty: &Type) -> bool {
    match ty {
        Type::Scalar { .. } | Type::Nil(_) => true,
        Type::Name(n) => absorbs_nil(&registry::get(n.inner)),
        other => other.kind().is_pointer_family(),
    }
}

impl fmt::Display for NilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            None => write!(f, "nil"),
            Some(inner) if self.any => write!(f, "~({})?", inner),
            Some(inner) => write!(f, "{}?", inner),
        }
    }
}

/// A named (nominal) wrapper around another type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameType {
    pub(crate) name: Arc<str>,
    pub(crate) inner: TypeId,
}

impl NameType {
    /// Name `inner` as `name`
    pub fn make(name: &str, inner: TypeId) -> TypeId {
        registry::intern(Type::Name(NameType {
            name: Arc::from(name),
            inner,
        }))
    }

    /// The type's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped type
    pub fn inner(&self) -> TypeId {
        self.inner
    }

    fn with_inner(&self, inner: TypeId) -> TypeId {
        registry::intern(Type::Name(NameType {
            name: Arc::clone(&self.name),
            inner,
        }))
    }

    pub(crate) fn xdual(&self) -> TypeId {
        self.with_inner(self.inner.dual())
    }

    /// Same names meet under the name; anything else strips it.
    pub(crate) fn meet(&self, other_id: TypeId, other: &Type) -> Result<TypeId, TypeError> {
        match other {
            Type::Name(o) if o.name == self.name => Ok(self.with_inner(self.inner.meet(o.inner)?)),
            Type::Name(o) => self.inner.meet(o.inner),
            _ => self.inner.meet(other_id),
        }
    }
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.inner)
    }
}
