//! Kinds carrying only the center flag: universal, machine scalar, control

use crate::error::TypeError;
use crate::ty::{Type, TypeId};

/// `ANY` when `any` is set, otherwise `ALL`
pub fn universal(any: bool) -> TypeId {
    if any {
        TypeId::ANY
    } else {
        TypeId::ALL
    }
}

/// `XSCALAR` when `any` is set, otherwise `SCALAR`
pub fn scalar(any: bool) -> TypeId {
    if any {
        TypeId::XSCALAR
    } else {
        TypeId::SCALAR
    }
}

/// `XCTRL` when `any` is set, otherwise `CTRL`
pub fn ctrl(any: bool) -> TypeId {
    if any {
        TypeId::XCTRL
    } else {
        TypeId::CTRL
    }
}

/// `ANY` is the identity of meet and `ALL` absorbs everything.
pub(crate) fn meet_universal(any: bool, self_id: TypeId, other_id: TypeId) -> TypeId {
    if any {
        other_id
    } else {
        self_id
    }
}

/// `XSCALAR` is the identity and `SCALAR` absorbs every value kind.
/// Control never meets a scalar.
pub(crate) fn meet_scalar(
    any: bool,
    self_id: TypeId,
    other_id: TypeId,
    other: &Type,
) -> Result<TypeId, TypeError> {
    match other {
        Type::Ctrl { .. } => Err(TypeError::no_meet_rule(self_id, other_id)),
        _ => Ok(if any { other_id } else { TypeId::SCALAR }),
    }
}
