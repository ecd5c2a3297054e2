//! Lattice and conversion errors

use thiserror::Error;

use crate::ty::{Kind, TypeId};

/// Errors produced by lattice operations and the bit-shape classifier
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// Two kinds were combined that have no meet rule.
    ///
    /// This is a defect in whoever built the operands, never a user error.
    #[error("internal lattice error: no meet rule for {left} ({left_kind}) and {right} ({right_kind})")]
    NoMeetRule {
        /// Rendering of the lower-ordered operand
        left: String,
        /// Kind of the lower-ordered operand
        left_kind: Kind,
        /// Rendering of the higher-ordered operand
        right: String,
        /// Kind of the higher-ordered operand
        right_kind: Kind,
    },

    /// No legal representation conversion exists between two types
    #[error("cannot convert {from} to {to}")]
    IncompatibleConversion {
        /// Source type
        from: String,
        /// Target type
        to: String,
    },
}

impl TypeError {
    pub(crate) fn no_meet_rule(left: TypeId, right: TypeId) -> Self {
        let err = TypeError::NoMeetRule {
            left: left.to_string(),
            left_kind: left.kind(),
            right: right.to_string(),
            right_kind: right.kind(),
        };
        tracing::warn!(%err, "lattice operands have no meet rule");
        err
    }

    pub(crate) fn incompatible(from: TypeId, to: TypeId) -> Self {
        TypeError::IncompatibleConversion {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Whether this error is a compiler defect rather than a user type error
    pub fn is_internal(&self) -> bool {
        matches!(self, TypeError::NoMeetRule { .. })
    }
}
