//! Canonical registry: hash-consing of type values
//!
//! There is exactly one registry per process. Every kind factory routes its
//! candidate through [`intern`], which returns the existing handle for a
//! structurally equal type or registers the candidate as canonical.
//! Entries are never removed; the number of distinct types in one program
//! is small and bounded.
//!
//! Interning takes the write lock for a single lookup-or-insert step.
//! Resolution takes the read lock only long enough to clone an `Arc`, so
//! lattice operations never hold the lock while they recurse.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::kinds::{FltType, IntType, NilType, OopType, StrType};
use crate::limits::{INITIAL_REGISTRY_CAPACITY, MAX_TYPE_INDEX};
use crate::ty::{Type, TypeId};

static REGISTRY: Lazy<RwLock<TypeRegistry>> = Lazy::new(|| RwLock::new(TypeRegistry::new()));

/// Counters describing the registry's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of canonical types
    pub types: usize,
    /// Intern requests answered by an existing type
    pub hits: u64,
    /// Intern requests that registered a new type
    pub misses: u64,
    /// Number of types whose dual is cached
    pub duals: usize,
}

/// Storage for every canonical type, indexed by `TypeId`
#[derive(Debug)]
struct TypeRegistry {
    /// Canonical values, indexed by TypeId
    types: Vec<Arc<Type>>,

    /// Reverse mapping from structure to handle
    type_to_id: FxHashMap<Arc<Type>, TypeId>,

    /// Dual of each type whose dual has been requested
    duals: FxHashMap<TypeId, TypeId>,

    hits: u64,
    misses: u64,
}

impl TypeRegistry {
    fn new() -> Self {
        let mut reg = TypeRegistry {
            types: Vec::with_capacity(INITIAL_REGISTRY_CAPACITY),
            type_to_id: FxHashMap::with_capacity_and_hasher(
                INITIAL_REGISTRY_CAPACITY,
                Default::default(),
            ),
            duals: FxHashMap::default(),
            hits: 0,
            misses: 0,
        };

        // Pre-intern the well-known types; order must match the TypeId consts
        let well_known = [
            (TypeId::ANY, Type::Universal { any: true }),
            (TypeId::ALL, Type::Universal { any: false }),
            (TypeId::SCALAR, Type::Scalar { any: false }),
            (TypeId::XSCALAR, Type::Scalar { any: true }),
            (TypeId::CTRL, Type::Ctrl { any: false }),
            (TypeId::XCTRL, Type::Ctrl { any: true }),
            (TypeId::NIL, Type::Nil(NilType::raw(None, false))),
            (TypeId::OOP, Type::Oop(OopType::raw(false))),
            (TypeId::XOOP, Type::Oop(OopType::raw(true))),
            (TypeId::STR, Type::Str(StrType::raw(false, None))),
            (TypeId::XSTR, Type::Str(StrType::raw(true, None))),
            (TypeId::BOOL, Type::Int(IntType::raw(false, 1, None))),
            (TypeId::INT8, Type::Int(IntType::raw(false, 8, None))),
            (TypeId::INT32, Type::Int(IntType::raw(false, 32, None))),
            (TypeId::INT64, Type::Int(IntType::raw(false, 64, None))),
            (TypeId::XINT64, Type::Int(IntType::raw(true, 64, None))),
            (TypeId::FLT32, Type::Flt(FltType::raw(false, 32, None))),
            (TypeId::FLT64, Type::Flt(FltType::raw(false, 64, None))),
            (TypeId::XFLT64, Type::Flt(FltType::raw(true, 64, None))),
        ];
        for (expected, ty) in well_known {
            let id = reg.intern(ty);
            debug_assert_eq!(id, expected, "well-known type interned out of order");
        }

        // Seed the duals that are already known
        let pairs = [
            (TypeId::ANY, TypeId::ALL),
            (TypeId::SCALAR, TypeId::XSCALAR),
            (TypeId::CTRL, TypeId::XCTRL),
            (TypeId::NIL, TypeId::NIL),
            (TypeId::OOP, TypeId::XOOP),
            (TypeId::STR, TypeId::XSTR),
            (TypeId::INT64, TypeId::XINT64),
            (TypeId::FLT64, TypeId::XFLT64),
        ];
        for (a, b) in pairs {
            reg.record_dual(a, b);
        }

        reg
    }

    /// Intern a type, returning its TypeId
    ///
    /// If the type already exists, returns the existing TypeId and drops the
    /// candidate. Otherwise, allocates a new TypeId and stores the type.
    fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.type_to_id.get(&ty) {
            self.hits += 1;
            return id;
        }

        // Handles are 32 bits wide, so the arena never grows past MAX_TYPE_INDEX
        let index = u32::try_from(self.types.len());
        debug_assert!(index.is_ok(), "type registry exceeded {} entries", MAX_TYPE_INDEX);
        let id = TypeId(index.unwrap_or(MAX_TYPE_INDEX));
        let kind = ty.kind();
        let ty = Arc::new(ty);
        self.types.push(Arc::clone(&ty));
        self.type_to_id.insert(ty, id);
        self.misses += 1;
        tracing::trace!(id = id.0, %kind, "interned new canonical type");
        id
    }

    fn get(&self, id: TypeId) -> Arc<Type> {
        // Handles are only minted by `intern` and never invalidated
        Arc::clone(&self.types[id.0 as usize])
    }

    fn record_dual(&mut self, a: TypeId, b: TypeId) {
        self.duals.insert(a, b);
        self.duals.insert(b, a);
    }
}

/// Return the canonical handle for `ty`, registering it if new.
pub fn intern(ty: Type) -> TypeId {
    REGISTRY.write().intern(ty)
}

/// Resolve a handle to its structural value.
pub fn get(id: TypeId) -> Arc<Type> {
    REGISTRY.read().get(id)
}

/// Look up a type's handle without interning.
pub fn lookup(ty: &Type) -> Option<TypeId> {
    REGISTRY.read().type_to_id.get(ty).copied()
}

/// Number of canonical types registered so far.
pub fn len() -> usize {
    REGISTRY.read().types.len()
}

/// Snapshot of the registry counters.
pub fn stats() -> RegistryStats {
    let reg = REGISTRY.read();
    RegistryStats {
        types: reg.types.len(),
        hits: reg.hits,
        misses: reg.misses,
        duals: reg.duals.len(),
    }
}

pub(crate) fn cached_dual(id: TypeId) -> Option<TypeId> {
    REGISTRY.read().duals.get(&id).copied()
}

pub(crate) fn record_dual(a: TypeId, b: TypeId) {
    tracing::debug!(a = a.0, b = b.0, "cached dual pair");
    REGISTRY.write().record_dual(a, b);
}
