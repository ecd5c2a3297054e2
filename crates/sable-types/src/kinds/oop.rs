//! The nullable heap-pointer family
//!
//! `OOP`/`XOOP` bound the family: `XOOP` is the identity of meet within it
//! and `OOP` absorbs every member. Strings, structs and tuples each meet
//! among themselves; two different sub-kinds only share `OOP`.

use std::fmt;
use std::sync::Arc;

use sable_util::merge::{try_intersection_by, try_union_by};

use crate::error::TypeError;
use crate::registry;
use crate::ty::{Type, TypeId};

/// Generic nullable pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OopType {
    pub(crate) any: bool,
}

impl OopType {
    pub(crate) const fn raw(any: bool) -> Self {
        OopType { any }
    }

    /// `XOOP` when `any` is set, otherwise `OOP`
    pub fn make(any: bool) -> TypeId {
        if any {
            TypeId::XOOP
        } else {
            TypeId::OOP
        }
    }
}

impl fmt::Display for OopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.any { "~oop" } else { "oop" })
    }
}

/// String range or string constant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrType {
    pub(crate) any: bool,
    pub(crate) con: Option<Arc<str>>,
}

impl StrType {
    pub(crate) const fn raw(any: bool, con: Option<Arc<str>>) -> Self {
        StrType { any, con }
    }

    /// `XSTR` when `any` is set, otherwise `STR`
    pub fn make(any: bool) -> TypeId {
        if any {
            TypeId::XSTR
        } else {
            TypeId::STR
        }
    }

    /// String constant
    pub fn con(value: &str) -> TypeId {
        registry::intern(Type::Str(StrType::raw(false, Some(Arc::from(value)))))
    }

    /// Constant value, if any
    pub fn constant(&self) -> Option<&str> {
        self.con.as_deref()
    }

    pub(crate) fn above_center(&self) -> bool {
        self.con.is_none() && self.any
    }

    pub(crate) fn xdual(&self, self_id: TypeId) -> TypeId {
        match self.con {
            Some(_) => self_id,
            None => StrType::make(!self.any),
        }
    }

    fn meet(&self, self_id: TypeId, other: &StrType, other_id: TypeId) -> TypeId {
        match (&self.con, &other.con) {
            (Some(a), Some(b)) if a == b => self_id,
            (Some(_), None) if other.any => self_id,
            (None, Some(_)) if self.any => other_id,
            _ => TypeId::STR,
        }
    }
}

impl fmt::Display for StrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.con {
            Some(s) => write!(f, "{:?}", s),
            None => f.write_str(if self.any { "~str" } else { "str" }),
        }
    }
}

/// A named struct field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub(crate) name: Arc<str>,
    pub(crate) ty: TypeId,
}

impl Field {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type
    pub fn ty(&self) -> TypeId {
        self.ty
    }
}

/// Struct with fields kept sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    pub(crate) any: bool,
    pub(crate) fields: Vec<Field>,
}

impl StructType {
    /// Struct over `(name, type)` pairs. On repeated names the first
    /// occurrence wins.
    pub fn make<'a, I>(fields: I, any: bool) -> TypeId
    where
        I: IntoIterator<Item = (&'a str, TypeId)>,
    {
        let mut fields: Vec<Field> = fields
            .into_iter()
            .map(|(name, ty)| Field {
                name: Arc::from(name),
                ty,
            })
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields.dedup_by(|later, earlier| later.name == earlier.name);
        StructType::from_fields(fields, any)
    }

    fn from_fields(fields: Vec<Field>, any: bool) -> TypeId {
        registry::intern(Type::Struct(StructType { any, fields }))
    }

    /// Fields in name order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Type of the field called `name`
    pub fn field(&self, name: &str) -> Option<TypeId> {
        self.fields
            .binary_search_by(|f| f.name.as_ref().cmp(name))
            .ok()
            .map(|i| self.fields[i].ty)
    }

    pub(crate) fn xdual(&self) -> TypeId {
        let fields = self
            .fields
            .iter()
            .map(|f| Field {
                name: Arc::clone(&f.name),
                ty: f.ty.dual(),
            })
            .collect();
        StructType::from_fields(fields, !self.any)
    }

    /// Two tops keep every field; two bottoms keep the shared ones. Shared
    /// fields meet. A top against a bottom yields the bottom.
    fn meet(&self, self_id: TypeId, other: &StructType, other_id: TypeId) -> Result<TypeId, TypeError> {
        let by_name = |a: &Field, b: &Field| a.name.cmp(&b.name);
        let combine = |a: &Field, b: &Field| -> Result<Field, TypeError> {
            Ok(Field {
                name: Arc::clone(&a.name),
                ty: a.ty.meet(b.ty)?,
            })
        };
        match (self.any, other.any) {
            (true, true) => {
                let fields = try_union_by(&self.fields, &other.fields, by_name, combine)?;
                Ok(StructType::from_fields(fields, true))
            }
            (false, false) => {
                let fields = try_intersection_by(&self.fields, &other.fields, by_name, combine)?;
                Ok(StructType::from_fields(fields, false))
            }
            (true, false) => Ok(other_id),
            (false, true) => Ok(self_id),
        }
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.any {
            write!(f, "~")?;
        }
        write!(f, "@{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}:{}", field.name, field.ty)?;
        }
        write!(f, "}}")
    }
}

/// Fixed-arity tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleType {
    pub(crate) any: bool,
    pub(crate) elems: Vec<TypeId>,
}

impl TupleType {
    pub(crate) fn raw(any: bool, elems: Vec<TypeId>) -> Self {
        TupleType { any, elems }
    }

    /// Tuple of `elems`
    pub fn make(elems: Vec<TypeId>, any: bool) -> TypeId {
        registry::intern(Type::Tuple(TupleType::raw(any, elems)))
    }

    /// Element types
    pub fn elems(&self) -> &[TypeId] {
        &self.elems
    }

    pub(crate) fn xdual(&self) -> TypeId {
        TupleType::make(self.elems.iter().map(|e| e.dual()).collect(), !self.any)
    }

    fn meet(&self, other: &TupleType) -> Result<TypeId, TypeError> {
        if self.elems.len() != other.elems.len() {
            return Ok(TypeId::OOP);
        }
        let elems = self
            .elems
            .iter()
            .zip(&other.elems)
            .map(|(a, b)| a.meet(*b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TupleType::make(elems, self.any && other.any))
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.any {
            write!(f, "~")?;
        }
        write!(f, "(")?;
        for (i, elem) in self.elems.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, ")")
    }
}

/// Meet two members of the pointer family, `lo` being the lower kind.
pub(crate) fn meet_family(
    lo_id: TypeId,
    lo: &Type,
    hi_id: TypeId,
    hi: &Type,
) -> Result<TypeId, TypeError> {
    match (lo, hi) {
        (Type::Oop(o), _) => Ok(if o.any { hi_id } else { TypeId::OOP }),
        (Type::Str(a), Type::Str(b)) => Ok(a.meet(lo_id, b, hi_id)),
        (Type::Struct(a), Type::Struct(b)) => a.meet(lo_id, b, hi_id),
        (Type::Tuple(a), Type::Tuple(b)) => a.meet(b),
        _ => Ok(TypeId::OOP),
    }
}
