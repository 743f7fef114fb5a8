//! Type interning.
//!
//! Every `TypeData` is stored once; the returned `TypeId` is its index in an
//! insertion-ordered set. Intrinsics are pre-interned so the `TypeId`
//! constants are valid in every interner.

use crate::def::DefId;
use crate::types::{AnnotatedType, IntrinsicKind, TupleElement, TypeData, TypeId};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, RwLock};
use xtc_common::{Atom, Interner};

pub struct TypeInterner {
    types: RwLock<IndexSet<TypeData, FxBuildHasher>>,
    names: Arc<Interner>,
}

impl TypeInterner {
    pub fn new(names: Arc<Interner>) -> Self {
        let mut types = IndexSet::with_hasher(FxBuildHasher);
        types.insert(TypeData::Error {
            name: Atom::NONE,
            args: Vec::new(),
        });
        for kind in IntrinsicKind::ALL {
            types.insert(TypeData::Intrinsic(kind));
        }
        debug_assert_eq!(types.len() as u32, TypeId::FIRST_USER);
        TypeInterner {
            types: RwLock::new(types),
            names,
        }
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        {
            let types = self.types.read().unwrap_or_else(|e| e.into_inner());
            if let Some(index) = types.get_index_of(&data) {
                return TypeId(index as u32);
            }
        }
        let mut types = self.types.write().unwrap_or_else(|e| e.into_inner());
        let (index, _) = types.insert_full(data);
        TypeId(index as u32)
    }

    /// Structure of `id`. Unknown ids read as the anonymous error type.
    pub fn lookup(&self, id: TypeId) -> TypeData {
        let types = self.types.read().unwrap_or_else(|e| e.into_inner());
        types
            .get_index(id.0 as usize)
            .cloned()
            .unwrap_or(TypeData::Error {
                name: Atom::NONE,
                args: Vec::new(),
            })
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Names
    // =========================================================================

    pub fn names(&self) -> &Arc<Interner> {
        &self.names
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.names.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.names.resolve(atom)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn intrinsic(&self, kind: IntrinsicKind) -> TypeId {
        self.intern(TypeData::Intrinsic(kind))
    }

    pub fn named(&self, def: DefId, args: Vec<AnnotatedType>) -> TypeId {
        self.intern(TypeData::Named { def, args })
    }

    pub fn type_param(&self, owner: DefId, index: u32, name: Atom) -> TypeId {
        self.intern(TypeData::TypeParameter { owner, index, name })
    }

    pub fn array(&self, element: AnnotatedType, rank: u32) -> TypeId {
        self.intern(TypeData::Array { element, rank })
    }

    pub fn tuple(&self, elements: Vec<TupleElement>) -> TypeId {
        self.intern(TypeData::Tuple(elements))
    }

    pub fn nullable_value(&self, underlying: TypeId) -> TypeId {
        self.intern(TypeData::NullableValue(underlying))
    }

    pub fn pointer(&self, pointee: TypeId) -> TypeId {
        self.intern(TypeData::Pointer(pointee))
    }

    pub fn function_pointer(&self, parameters: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.intern(TypeData::FunctionPointer {
            parameters,
            return_type,
        })
    }

    pub fn by_ref(&self, referent: TypeId) -> TypeId {
        self.intern(TypeData::ByRef(referent))
    }

    pub fn error(&self, name: Atom, args: Vec<AnnotatedType>) -> TypeId {
        self.intern(TypeData::Error { name, args })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_error(&self, id: TypeId) -> bool {
        matches!(self.lookup(id), TypeData::Error { .. })
    }

    /// The definition of a named type, if `id` is one.
    pub fn named_def(&self, id: TypeId) -> Option<(DefId, Vec<AnnotatedType>)> {
        match self.lookup(id) {
            TypeData::Named { def, args } => Some((def, args)),
            _ => None,
        }
    }

    /// True if `id` or any type nested in it is an error type.
    pub fn contains_error(&self, id: TypeId) -> bool {
        match self.lookup(id) {
            TypeData::Error { .. } => true,
            TypeData::Intrinsic(_) | TypeData::TypeParameter { .. } => false,
            TypeData::Named { args, .. } => args.iter().any(|a| self.contains_error(a.ty)),
            TypeData::Array { element, .. } => self.contains_error(element.ty),
            TypeData::Tuple(elements) => elements.iter().any(|e| self.contains_error(e.ty.ty)),
            TypeData::NullableValue(inner) | TypeData::Pointer(inner) | TypeData::ByRef(inner) => {
                self.contains_error(inner)
            }
            TypeData::FunctionPointer {
                parameters,
                return_type,
            } => parameters.iter().any(|p| self.contains_error(*p)) || self.contains_error(return_type),
        }
    }
}
