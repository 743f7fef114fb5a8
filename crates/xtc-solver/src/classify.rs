//! Type classification queries.
//!
//! Answers the kind questions the checker's rules are phrased in: is a type a
//! reference type, a value type, an extension, usable as a type argument, and
//! how accessible it is. Extension types are neither reference nor value
//! types.

use crate::def::{DefId, DefKind, DefinitionStore, UseSiteError};
use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};
use xtc_common::Accessibility;

pub struct TypeClassifier<'a> {
    types: &'a TypeInterner,
    defs: &'a DefinitionStore,
}

impl<'a> TypeClassifier<'a> {
    pub fn new(types: &'a TypeInterner, defs: &'a DefinitionStore) -> Self {
        TypeClassifier { types, defs }
    }

    #[inline]
    pub fn is_error(&self, ty: TypeId) -> bool {
        self.types.is_error(ty)
    }

    pub fn def_kind(&self, ty: TypeId) -> Option<DefKind> {
        match self.types.lookup(ty) {
            TypeData::Named { def, .. } => self.defs.get_kind(def),
            _ => None,
        }
    }

    pub fn is_reference_type(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            TypeData::Intrinsic(kind) => kind.is_reference_type(),
            TypeData::Named { def, .. } => self
                .defs
                .get_kind(def)
                .is_some_and(DefKind::is_reference_kind),
            TypeData::Array { .. } => true,
            TypeData::TypeParameter { owner, index, .. } => {
                self.type_param_is_reference(owner, index, 0)
            }
            _ => false,
        }
    }

    /// A type parameter is a reference type when constrained by `class` or
    /// by a class type, directly or through another type parameter.
    fn type_param_is_reference(&self, owner: DefId, index: u32, depth: u32) -> bool {
        if depth > 16 {
            return false;
        }
        let Some(constraints) = self.defs.get_constraints(owner, index) else {
            return false;
        };
        if constraints.reference_type.is_some() {
            return true;
        }
        constraints.types.iter().any(|c| match self.types.lookup(c.ty) {
            TypeData::Named { def, .. } => self.defs.get_kind(def) == Some(DefKind::Class),
            TypeData::Intrinsic(kind) => kind.is_reference_type() && c.ty != TypeId::OBJECT,
            TypeData::Array { .. } => true,
            TypeData::TypeParameter { owner, index, .. } => {
                self.type_param_is_reference(owner, index, depth + 1)
            }
            _ => false,
        })
    }

    pub fn is_value_type(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            TypeData::Intrinsic(kind) => kind.is_value_type(),
            TypeData::Named { def, .. } => self.defs.get_kind(def).is_some_and(DefKind::is_value_kind),
            TypeData::Tuple(_) | TypeData::NullableValue(_) => true,
            TypeData::TypeParameter { owner, index, .. } => self
                .defs
                .get_constraints(owner, index)
                .is_some_and(|c| c.value_type),
            _ => false,
        }
    }

    /// Value type other than `Nullable<T>`; what a `struct` constraint requires.
    pub fn is_non_nullable_value_type(&self, ty: TypeId) -> bool {
        !matches!(self.types.lookup(ty), TypeData::NullableValue(_)) && self.is_value_type(ty)
    }

    pub fn is_nullable_value_type(&self, ty: TypeId) -> bool {
        matches!(self.types.lookup(ty), TypeData::NullableValue(_))
    }

    pub fn is_extension(&self, ty: TypeId) -> bool {
        self.def_kind(ty).is_some_and(DefKind::is_extension)
    }

    pub fn extension_def(&self, ty: TypeId) -> Option<DefId> {
        match self.types.lookup(ty) {
            TypeData::Named { def, .. } if self.defs.get_kind(def).is_some_and(DefKind::is_extension) => {
                Some(def)
            }
            _ => None,
        }
    }

    pub fn is_type_parameter(&self, ty: TypeId) -> bool {
        matches!(self.types.lookup(ty), TypeData::TypeParameter { .. })
    }

    pub fn is_pointer_like(&self, ty: TypeId) -> bool {
        matches!(
            self.types.lookup(ty),
            TypeData::Pointer(_) | TypeData::FunctionPointer { .. }
        )
    }

    /// `ref struct` or a by-ref type.
    pub fn is_ref_like(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            TypeData::ByRef(_) => true,
            TypeData::Named { def, .. } => self.defs.get(def).is_some_and(|d| d.is_ref_like),
            _ => false,
        }
    }

    /// Pointers, function pointers, by-refs, `void` and ref structs cannot
    /// be type arguments.
    pub fn may_not_be_type_argument(&self, ty: TypeId) -> bool {
        ty == TypeId::VOID || self.is_pointer_like(ty) || self.is_ref_like(ty)
    }

    pub fn is_static_type(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            TypeData::Named { def, .. } => self.defs.get(def).is_some_and(|d| d.is_static),
            _ => false,
        }
    }

    // =========================================================================
    // Whole-structure queries
    // =========================================================================

    /// Call `f` for every definition mentioned in `ty`, outermost first,
    /// stopping at the first `true`.
    fn any_def(&self, ty: TypeId, f: &mut impl FnMut(DefId) -> bool) -> bool {
        match self.types.lookup(ty) {
            TypeData::Named { def, args } => {
                f(def) || args.iter().any(|a| self.any_def(a.ty, f))
            }
            TypeData::Error { args, .. } => args.iter().any(|a| self.any_def(a.ty, f)),
            TypeData::Array { element, .. } => self.any_def(element.ty, f),
            TypeData::Tuple(elements) => elements.iter().any(|e| self.any_def(e.ty.ty, f)),
            TypeData::NullableValue(inner) | TypeData::Pointer(inner) | TypeData::ByRef(inner) => {
                self.any_def(inner, f)
            }
            TypeData::FunctionPointer {
                parameters,
                return_type,
            } => parameters.iter().any(|p| self.any_def(*p, f)) || self.any_def(return_type, f),
            TypeData::Intrinsic(_) | TypeData::TypeParameter { .. } => false,
        }
    }

    /// Accessibility of `ty` as a whole: the meet of every definition it
    /// mentions. Intrinsics, type parameters and error types are public.
    pub fn effective_accessibility(&self, ty: TypeId) -> Accessibility {
        let mut result = Accessibility::Public;
        self.any_def(ty, &mut |def| {
            result = result.meet(self.defs.effective_accessibility(def));
            false
        });
        result
    }

    /// True if `ty` mentions a `file`-local type.
    pub fn mentions_file_local(&self, ty: TypeId) -> bool {
        self.any_def(ty, &mut |def| self.defs.is_file_local_including_containers(def))
    }

    /// First definition in `ty` with a use-site error.
    pub fn use_site_error(&self, ty: TypeId) -> Option<(DefId, UseSiteError)> {
        let mut found = None;
        self.any_def(ty, &mut |def| {
            found = self
                .defs
                .get(def)
                .and_then(|d| d.use_site_error)
                .map(|e| (def, e));
            found.is_some()
        });
        found
    }

    /// First malformed imported definition in `ty`.
    pub fn malformed_def(&self, ty: TypeId) -> Option<DefId> {
        let mut found = None;
        self.any_def(ty, &mut |def| {
            if self.defs.get(def).is_some_and(|d| d.is_malformed) {
                found = Some(def);
            }
            found.is_some()
        });
        found
    }
}
