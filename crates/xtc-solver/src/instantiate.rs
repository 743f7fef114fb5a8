//! Type substitution.
//!
//! Replaces type parameters with type arguments throughout a type. Used to
//! read the extended type and base extensions of a constructed extension
//! (`R<int>` for `R<U> for C<U>` reads as `C<int>`) and to instantiate
//! constraint types at a use site.

use crate::def::{DefId, DefinitionStore};
use crate::intern::TypeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{AnnotatedType, NullableAnnotation, TupleElement, TypeData, TypeId};
use rustc_hash::FxHashMap;

/// Mapping from `(owner, index)` type parameters to arguments.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<(DefId, u32), AnnotatedType>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitution of `args` for the type parameters of `def`. Extra
    /// arguments are ignored; missing ones leave their parameters in place.
    pub fn for_def(defs: &DefinitionStore, def: DefId, args: &[AnnotatedType]) -> Self {
        let mut subst = Self::new();
        for param in defs.get_type_params(def).unwrap_or_default() {
            if let Some(arg) = args.get(param.index as usize) {
                subst.insert(def, param.index, *arg);
            }
        }
        subst
    }

    pub fn insert(&mut self, owner: DefId, index: u32, arg: AnnotatedType) {
        self.map.insert((owner, index), arg);
    }

    pub fn get(&self, owner: DefId, index: u32) -> Option<AnnotatedType> {
        self.map.get(&(owner, index)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Apply `subst` to `ty`.
///
/// A substituted type parameter takes the argument's annotation unless the
/// use was written `T?`, in which case the result stays annotated.
pub fn instantiate_type(
    types: &TypeInterner,
    ty: AnnotatedType,
    subst: &TypeSubstitution,
) -> AnnotatedType {
    if subst.is_empty() {
        return ty;
    }
    let mut guard = RecursionGuard::with_profile(RecursionProfile::Instantiation);
    instantiate_inner(types, ty, subst, &mut guard)
}

fn instantiate_inner(
    types: &TypeInterner,
    ty: AnnotatedType,
    subst: &TypeSubstitution,
    guard: &mut RecursionGuard<TypeId>,
) -> AnnotatedType {
    if ty.ty.is_intrinsic() {
        return ty;
    }
    match guard.enter(ty.ty) {
        RecursionResult::Entered => {}
        _ => return ty,
    }
    let data = types.lookup(ty.ty);
    let result = match data {
        TypeData::TypeParameter { owner, index, .. } => match subst.get(owner, index) {
            Some(arg) => {
                if ty.annotation == NullableAnnotation::Annotated {
                    arg.with_annotation(NullableAnnotation::Annotated)
                } else {
                    arg
                }
            }
            None => ty,
        },
        TypeData::Named { def, args } => {
            let args = instantiate_args(types, &args, subst, guard);
            AnnotatedType::new(types.named(def, args), ty.annotation)
        }
        TypeData::Error { name, args } => {
            let args = instantiate_args(types, &args, subst, guard);
            AnnotatedType::new(types.error(name, args), ty.annotation)
        }
        TypeData::Array { element, rank } => {
            let element = instantiate_inner(types, element, subst, guard);
            AnnotatedType::new(types.array(element, rank), ty.annotation)
        }
        TypeData::Tuple(elements) => {
            let elements = elements
                .into_iter()
                .map(|e| TupleElement {
                    ty: instantiate_inner(types, e.ty, subst, guard),
                    name: e.name,
                })
                .collect();
            AnnotatedType::new(types.tuple(elements), ty.annotation)
        }
        TypeData::NullableValue(inner) => {
            let inner = instantiate_bare(types, inner, subst, guard);
            AnnotatedType::new(types.nullable_value(inner), ty.annotation)
        }
        TypeData::Pointer(inner) => {
            let inner = instantiate_bare(types, inner, subst, guard);
            AnnotatedType::new(types.pointer(inner), ty.annotation)
        }
        TypeData::ByRef(inner) => {
            let inner = instantiate_bare(types, inner, subst, guard);
            AnnotatedType::new(types.by_ref(inner), ty.annotation)
        }
        TypeData::FunctionPointer {
            parameters,
            return_type,
        } => {
            let parameters = parameters
                .into_iter()
                .map(|p| instantiate_bare(types, p, subst, guard))
                .collect();
            let return_type = instantiate_bare(types, return_type, subst, guard);
            AnnotatedType::new(
                types.function_pointer(parameters, return_type),
                ty.annotation,
            )
        }
        TypeData::Intrinsic(_) => ty,
    };
    guard.leave(ty.ty);
    result
}

fn instantiate_bare(
    types: &TypeInterner,
    ty: TypeId,
    subst: &TypeSubstitution,
    guard: &mut RecursionGuard<TypeId>,
) -> TypeId {
    instantiate_inner(types, AnnotatedType::oblivious(ty), subst, guard).ty
}

fn instantiate_args(
    types: &TypeInterner,
    args: &[AnnotatedType],
    subst: &TypeSubstitution,
    guard: &mut RecursionGuard<TypeId>,
) -> Vec<AnnotatedType> {
    args.iter()
        .map(|arg| instantiate_inner(types, *arg, subst, guard))
        .collect()
}
