//! Implicit identity, reference and boxing conversions.
//!
//! Only what explicit type constraints need: `A` satisfies `where T : B` when
//! `A` converts to `B` by identity, by walking base classes and interfaces
//! (boxing for value types), or through the constraint chain of a type
//! parameter. Extension types have no conversions besides identity.

use crate::compare::{TypeCompareKind, types_equal};
use crate::def::DefinitionStore;
use crate::instantiate::{TypeSubstitution, instantiate_type};
use crate::intern::TypeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{TypeData, TypeId};
use tracing::trace;

/// Identity conversion ignores annotations, tuple names and `dynamic`.
const IDENTITY: TypeCompareKind = TypeCompareKind::ALL_IGNORE_OPTIONS;

/// Whether `from` converts implicitly to `to` by identity, reference or
/// boxing conversion. Error types convert both ways.
pub fn has_implicit_conversion(
    types: &TypeInterner,
    defs: &DefinitionStore,
    from: TypeId,
    to: TypeId,
) -> bool {
    if types.is_error(from) || types.is_error(to) {
        return true;
    }
    let mut guard = RecursionGuard::with_profile(RecursionProfile::ConversionSearch);
    let result = search(types, defs, from, to, &mut guard);
    trace!(from = from.0, to = to.0, result, "has_implicit_conversion");
    result
}

fn search(
    types: &TypeInterner,
    defs: &DefinitionStore,
    from: TypeId,
    to: TypeId,
    guard: &mut RecursionGuard<TypeId>,
) -> bool {
    if types_equal(types, from, to, IDENTITY) {
        return true;
    }
    match guard.enter(from) {
        RecursionResult::Entered => {}
        _ => return false,
    }
    let found = match types.lookup(from) {
        TypeData::Named { def, args } => {
            let Some(info) = defs.get(def) else {
                guard.leave(from);
                return false;
            };
            if info.is_extension() {
                false
            } else if to == TypeId::OBJECT {
                true
            } else {
                let subst = TypeSubstitution::for_def(defs, def, &args);
                info.base_class
                    .iter()
                    .chain(info.interfaces.iter())
                    .any(|base| {
                        let base = instantiate_type(types, *base, &subst);
                        search(types, defs, base.ty, to, guard)
                    })
            }
        }
        TypeData::TypeParameter { owner, index, .. } => {
            to == TypeId::OBJECT
                || defs.get_constraints(owner, index).is_some_and(|c| {
                    c.types
                        .iter()
                        .any(|constraint| search(types, defs, constraint.ty, to, guard))
                })
        }
        TypeData::NullableValue(inner) => to == TypeId::OBJECT || search(types, defs, inner, to, guard),
        TypeData::Intrinsic(kind) => to == TypeId::OBJECT && kind != crate::IntrinsicKind::Void,
        TypeData::Array { .. } | TypeData::Tuple(_) => to == TypeId::OBJECT,
        TypeData::Pointer(_)
        | TypeData::FunctionPointer { .. }
        | TypeData::ByRef(_)
        | TypeData::Error { .. } => false,
    };
    guard.leave(from);
    found
}
