//! Structural type identity under configurable leniency.
//!
//! Interning already makes exact identity a `TypeId` comparison. The
//! functions here walk both structures in parallel when a comparison must
//! ignore nullable annotations, tuple element names or the distinction
//! between `dynamic` and `object`.

use crate::intern::TypeInterner;
use crate::types::{AnnotatedType, NullableAnnotation, TupleElement, TypeData, TypeId};
use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TypeCompareKind: u8 {
        /// Annotations never matter.
        const IGNORE_NULLABLE_ANNOTATIONS = 1 << 0;
        /// An oblivious annotation matches any other annotation.
        const OBLIVIOUS_MATCHES_ANY = 1 << 1;
        const IGNORE_TUPLE_NAMES = 1 << 2;
        /// `dynamic` and `object` are the same type.
        const IGNORE_DYNAMIC = 1 << 3;

        const CONSIDER_EVERYTHING = 0;
        const ALL_IGNORE_OPTIONS = Self::IGNORE_NULLABLE_ANNOTATIONS.bits()
            | Self::IGNORE_TUPLE_NAMES.bits()
            | Self::IGNORE_DYNAMIC.bits();
    }
}

/// Whether `a` and `b` are the same type under `kind`, including their
/// top-level annotations.
pub fn annotated_types_equal(
    types: &TypeInterner,
    a: AnnotatedType,
    b: AnnotatedType,
    kind: TypeCompareKind,
) -> bool {
    annotations_equal(a.annotation, b.annotation, kind) && types_equal(types, a.ty, b.ty, kind)
}

fn annotations_equal(a: NullableAnnotation, b: NullableAnnotation, kind: TypeCompareKind) -> bool {
    if a == b || kind.contains(TypeCompareKind::IGNORE_NULLABLE_ANNOTATIONS) {
        return true;
    }
    kind.contains(TypeCompareKind::OBLIVIOUS_MATCHES_ANY) && (a.is_oblivious() || b.is_oblivious())
}

fn normalize_dynamic(ty: TypeId, kind: TypeCompareKind) -> TypeId {
    if ty == TypeId::DYNAMIC && kind.contains(TypeCompareKind::IGNORE_DYNAMIC) {
        TypeId::OBJECT
    } else {
        ty
    }
}

/// Whether `a` and `b` are the same type under `kind`, ignoring the
/// top-level annotations (which are not part of a `TypeId`).
pub fn types_equal(types: &TypeInterner, a: TypeId, b: TypeId, kind: TypeCompareKind) -> bool {
    let a = normalize_dynamic(a, kind);
    let b = normalize_dynamic(b, kind);
    if a == b {
        return true;
    }
    match (types.lookup(a), types.lookup(b)) {
        (
            TypeData::Named { def: da, args: aa },
            TypeData::Named { def: db, args: ab },
        ) => da == db && args_equal(types, &aa, &ab, kind),
        (
            TypeData::Error { name: na, args: aa },
            TypeData::Error { name: nb, args: ab },
        ) => na == nb && args_equal(types, &aa, &ab, kind),
        (
            TypeData::Array {
                element: ea,
                rank: ra,
            },
            TypeData::Array {
                element: eb,
                rank: rb,
            },
        ) => ra == rb && annotated_types_equal(types, ea, eb, kind),
        (TypeData::Tuple(ea), TypeData::Tuple(eb)) => tuple_elements_equal(types, &ea, &eb, kind),
        (TypeData::NullableValue(x), TypeData::NullableValue(y))
        | (TypeData::Pointer(x), TypeData::Pointer(y))
        | (TypeData::ByRef(x), TypeData::ByRef(y)) => types_equal(types, x, y, kind),
        (
            TypeData::FunctionPointer {
                parameters: pa,
                return_type: ra,
            },
            TypeData::FunctionPointer {
                parameters: pb,
                return_type: rb,
            },
        ) => {
            pa.len() == pb.len()
                && pa
                    .iter()
                    .zip(&pb)
                    .all(|(x, y)| types_equal(types, *x, *y, kind))
                && types_equal(types, ra, rb, kind)
        }
        _ => false,
    }
}

fn args_equal(
    types: &TypeInterner,
    a: &[AnnotatedType],
    b: &[AnnotatedType],
    kind: TypeCompareKind,
) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| annotated_types_equal(types, *x, *y, kind))
}

fn tuple_elements_equal(
    types: &TypeInterner,
    a: &[TupleElement],
    b: &[TupleElement],
    kind: TypeCompareKind,
) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            (kind.contains(TypeCompareKind::IGNORE_TUPLE_NAMES) || x.name == y.name)
                && annotated_types_equal(types, x.ty, y.ty, kind)
        })
}

// =============================================================================
// Difference classification
// =============================================================================

/// The smallest kind of difference between two types that are not identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeDifference {
    /// Only nullable annotations differ (anywhere in the structure).
    Nullability,
    /// Tuple element names differ (and possibly annotations).
    TupleNames,
    /// `dynamic` vs `object` (and possibly names or annotations).
    Dynamic,
    Other,
}

/// Classify how `a` and `b` differ. Returns `None` when they are identical.
pub fn classify_difference(
    types: &TypeInterner,
    a: AnnotatedType,
    b: AnnotatedType,
) -> Option<TypeDifference> {
    if annotated_types_equal(types, a, b, TypeCompareKind::CONSIDER_EVERYTHING) {
        return None;
    }
    let mut kind = TypeCompareKind::IGNORE_NULLABLE_ANNOTATIONS;
    if types_equal(types, a.ty, b.ty, kind) {
        return Some(TypeDifference::Nullability);
    }
    kind |= TypeCompareKind::IGNORE_TUPLE_NAMES;
    if types_equal(types, a.ty, b.ty, kind) {
        return Some(TypeDifference::TupleNames);
    }
    kind |= TypeCompareKind::IGNORE_DYNAMIC;
    if types_equal(types, a.ty, b.ty, kind) {
        return Some(TypeDifference::Dynamic);
    }
    Some(TypeDifference::Other)
}

// =============================================================================
// Annotation merging
// =============================================================================

/// Merge two types that are equal ignoring annotations, keeping the more
/// informative annotation at every position. `a` wins ties.
///
/// If the structures do not line up, `a` is returned unchanged.
pub fn merge_annotations(types: &TypeInterner, a: AnnotatedType, b: AnnotatedType) -> AnnotatedType {
    AnnotatedType::new(merge_type(types, a.ty, b.ty), a.annotation.merge(b.annotation))
}

fn merge_args(types: &TypeInterner, a: &[AnnotatedType], b: &[AnnotatedType]) -> Vec<AnnotatedType> {
    a.iter()
        .zip(b)
        .map(|(x, y)| merge_annotations(types, *x, *y))
        .collect()
}

fn merge_type(types: &TypeInterner, a: TypeId, b: TypeId) -> TypeId {
    if a == b {
        return a;
    }
    match (types.lookup(a), types.lookup(b)) {
        (
            TypeData::Named { def, args: aa },
            TypeData::Named { def: db, args: ab },
        ) if def == db && aa.len() == ab.len() => types.named(def, merge_args(types, &aa, &ab)),
        (
            TypeData::Array { element: ea, rank },
            TypeData::Array {
                element: eb,
                rank: rb,
            },
        ) if rank == rb => types.array(merge_annotations(types, ea, eb), rank),
        (TypeData::Tuple(ea), TypeData::Tuple(eb)) if ea.len() == eb.len() => types.tuple(
            ea.iter()
                .zip(&eb)
                .map(|(x, y)| TupleElement {
                    ty: merge_annotations(types, x.ty, y.ty),
                    name: x.name,
                })
                .collect(),
        ),
        (TypeData::NullableValue(x), TypeData::NullableValue(y)) => {
            types.nullable_value(merge_type(types, x, y))
        }
        _ => a,
    }
}
