use crate::{
    AnnotatedType, DefinitionInfo, DefinitionStore, TupleElement, TypeCompareKind,
    TypeDifference, TypeId, TypeInterner, classify_difference, merge_annotations, types_equal,
};
use crate::compare::annotated_types_equal;
use std::sync::Arc;
use xtc_common::Interner;

fn setup() -> (TypeInterner, DefinitionStore) {
    (TypeInterner::new(Arc::new(Interner::new())), DefinitionStore::new())
}

#[test]
fn intrinsics_are_pre_interned_at_their_constants() {
    let (types, _) = setup();
    assert_eq!(types.intrinsic(crate::IntrinsicKind::Object), TypeId::OBJECT);
    assert_eq!(types.intrinsic(crate::IntrinsicKind::Int), TypeId::INT);
    assert_eq!(types.intrinsic(crate::IntrinsicKind::Void), TypeId::VOID);
    assert!(types.is_error(TypeId::ERROR));
}

#[test]
fn nested_annotation_difference_is_nullability() {
    let (types, defs) = setup();
    let c = defs.register(DefinitionInfo::class(types.intern_string("C")).with_type_params(&[types.intern_string("T")]));
    let plain = types.named(c, vec![AnnotatedType::not_annotated(TypeId::OBJECT)]);
    let annotated = types.named(c, vec![AnnotatedType::annotated(TypeId::OBJECT)]);

    assert!(!types_equal(&types, plain, annotated, TypeCompareKind::CONSIDER_EVERYTHING));
    assert!(types_equal(&types, plain, annotated, TypeCompareKind::IGNORE_NULLABLE_ANNOTATIONS));
    assert_eq!(
        classify_difference(&types, AnnotatedType::not_annotated(plain), AnnotatedType::not_annotated(annotated)),
        Some(TypeDifference::Nullability)
    );
}

#[test]
fn oblivious_matches_any_annotation() {
    let (types, defs) = setup();
    let c = defs.register(DefinitionInfo::class(types.intern_string("C")).with_type_params(&[types.intern_string("T")]));
    let oblivious = types.named(c, vec![AnnotatedType::oblivious(TypeId::STRING)]);
    let annotated = types.named(c, vec![AnnotatedType::annotated(TypeId::STRING)]);
    let not_annotated = types.named(c, vec![AnnotatedType::not_annotated(TypeId::STRING)]);

    let kind = TypeCompareKind::OBLIVIOUS_MATCHES_ANY;
    assert!(types_equal(&types, oblivious, annotated, kind));
    assert!(types_equal(&types, oblivious, not_annotated, kind));
    assert!(!types_equal(&types, annotated, not_annotated, kind));
}

#[test]
fn tuple_names_and_dynamic_are_distinct_differences() {
    let (types, _) = setup();
    let i = types.intern_string("i");
    let j = types.intern_string("j");
    let named = types.tuple(vec![
        TupleElement { ty: AnnotatedType::oblivious(TypeId::INT), name: Some(i) },
        TupleElement { ty: AnnotatedType::oblivious(TypeId::INT), name: Some(j) },
    ]);
    let unnamed = types.tuple(vec![
        TupleElement { ty: AnnotatedType::oblivious(TypeId::INT), name: None },
        TupleElement { ty: AnnotatedType::oblivious(TypeId::INT), name: None },
    ]);
    assert_eq!(
        classify_difference(&types, AnnotatedType::oblivious(named), AnnotatedType::oblivious(unnamed)),
        Some(TypeDifference::TupleNames)
    );

    let objects = types.array(AnnotatedType::oblivious(TypeId::OBJECT), 1);
    let dynamics = types.array(AnnotatedType::oblivious(TypeId::DYNAMIC), 1);
    assert_eq!(
        classify_difference(&types, AnnotatedType::oblivious(objects), AnnotatedType::oblivious(dynamics)),
        Some(TypeDifference::Dynamic)
    );
    assert_eq!(
        classify_difference(&types, AnnotatedType::oblivious(objects), AnnotatedType::oblivious(TypeId::STRING)),
        Some(TypeDifference::Other)
    );
    assert_eq!(
        classify_difference(&types, AnnotatedType::oblivious(objects), AnnotatedType::oblivious(objects)),
        None
    );
}

#[test]
fn top_level_annotation_is_compared_separately() {
    let (types, _) = setup();
    let a = AnnotatedType::annotated(TypeId::STRING);
    let b = AnnotatedType::not_annotated(TypeId::STRING);
    assert!(!annotated_types_equal(&types, a, b, TypeCompareKind::CONSIDER_EVERYTHING));
    assert!(annotated_types_equal(&types, a, b, TypeCompareKind::IGNORE_NULLABLE_ANNOTATIONS));
    assert!(types_equal(&types, a.ty, b.ty, TypeCompareKind::CONSIDER_EVERYTHING));
}

#[test]
fn merge_prefers_informative_annotations_at_every_position() {
    let (types, defs) = setup();
    let c = defs.register(
        DefinitionInfo::class(types.intern_string("C"))
            .with_type_params(&[types.intern_string("T"), types.intern_string("U")]),
    );
    let left = types.named(
        c,
        vec![AnnotatedType::oblivious(TypeId::OBJECT), AnnotatedType::not_annotated(TypeId::STRING)],
    );
    let right = types.named(
        c,
        vec![AnnotatedType::annotated(TypeId::OBJECT), AnnotatedType::oblivious(TypeId::STRING)],
    );
    let merged = merge_annotations(&types, AnnotatedType::oblivious(left), AnnotatedType::not_annotated(right));
    let expected = types.named(
        c,
        vec![AnnotatedType::annotated(TypeId::OBJECT), AnnotatedType::not_annotated(TypeId::STRING)],
    );
    assert_eq!(merged, AnnotatedType::not_annotated(expected));
}
