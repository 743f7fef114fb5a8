use crate::{
    AnnotatedType, ArgumentKind, ConstraintChecker, ConstraintSet, ConstraintViolationKind,
    DefinitionInfo, DefinitionStore, ExtensionKind, NullableAnnotation, TypeId, TypeInterner,
};
use std::sync::Arc;
use xtc_common::Interner;

fn setup() -> (TypeInterner, DefinitionStore) {
    (TypeInterner::new(Arc::new(Interner::new())), DefinitionStore::new())
}

fn generic_with(types: &TypeInterner, defs: &DefinitionStore, constraints: ConstraintSet) -> crate::DefId {
    let g = defs.register(DefinitionInfo::class(types.intern_string("G")).with_type_params(&[types.intern_string("T")]));
    defs.set_constraints(g, 0, constraints);
    g
}

fn kinds(violations: &[crate::ConstraintViolation]) -> Vec<ConstraintViolationKind> {
    violations.iter().map(|v| v.kind).collect()
}

#[test]
fn class_constraint_rejects_value_type_argument() {
    let (types, defs) = setup();
    let g = generic_with(
        &types,
        &defs,
        ConstraintSet { reference_type: Some(NullableAnnotation::Oblivious), ..Default::default() },
    );
    let checker = ConstraintChecker::new(&types, &defs);
    let violations = checker.check_instantiation(g, &[AnnotatedType::oblivious(TypeId::INT)]);
    assert_eq!(kinds(&violations), vec![ConstraintViolationKind::ReferenceType]);
    assert_eq!(violations[0].argument.ty, TypeId::INT);
    assert!(checker.check_instantiation(g, &[AnnotatedType::oblivious(TypeId::STRING)]).is_empty());
}

#[test]
fn struct_constraint_requires_non_nullable_value_type() {
    let (types, defs) = setup();
    let g = generic_with(&types, &defs, ConstraintSet { value_type: true, ..Default::default() });
    let checker = ConstraintChecker::new(&types, &defs);
    assert!(checker.check_instantiation(g, &[AnnotatedType::oblivious(TypeId::INT)]).is_empty());
    assert_eq!(
        kinds(&checker.check_instantiation(g, &[AnnotatedType::oblivious(TypeId::STRING)])),
        vec![ConstraintViolationKind::ValueType]
    );
    assert_eq!(
        kinds(&checker.check_instantiation(g, &[AnnotatedType::oblivious(types.nullable_value(TypeId::INT))])),
        vec![ConstraintViolationKind::ValueType]
    );
}

#[test]
fn notnull_and_non_nullable_class_constraints_warn_on_nullable_arguments() {
    let (types, defs) = setup();
    let notnull = generic_with(&types, &defs, ConstraintSet { not_null: true, ..Default::default() });
    let class = generic_with(
        &types,
        &defs,
        ConstraintSet { reference_type: Some(NullableAnnotation::NotAnnotated), ..Default::default() },
    );
    let nullable_class = generic_with(
        &types,
        &defs,
        ConstraintSet { reference_type: Some(NullableAnnotation::Annotated), ..Default::default() },
    );
    let checker = ConstraintChecker::new(&types, &defs);
    let string_q = AnnotatedType::annotated(TypeId::STRING);

    let violations = checker.check_instantiation(notnull, &[string_q]);
    assert_eq!(kinds(&violations), vec![ConstraintViolationKind::NullableForNotNull]);
    assert!(violations[0].kind.is_warning());
    assert_eq!(
        kinds(&checker.check_instantiation(notnull, &[AnnotatedType::oblivious(types.nullable_value(TypeId::INT))])),
        vec![ConstraintViolationKind::NullableForNotNull]
    );
    assert_eq!(
        kinds(&checker.check_instantiation(class, &[string_q])),
        vec![ConstraintViolationKind::NullableForReferenceType]
    );
    assert!(checker.check_instantiation(nullable_class, &[string_q]).is_empty());
}

#[test]
fn extension_types_satisfy_neither_class_nor_struct() {
    let (types, defs) = setup();
    let r = defs.register(DefinitionInfo::extension(types.intern_string("R"), ExtensionKind::Explicit));
    let r_ty = AnnotatedType::oblivious(types.named(r, vec![]));
    let class = generic_with(
        &types,
        &defs,
        ConstraintSet { reference_type: Some(NullableAnnotation::Oblivious), ..Default::default() },
    );
    let structure = generic_with(&types, &defs, ConstraintSet { value_type: true, ..Default::default() });
    let checker = ConstraintChecker::new(&types, &defs);
    assert_eq!(kinds(&checker.check_instantiation(class, &[r_ty])), vec![ConstraintViolationKind::ReferenceType]);
    assert_eq!(kinds(&checker.check_instantiation(structure, &[r_ty])), vec![ConstraintViolationKind::ValueType]);
}

#[test]
fn type_constraints_follow_base_classes_and_interfaces() {
    let (types, defs) = setup();
    let i = defs.register(DefinitionInfo::interface(types.intern_string("I")));
    let i_ty = AnnotatedType::oblivious(types.named(i, vec![]));
    let base = defs.register(DefinitionInfo::class(types.intern_string("Base")));
    defs.set_heritage(base, None, vec![i_ty]);
    let derived = defs.register(DefinitionInfo::class(types.intern_string("Derived")));
    defs.set_heritage(derived, Some(AnnotatedType::oblivious(types.named(base, vec![]))), vec![]);
    let value = defs.register(DefinitionInfo::structure(types.intern_string("V")));

    let g = generic_with(&types, &defs, ConstraintSet { types: vec![i_ty], ..Default::default() });
    let checker = ConstraintChecker::new(&types, &defs);
    assert!(checker.check_instantiation(g, &[AnnotatedType::oblivious(types.named(derived, vec![]))]).is_empty());

    let violations = checker.check_instantiation(g, &[AnnotatedType::oblivious(types.named(value, vec![]))]);
    assert_eq!(
        kinds(&violations),
        vec![ConstraintViolationKind::TypeConstraint { constraint: i_ty, argument_kind: ArgumentKind::ValueType }]
    );
    let violations = checker.check_instantiation(g, &[AnnotatedType::oblivious(TypeId::STRING)]);
    assert_eq!(
        kinds(&violations),
        vec![ConstraintViolationKind::TypeConstraint { constraint: i_ty, argument_kind: ArgumentKind::ReferenceType }]
    );
}

#[test]
fn unconstrained_type_parameter_fails_class_constraint() {
    let (types, defs) = setup();
    let u = types.intern_string("U");
    let outer = defs.register(DefinitionInfo::class(types.intern_string("Outer")).with_type_params(&[u]));
    let u_ty = AnnotatedType::oblivious(types.type_param(outer, 0, u));
    let class = generic_with(
        &types,
        &defs,
        ConstraintSet { reference_type: Some(NullableAnnotation::Oblivious), ..Default::default() },
    );
    let checker = ConstraintChecker::new(&types, &defs);
    assert_eq!(kinds(&checker.check_instantiation(class, &[u_ty])), vec![ConstraintViolationKind::ReferenceType]);

    defs.set_constraints(
        outer,
        0,
        ConstraintSet { reference_type: Some(NullableAnnotation::Oblivious), ..Default::default() },
    );
    assert!(checker.check_instantiation(class, &[u_ty]).is_empty());
}

#[test]
fn pointers_are_not_type_arguments_and_errors_are_silent() {
    let (types, defs) = setup();
    let class = generic_with(
        &types,
        &defs,
        ConstraintSet { reference_type: Some(NullableAnnotation::Oblivious), ..Default::default() },
    );
    let checker = ConstraintChecker::new(&types, &defs);
    assert_eq!(
        kinds(&checker.check_instantiation(class, &[AnnotatedType::oblivious(types.pointer(TypeId::INT))])),
        vec![ConstraintViolationKind::NotTypeArgument]
    );
    assert!(checker.check_instantiation(class, &[AnnotatedType::ERROR]).is_empty());
}
