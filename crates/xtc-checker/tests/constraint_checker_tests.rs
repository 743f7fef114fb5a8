use crate::CheckerOptions;
use crate::test_utils::{Program, codes, messages};
use xtc_binder::{
    ConstraintSyntax, MemberFragment, NullableContext, TypeDeclarationFragment, TypeParameterSyntax,
    TypeSyntax,
};
use xtc_common::diagnostics::diagnostic_codes;

fn constrained_c(constraint: ConstraintSyntax) -> TypeDeclarationFragment {
    TypeDeclarationFragment::class("C")
        .with_type_parameter(TypeParameterSyntax::new("T").with_constraint(constraint))
}

fn extension_for(underlying: TypeSyntax) -> TypeDeclarationFragment {
    TypeDeclarationFragment::explicit_extension("R").for_type(underlying)
}

fn c_of(arg: TypeSyntax) -> TypeSyntax {
    TypeSyntax::generic("C", vec![arg])
}

#[test]
fn value_type_argument_for_class_constraint() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ReferenceType { annotated: false }),
        extension_for(c_of(TypeSyntax::int())),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED]
    );
    assert_eq!(
        messages(state.diagnostics()),
        vec![
            "The type 'int' must be a reference type in order to use it as parameter 'T' in the generic type or method 'C<T>'"
        ]
    );
}

#[test]
fn reference_type_argument_for_struct_constraint() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ValueType),
        extension_for(c_of(TypeSyntax::string())),
        TypeDeclarationFragment::explicit_extension("Ok").for_type(c_of(TypeSyntax::int())),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::VALUE_TYPE_CONSTRAINT_NOT_SATISFIED]
    );
}

#[test]
fn nullable_value_type_fails_struct_constraint() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ValueType),
        extension_for(c_of(TypeSyntax::int().nullable())),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::VALUE_TYPE_CONSTRAINT_NOT_SATISFIED]
    );
}

#[test]
fn annotated_argument_warns_against_not_annotated_class_constraint() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ReferenceType { annotated: false })
            .nullable(NullableContext::Enabled),
        extension_for(c_of(TypeSyntax::string().nullable())).nullable(NullableContext::Enabled),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT]
    );
    assert!(state.diagnostics()[0].is_warning());
}

#[test]
fn oblivious_class_constraint_accepts_annotated_argument() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ReferenceType { annotated: false }),
        extension_for(c_of(TypeSyntax::string().nullable())).nullable(NullableContext::Enabled),
    ]);
    let state = program.check();
    assert!(state.diagnostics().is_empty(), "unexpected: {:?}", state.diagnostics());
}

#[test]
fn nullable_argument_warns_against_notnull_constraint() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::NotNull),
        extension_for(c_of(TypeSyntax::string().nullable())).nullable(NullableContext::Enabled),
        TypeDeclarationFragment::explicit_extension("Q").for_type(c_of(TypeSyntax::int().nullable())),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![
            diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT,
            diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT,
        ]
    );
    let state = program.check_with(
        CheckerOptions::default().suppress(diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT),
    );
    assert!(state.diagnostics().is_empty());
}

#[test]
fn type_constraint_without_conversion() {
    let program = Program::new(vec![
        TypeDeclarationFragment::interface("I"),
        TypeDeclarationFragment::class("Impl").with_base(TypeSyntax::named("I")),
        TypeDeclarationFragment::class("Plain"),
        TypeDeclarationFragment::structure("Value"),
        constrained_c(ConstraintSyntax::Type(TypeSyntax::named("I"))),
        TypeDeclarationFragment::explicit_extension("A").for_type(c_of(TypeSyntax::named("Impl"))),
        TypeDeclarationFragment::explicit_extension("B").for_type(c_of(TypeSyntax::named("Plain"))),
        TypeDeclarationFragment::explicit_extension("V").for_type(c_of(TypeSyntax::named("Value"))),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![
            diagnostic_codes::CONSTRAINT_NOT_SATISFIED_REFERENCE_TYPE,
            diagnostic_codes::CONSTRAINT_NOT_SATISFIED_VALUE_TYPE,
        ]
    );
    assert_eq!(
        messages(state.diagnostics())[0],
        "The type 'Plain' cannot be used as type parameter 'T' in the generic type or method 'C<T>'. There is no implicit reference conversion from 'Plain' to 'I'."
    );
}

#[test]
fn unconstrained_type_parameter_fails_reference_type_constraint_of_underlying_type() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ReferenceType { annotated: false }),
        TypeDeclarationFragment::explicit_extension("R")
            .with_type_parameters(["U"])
            .for_type(c_of(TypeSyntax::named("U"))),
    ]);
    let state = program.check();
    assert_eq!(
        messages(state.diagnostics()),
        vec![
            "The type 'U' must be a reference type in order to use it as parameter 'T' in the generic type or method 'C<T>'"
        ]
    );
}

#[test]
fn type_parameter_without_the_needed_constraint_type() {
    let program = Program::new(vec![
        TypeDeclarationFragment::interface("I"),
        constrained_c(ConstraintSyntax::Type(TypeSyntax::named("I"))),
        TypeDeclarationFragment::explicit_extension("R")
            .with_type_parameters(["U"])
            .for_type(c_of(TypeSyntax::named("U"))),
        TypeDeclarationFragment::explicit_extension("Q")
            .with_type_parameter(
                TypeParameterSyntax::new("U").with_constraint(ConstraintSyntax::Type(TypeSyntax::named("I"))),
            )
            .for_type(c_of(TypeSyntax::named("U"))),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER]
    );
}

#[test]
fn self_referential_constraint_is_satisfied() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::Type(c_of(TypeSyntax::named("T")))),
        TypeDeclarationFragment::class("D").with_base(c_of(TypeSyntax::named("D"))),
    ]);
    let state = program.check();
    assert!(state.diagnostics().is_empty(), "unexpected: {:?}", state.diagnostics());
}

#[test]
fn base_extension_naming_its_own_extension_is_checked_after_sealing() {
    let program = Program::new(vec![
        TypeDeclarationFragment::class("C"),
        TypeDeclarationFragment::explicit_extension("R1")
            .with_type_parameter(
                TypeParameterSyntax::new("T").with_constraint(ConstraintSyntax::Type(TypeSyntax::named("C"))),
            )
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R2")
            .with_type_parameters(["T"])
            .for_type(TypeSyntax::named("C"))
            .with_base(TypeSyntax::generic(
                "R1",
                vec![TypeSyntax::generic("R2", vec![TypeSyntax::named("T")])],
            )),
    ]);
    let state = program.check();
    assert_eq!(
        messages(state.diagnostics()),
        vec![
            "The type 'R2<T>' cannot be used as type parameter 'T' in the generic type or method 'R1<T>'. There is no boxing conversion from 'R2<T>' to 'C'."
        ]
    );
}

#[test]
fn weaker_constraints_fail_through_base_extensions() {
    let with_interfaces = |names: &[&str]| {
        names.iter().fold(TypeParameterSyntax::new("T"), |parameter, name| {
            parameter.with_constraint(ConstraintSyntax::Type(TypeSyntax::named(*name)))
        })
    };
    let r_of_t = |name: &str| TypeSyntax::generic(name, vec![TypeSyntax::named("T")]);
    let program = Program::new(vec![
        TypeDeclarationFragment::class("C"),
        TypeDeclarationFragment::interface("I1"),
        TypeDeclarationFragment::interface("I2"),
        TypeDeclarationFragment::explicit_extension("R1")
            .with_type_parameter(with_interfaces(&["I1", "I2"]))
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R2")
            .with_type_parameter(with_interfaces(&["I2"]))
            .for_type(TypeSyntax::named("C"))
            .with_base(r_of_t("R1")),
        TypeDeclarationFragment::explicit_extension("R3")
            .with_type_parameters(["T"])
            .for_type(TypeSyntax::named("C"))
            .with_bases([r_of_t("R2"), r_of_t("R1")]),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER; 4]
    );
    let mut reported = messages(state.diagnostics());
    reported.sort();
    assert_eq!(
        reported,
        vec![
            "The type 'T' cannot be used as type parameter 'T' in the generic type or method 'R1<T>'. There is no boxing conversion or type parameter conversion from 'T' to 'I1'.",
            "The type 'T' cannot be used as type parameter 'T' in the generic type or method 'R1<T>'. There is no boxing conversion or type parameter conversion from 'T' to 'I1'.",
            "The type 'T' cannot be used as type parameter 'T' in the generic type or method 'R1<T>'. There is no boxing conversion or type parameter conversion from 'T' to 'I2'.",
            "The type 'T' cannot be used as type parameter 'T' in the generic type or method 'R2<T>'. There is no boxing conversion or type parameter conversion from 'T' to 'I2'.",
        ]
    );
}

#[test]
fn pointer_is_not_a_type_argument() {
    let program = Program::new(vec![
        TypeDeclarationFragment::class("C").with_type_parameters(["T"]),
        extension_for(c_of(TypeSyntax::int().pointer())),
    ]);
    let state = program.check();
    assert_eq!(
        messages(state.diagnostics()),
        vec!["The type 'int*' may not be used as a type argument"]
    );
}

#[test]
fn every_site_is_reported() {
    let program = Program::new(vec![
        constrained_c(ConstraintSyntax::ReferenceType { annotated: false }),
        TypeDeclarationFragment::class("Holder")
            .with_member(MemberFragment::field("a", c_of(TypeSyntax::int()).at(10, 6)))
            .with_member(MemberFragment::field("b", c_of(TypeSyntax::int()).at(30, 6))),
    ]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED; 2]
    );
    let starts: Vec<u32> = state.diagnostics().iter().map(|d| d.start).collect();
    assert_eq!(starts, vec![10, 30]);
}

#[test]
fn inconsistent_constraints_across_fragments() {
    let program = Program::new(vec![
        TypeDeclarationFragment::class("C")
            .partial()
            .with_type_parameter(
                TypeParameterSyntax::new("T").with_constraint(ConstraintSyntax::ReferenceType { annotated: false }),
            ),
        TypeDeclarationFragment::class("C")
            .partial()
            .with_type_parameter(TypeParameterSyntax::new("T").with_constraint(ConstraintSyntax::ValueType)),
        TypeDeclarationFragment::class("C").partial().with_type_parameters(["T"]),
    ]);
    let state = program.check();
    assert_eq!(
        messages(state.diagnostics()),
        vec!["Partial declarations of 'C<T>' have inconsistent constraints for type parameter 'T'"]
    );
}
