//! End-to-end tests through the `Compilation` facade.

use xtc::common::diagnostics::diagnostic_codes;
use xtc::{
    CheckerOptions, Compilation, CompilationOptions, MemberFragment, MetadataAssembly, MetadataTypeDef,
    MetadataTypeRef, NullableContext, TypeDeclarationFragment, TypeSyntax, XtcError,
};
use xtc::binder::{ConstraintSyntax, Modifiers, TypeParameterSyntax};
use xtc::solver::ExtensionKind;

fn compile(fragments: Vec<TypeDeclarationFragment>) -> xtc::CompilationResult {
    let mut compilation = Compilation::default();
    compilation.add_fragments(fragments);
    compilation.compile().expect("first compile")
}

fn codes(result: &xtc::CompilationResult) -> Vec<u32> {
    result.diagnostics().iter().map(|d| d.code).collect()
}

fn extension(name: &str) -> TypeDeclarationFragment {
    TypeDeclarationFragment::explicit_extension(name).for_type(TypeSyntax::named("C"))
}

#[test]
fn partial_fragments_with_different_underlying_types() {
    let result = compile(vec![
        TypeDeclarationFragment::class("Alpha"),
        TypeDeclarationFragment::class("Beta"),
        TypeDeclarationFragment::explicit_extension("R")
            .for_type(TypeSyntax::named("Alpha"))
            .partial(),
        TypeDeclarationFragment::explicit_extension("R")
            .for_type(TypeSyntax::named("Beta"))
            .partial()
            .in_file("b.cs"),
    ]);
    assert_eq!(codes(&result), vec![diagnostic_codes::PARTIAL_DIFFERENT_UNDERLYING_TYPES]);
    assert!(result.has_errors());
    let r = result.extension("R").expect("R is an extension");
    assert_eq!(r.extended_type.as_deref(), Some("Alpha"));
    assert!(!r.extended_type_is_error);
    assert_eq!(r.modifier, "explicit");
}

#[test]
fn underlying_type_declared_in_one_fragment_only() {
    let result = compile(vec![
        TypeDeclarationFragment::class("Gamma"),
        TypeDeclarationFragment::implicit_extension("R")
            .for_type(TypeSyntax::named("Gamma"))
            .partial(),
        TypeDeclarationFragment::implicit_extension("R").partial(),
    ]);
    assert!(result.diagnostics().is_empty(), "unexpected: {:?}", result.diagnostics());
    let r = result.extension("R").expect("R is an extension");
    assert_eq!(r.extended_type.as_deref(), Some("Gamma"));
    assert_eq!(r.modifier, "implicit");
}

#[test]
fn cycle_marks_every_edge() {
    let result = compile(vec![
        TypeDeclarationFragment::class("C"),
        extension("X").with_base(TypeSyntax::named("Y")),
        extension("Y").with_base(TypeSyntax::named("Z")),
        extension("Z").with_base(TypeSyntax::named("X")),
    ]);
    assert_eq!(codes(&result), vec![diagnostic_codes::CYCLE_IN_BASE_EXTENSIONS; 3]);
    for (name, base) in [("X", "Y"), ("Y", "Z"), ("Z", "X")] {
        let view = result.extension(name).expect("extension view");
        assert_eq!(view.base_names(), vec![base]);
        assert!(view.base_extensions[0].in_cycle, "{name} -> {base}");
    }
}

#[test]
fn instance_state_is_reported_and_static_state_is_not() {
    let result = compile(vec![
        TypeDeclarationFragment::class("C"),
        extension("R")
            .with_member(MemberFragment::field("count", TypeSyntax::int()).with_modifiers(Modifiers::STATIC))
            .with_member(MemberFragment::field("f", TypeSyntax::int()).at(40, 1))
            .with_member(MemberFragment::method("M").with_modifiers(Modifiers::PUBLIC)),
    ]);
    assert_eq!(codes(&result), vec![diagnostic_codes::STATE_IN_EXTENSION]);
    assert_eq!(result.diagnostics()[0].start, 40);

    let r = result.extension("R").expect("R is an extension");
    let names: Vec<_> = r.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["count", "f", "M"]);
    let count = r.member("count").expect("count bound");
    assert!(count.is_static && count.has_state);
    assert_eq!(count.kind, "field");
    assert_eq!(count.accessibility, "private");
    let m = r.member("M").expect("M bound");
    assert_eq!((m.kind, m.accessibility, m.has_state), ("method", "public", false));
}

#[test]
fn constraint_violation_in_underlying_type() {
    let result = compile(vec![
        TypeDeclarationFragment::class("C").with_type_parameter(
            TypeParameterSyntax::new("T").with_constraint(ConstraintSyntax::ReferenceType { annotated: false }),
        ),
        TypeDeclarationFragment::explicit_extension("R")
            .for_type(TypeSyntax::generic("C", vec![TypeSyntax::int()])),
    ]);
    assert_eq!(
        codes(&result),
        vec![diagnostic_codes::REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED]
    );
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.warning_count(), 0);
    assert_eq!(
        result.extension("R").and_then(|r| r.extended_type.as_deref()),
        Some("C<int>")
    );
}

#[test]
fn generic_extensions_are_looked_up_by_display_name() {
    let result = compile(vec![
        TypeDeclarationFragment::class("C").with_type_parameters(["T"]),
        TypeDeclarationFragment::explicit_extension("R1")
            .with_type_parameters(["U"])
            .for_type(TypeSyntax::generic("C", vec![TypeSyntax::named("U")])),
    ]);
    assert!(result.extension("R1").is_none());
    let r1 = result.extension("R1<U>").expect("found by display name");
    assert_eq!(r1.extended_type.as_deref(), Some("C<U>"));
    assert_eq!(result.extensions().len(), 1);
}

#[test]
fn nullable_warning_respects_options() {
    let fragments = || {
        vec![
            TypeDeclarationFragment::class("C")
                .with_type_parameter(TypeParameterSyntax::new("T").with_constraint(ConstraintSyntax::NotNull)),
            TypeDeclarationFragment::explicit_extension("R")
                .for_type(TypeSyntax::generic("C", vec![TypeSyntax::string().nullable()])),
        ]
    };
    let enabled = CheckerOptions::default().with_nullable_context(NullableContext::Enabled);

    let mut warned = Compilation::new(CompilationOptions::new(enabled.clone()));
    let result = warned.add_fragments(fragments()).compile().expect("compile");
    assert_eq!(result.warning_count(), 1);
    assert!(!result.has_errors());

    let mut promoted = Compilation::new(CompilationOptions::new(enabled.clone().with_warnings_as_errors(true)));
    let result = promoted.add_fragments(fragments()).compile().expect("compile");
    assert_eq!((result.error_count(), result.warning_count()), (1, 0));

    let mut silenced = Compilation::new(CompilationOptions::new(
        enabled.suppress(diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT),
    ));
    let result = silenced.add_fragments(fragments()).compile().expect("compile");
    assert!(result.diagnostics().is_empty());
}

#[test]
fn options_load_from_json() {
    let options = CompilationOptions::from_json_str(
        r#"{ "warningsAsErrors": true, "suppressedCodes": [8714], "nullableContextDefault": "enabled" }"#,
    )
    .expect("valid options");
    assert!(options.checker.warnings_as_errors);
    assert_eq!(options.checker.suppressed_codes, vec![8714]);
    assert_eq!(options.checker.nullable_context_default, Some(NullableContext::Enabled));

    assert!(matches!(
        CompilationOptions::from_json_str(r#"{ "suppressedCodes": [424242] }"#),
        Err(XtcError::UnknownDiagnosticCode(424242))
    ));
    assert!(matches!(
        CompilationOptions::from_json_str("{ not json"),
        Err(XtcError::Json(_))
    ));
}

#[test]
fn unknown_suppressed_code_fails_compile() {
    let mut compilation = Compilation::new(CompilationOptions::new(CheckerOptions::default().suppress(1)));
    compilation.add_fragment(TypeDeclarationFragment::class("C"));
    assert!(matches!(
        compilation.compile(),
        Err(XtcError::UnknownDiagnosticCode(1))
    ));
}

#[test]
fn a_compilation_compiles_once() {
    let mut compilation = Compilation::default();
    compilation.add_fragment(TypeDeclarationFragment::class("C"));
    assert!(compilation.compile().is_ok());
    let err = compilation.compile().expect_err("second compile");
    assert!(matches!(err, XtcError::AlreadyCompiled));
    assert_eq!(err.to_string(), "this compilation has already been compiled");
}

#[test]
fn referenced_extensions_are_usable_bases() {
    let assembly = MetadataAssembly::new("Lib")
        .with_type(MetadataTypeDef::class("C"))
        .with_type(MetadataTypeDef::extension(
            "Base",
            ExtensionKind::Explicit,
            MetadataTypeRef::named("C"),
            Vec::new(),
        ));
    let mut compilation = Compilation::default();
    compilation
        .add_reference(assembly)
        .add_fragment(extension("R").with_base(TypeSyntax::named("Base")));
    let result = compilation.compile().expect("compile");
    assert!(result.diagnostics().is_empty(), "unexpected: {:?}", result.diagnostics());

    let r = result.extension("R").expect("R is an extension");
    assert_eq!(r.base_names(), vec!["Base"]);
    assert!(!r.base_extensions[0].underlying_mismatch);
    // Imported types are not source extensions.
    assert!(result.extension("Base").is_none());
}

#[test]
fn result_serializes_to_json() {
    let result = compile(vec![
        TypeDeclarationFragment::class("C"),
        extension("R").with_member(MemberFragment::field("f", TypeSyntax::int())),
    ]);
    let json = result.to_json_string().expect("serializable");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["diagnostics"][0]["code"], diagnostic_codes::STATE_IN_EXTENSION);
    let r = &value["extensions"][0];
    assert_eq!(r["name"], "R");
    assert_eq!(r["extendedType"], "C");
    assert_eq!(r["baseExtensions"], serde_json::json!([]));
    assert_eq!(r["members"][0]["hasState"], true);
    assert!(value.get("byName").is_none());
}
