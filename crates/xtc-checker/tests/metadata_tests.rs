use crate::test_utils::{Program, bases, codes, extended, messages};
use crate::{
    MetadataAssembly, MetadataAttribute, MetadataMethod, MetadataTypeDef, MetadataTypeParameter,
    MetadataTypeRef, SymbolLookup, import_assemblies,
};
use std::sync::Arc;
use xtc_binder::{ConstraintSyntax, TypeDeclarationFragment, TypeSyntax};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_common::{Atom, Interner};
use xtc_solver::{DefinitionStore, ExtensionKind, TypeInterner};

fn library(types: Vec<MetadataTypeDef>) -> MetadataAssembly {
    types
        .into_iter()
        .fold(MetadataAssembly::new("Lib"), MetadataAssembly::with_type)
}

fn imported_extension(name: &str) -> MetadataTypeDef {
    MetadataTypeDef::extension(name, ExtensionKind::Explicit, MetadataTypeRef::named("C"), Vec::new())
}

/// `R for C : <base>` in source.
fn source_extension_with_base(base: &str) -> TypeDeclarationFragment {
    TypeDeclarationFragment::explicit_extension("R")
        .for_type(TypeSyntax::named("C"))
        .with_base(TypeSyntax::named(base).at(12, base.len() as u32))
}

#[test]
fn imported_extension_is_a_usable_base() {
    let assembly = library(vec![MetadataTypeDef::class("C"), imported_extension("Base")]);
    let program = Program::with_references(vec![source_extension_with_base("Base")], &[assembly]);
    let state = program.check();
    assert!(state.diagnostics().is_empty(), "unexpected: {:?}", state.diagnostics());
    assert_eq!(extended(&state, &program, "R").as_deref(), Some("C"));
    assert_eq!(bases(&state, &program, "R"), vec!["Base"]);
}

#[test]
fn imported_extension_with_other_underlying_type_is_a_mismatch() {
    let assembly = library(vec![
        MetadataTypeDef::class("C"),
        MetadataTypeDef::class("D"),
        MetadataTypeDef::extension("Base", ExtensionKind::Implicit, MetadataTypeRef::named("D"), Vec::new()),
    ]);
    let program = Program::with_references(vec![source_extension_with_base("Base")], &[assembly]);
    let state = program.check();
    assert_eq!(codes(state.diagnostics()), vec![diagnostic_codes::UNDERLYING_TYPES_MISMATCH]);
}

#[test]
fn imported_class_is_not_a_base_extension() {
    let assembly = library(vec![MetadataTypeDef::class("C"), MetadataTypeDef::class("NotExt")]);
    let program = Program::with_references(vec![source_extension_with_base("NotExt")], &[assembly]);
    let state = program.check();
    assert_eq!(
        codes(state.diagnostics()),
        vec![diagnostic_codes::BASE_EXTENSION_MUST_BE_EXTENSION]
    );
}

#[test]
fn malformed_markers_are_reported_at_every_use() {
    let marker = |method: MetadataMethod| {
        MetadataTypeDef::structure("Bad")
            .with_method(method)
            .with_attribute(MetadataAttribute::extension_obsolete())
    };
    let malformed = [
        // instance marker
        marker(
            MetadataMethod::new("<ExplicitExtension>$", MetadataTypeRef::void())
                .with_parameter(MetadataTypeRef::named("C")),
        ),
        // custom modifier on the underlying type
        marker(
            MetadataMethod::new("<ExplicitExtension>$", MetadataTypeRef::void())
                .with_static()
                .with_modified_parameter(MetadataTypeRef::named("C")),
        ),
        // non-void marker
        marker(
            MetadataMethod::new("<ImplicitExtension>$", MetadataTypeRef::named("C"))
                .with_static()
                .with_parameter(MetadataTypeRef::named("C")),
        ),
        // no underlying type
        marker(MetadataMethod::new("<ExplicitExtension>$", MetadataTypeRef::void()).with_static()),
        // obsolete attribute without a marker
        MetadataTypeDef::structure("Bad").with_attribute(MetadataAttribute::extension_obsolete()),
        // class-shaped extension
        MetadataTypeDef::class("Bad").with_method(
            MetadataMethod::new("<ExplicitExtension>$", MetadataTypeRef::void())
                .with_static()
                .with_parameter(MetadataTypeRef::named("C")),
        ),
        // base that is not an extension
        MetadataTypeDef::extension(
            "Bad",
            ExtensionKind::Explicit,
            MetadataTypeRef::named("C"),
            vec![MetadataTypeRef::named("C")],
        ),
    ];
    for (case, bad) in malformed.into_iter().enumerate() {
        let assembly = library(vec![MetadataTypeDef::class("C"), bad]);
        let program = Program::with_references(
            vec![
                source_extension_with_base("Bad"),
                TypeDeclarationFragment::class("Holder").with_member(xtc_binder::MemberFragment::field(
                    "f",
                    TypeSyntax::named("Bad"),
                )),
            ],
            &[assembly],
        );
        let state = program.check();
        let malformed_uses = state
            .diagnostics()
            .iter()
            .filter(|d| d.code == diagnostic_codes::MALFORMED_METADATA_EXTENSION)
            .count();
        assert_eq!(malformed_uses, 2, "case {case}: {:?}", state.diagnostics());
        assert!(
            messages(state.diagnostics())
                .contains(&"'Bad' is an extension type from metadata that is malformed and cannot be used.".to_string()),
            "case {case}"
        );
    }
}

#[test]
fn marker_without_obsolete_attribute_is_accepted() {
    let ext = MetadataTypeDef::structure("Base").with_method(
        MetadataMethod::new("<ExplicitExtension>$", MetadataTypeRef::void())
            .with_static()
            .with_parameter(MetadataTypeRef::named("C")),
    );
    let assembly = library(vec![MetadataTypeDef::class("C"), ext]);
    let program = Program::with_references(vec![source_extension_with_base("Base")], &[assembly]);
    let state = program.check();
    assert!(state.diagnostics().is_empty(), "unexpected: {:?}", state.diagnostics());
}

#[test]
fn types_from_an_assembly_with_errors_are_reported_at_use() {
    let assembly = library(vec![MetadataTypeDef::class("C")]).with_errors();
    let program = Program::with_references(
        vec![TypeDeclarationFragment::explicit_extension("R").for_type(TypeSyntax::named("C").at(5, 1))],
        &[assembly],
    );
    let state = program.check();
    assert_eq!(
        messages(state.diagnostics()),
        vec!["The type 'C' is defined in an assembly that is not referenced or contains errors: 'Lib'."]
    );
    assert_eq!(state.diagnostics()[0].start, 5);
    let shape = crate::test_utils::shape(&state, &program, "R");
    assert!(shape.extended_type.is_some_and(|e| e.is_error));
}

#[test]
fn references_into_missing_assemblies_become_placeholders() {
    let base = MetadataTypeDef::class("Derived")
        .with_base_type(MetadataTypeRef::qualified(Some("Missing"), "", "Gone", Vec::new()));
    let ext = MetadataTypeDef::extension(
        "Base",
        ExtensionKind::Explicit,
        MetadataTypeRef::qualified(Some("Missing"), "", "Gone", Vec::new()),
        Vec::new(),
    );
    let assembly = library(vec![base, ext]);

    let interner = Arc::new(Interner::new());
    let types = TypeInterner::new(interner.clone());
    let defs = DefinitionStore::new();
    let table = import_assemblies(&types, &defs, &[assembly]);
    assert_eq!(table.len(), 2);
    assert!(table.lookup_type(Atom::NONE, interner.intern("Gone"), 0).is_none());

    let base_def = table
        .lookup_type(Atom::NONE, interner.intern("Base"), 0)
        .expect("Base imported");
    let shape = defs.get_extension_shape(base_def).expect("shape sealed on import");
    let extended = shape.extended_type.expect("underlying type");
    let (gone, _) = types.named_def(extended.ty.ty).expect("placeholder definition");
    assert!(defs.get(gone).is_some_and(|info| info.use_site_error.is_some()));

    // Both references share the placeholder.
    let derived = table
        .lookup_type(Atom::NONE, interner.intern("Derived"), 0)
        .expect("Derived imported");
    let base_class = defs.get(derived).and_then(|info| info.base_class).expect("base class");
    assert_eq!(types.named_def(base_class.ty).map(|(def, _)| def), Some(gone));
}

#[test]
fn imported_constraints_are_checked() {
    let mut param = MetadataTypeParameter::new("T");
    param.reference_type = true;
    let generic = MetadataTypeDef::class("G").with_type_parameter(param);
    let assembly = library(vec![generic]);
    let program = Program::with_references(
        vec![
            TypeDeclarationFragment::explicit_extension("R")
                .for_type(TypeSyntax::generic("G", vec![TypeSyntax::int()])),
        ],
        &[assembly],
    );
    let state = program.check();
    assert_eq!(
        messages(state.diagnostics()),
        vec![
            "The type 'int' must be a reference type in order to use it as parameter 'T' in the generic type or method 'G<T>'"
        ]
    );
}

#[test]
fn source_declarations_shadow_imported_ones() {
    let assembly = library(vec![MetadataTypeDef::structure("C")]);
    let program = Program::with_references(
        vec![
            TypeDeclarationFragment::class("C"),
            TypeDeclarationFragment::class("G")
                .with_type_parameter(
                    xtc_binder::TypeParameterSyntax::new("T")
                        .with_constraint(ConstraintSyntax::ReferenceType { annotated: false }),
                ),
            TypeDeclarationFragment::explicit_extension("R")
                .for_type(TypeSyntax::generic("G", vec![TypeSyntax::named("C")])),
        ],
        &[assembly],
    );
    let state = program.check();
    assert!(state.diagnostics().is_empty(), "unexpected: {:?}", state.diagnostics());
}
