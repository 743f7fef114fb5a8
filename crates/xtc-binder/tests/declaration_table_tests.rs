use crate::{
    DeclarationTable, MemberDeclKind, MemberFragment, Modifiers, SymbolArena, TypeDeclarationFragment,
    TypeKind, TypeParameterSyntax, TypeSyntax,
};
use crate::symbols::Container;
use std::sync::Arc;
use xtc_common::diagnostics::diagnostic_codes;
use xtc_common::{Accessibility, Diagnostic, Interner};

fn merge(fragments: Vec<TypeDeclarationFragment>) -> (Arc<Interner>, SymbolArena, Vec<Diagnostic>) {
    let interner = Arc::new(Interner::new());
    let (arena, diagnostics) = DeclarationTable::merge(interner.clone(), fragments);
    (interner, arena, diagnostics)
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}

fn global_symbol<'a>(
    interner: &Interner,
    arena: &'a SymbolArena,
    name: &str,
    arity: u32,
) -> &'a crate::MergedTypeSymbol {
    let id = arena
        .lookup(Container::Namespace(xtc_common::Atom::NONE), interner.intern(name), arity)
        .unwrap_or_else(|| panic!("symbol {name} not found"));
    arena.get(id).expect("symbol in arena")
}

#[test]
fn partial_fragments_merge_into_one_symbol() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::class("C"),
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .for_type(TypeSyntax::named("C"))
            .with_member(MemberFragment::method("M1")),
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .with_member(MemberFragment::method("M2"))
            .in_file("b.cs"),
    ]);
    assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
    assert_eq!(arena.len(), 2);
    let r = global_symbol(&interner, &arena, "R", 0);
    assert_eq!(r.fragments.len(), 2);
    let member_names: Vec<_> = r.members.iter().map(|m| interner.resolve(m.name).to_string()).collect();
    assert_eq!(member_names, vec!["M1", "M2"]);
    assert_eq!(r.members[1].fragment, 1);
    assert_eq!(r.accessibility, Accessibility::Internal);
}

#[test]
fn non_partial_duplicate_is_reported_and_not_merged() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R").for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R")
            .for_type(TypeSyntax::named("D"))
            .at(40, 1),
    ]);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::DUPLICATE_NAME_IN_NAMESPACE]);
    assert_eq!(
        diagnostics[0].message_text,
        "The namespace '<global namespace>' already contains a definition for 'R'"
    );
    assert_eq!(diagnostics[0].start, 40);
    let r = global_symbol(&interner, &arena, "R", 0);
    assert_eq!(r.fragments.len(), 1);
}

#[test]
fn missing_partial_modifier_is_reported_on_the_non_partial_fragment() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R").at(30, 1),
    ]);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::MISSING_PARTIAL_MODIFIER]);
    assert_eq!(diagnostics[0].start, 30);
    assert_eq!(global_symbol(&interner, &arena, "R", 0).fragments.len(), 1);
}

#[test]
fn partial_kind_conflict_is_reported() {
    let (_, _, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::class("R").partial(),
    ]);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::PARTIAL_DECLARATIONS_KIND_CONFLICT]
    );
}

#[test]
fn different_arity_does_not_collide() {
    let (_, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R").for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R")
            .with_type_parameters(["T"])
            .for_type(TypeSyntax::named("C")),
    ]);
    assert!(diagnostics.is_empty());
    assert_eq!(arena.len(), 2);
}

#[test]
fn missing_underlying_type_is_reported_once() {
    let fragments = (0..5)
        .map(|_| TypeDeclarationFragment::explicit_extension("R").partial())
        .collect();
    let (interner, arena, diagnostics) = merge(fragments);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::EXTENSION_MISSING_UNDERLYING_TYPE]
    );
    assert_eq!(global_symbol(&interner, &arena, "R", 0).fragments.len(), 5);
}

#[test]
fn extension_modifier_mismatch_is_reported_per_offending_fragment() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::implicit_extension("R").partial().at(10, 1),
        TypeDeclarationFragment::implicit_extension("R").partial().at(20, 1),
        TypeDeclarationFragment::explicit_extension("R").partial().at(30, 1),
    ]);
    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::PARTIAL_DIFFERENT_EXTENSION_MODIFIERS,
            diagnostic_codes::PARTIAL_DIFFERENT_EXTENSION_MODIFIERS
        ]
    );
    let starts: Vec<u32> = diagnostics.iter().map(|d| d.start).collect();
    assert_eq!(starts, vec![10, 20]);
    let r = global_symbol(&interner, &arena, "R", 0);
    assert_eq!(r.extension_modifier, Some(crate::ExtensionModifier::Explicit));
    assert_eq!(r.fragments.len(), 4);
}

#[test]
fn conflicting_accessibility_keeps_first_value() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .with_modifiers(Modifiers::PUBLIC)
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .with_modifiers(Modifiers::INTERNAL),
        TypeDeclarationFragment::explicit_extension("R").partial(),
    ]);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::PARTIAL_DECLARATIONS_ACCESSIBILITY_CONFLICT]
    );
    let r = global_symbol(&interner, &arena, "R", 0);
    assert_eq!(r.accessibility, Accessibility::Public);
    assert!(r.has_explicit_accessibility);
}

#[test]
fn type_parameter_names_must_match() {
    let (_, _, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .with_type_parameters(["T"])
            .for_type(TypeSyntax::named("C")),
        TypeDeclarationFragment::explicit_extension("R")
            .partial()
            .with_type_parameter(TypeParameterSyntax::new("U")),
    ]);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::PARTIAL_DECLARATIONS_TYPE_PARAMETER_NAMES]
    );
    assert!(diagnostics[0].message_text.contains("'R<T>'"));
}

#[test]
fn private_at_namespace_scope_is_rejected() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .with_modifiers(Modifiers::PRIVATE)
            .for_type(TypeSyntax::named("C")),
    ]);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::NAMESPACE_ELEMENT_CANNOT_BE_PRIVATE]
    );
    assert_eq!(
        global_symbol(&interner, &arena, "R", 0).accessibility,
        Accessibility::Internal
    );
}

#[test]
fn invalid_type_modifiers_are_reported_and_not_honored() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::explicit_extension("R")
            .with_modifiers(Modifiers::SEALED | Modifiers::ABSTRACT | Modifiers::READONLY)
            .for_type(TypeSyntax::named("C")),
    ]);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "The modifier 'abstract' is not valid for this item",
            "The modifier 'sealed' is not valid for this item",
            "The modifier 'readonly' is not valid for this item",
        ]
    );
    let r = global_symbol(&interner, &arena, "R", 0);
    assert!(!r.is_abstract);
    assert!(!r.is_sealed);
}

#[test]
fn file_local_type_cannot_have_accessibility() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::class("C").with_modifiers(Modifiers::FILE | Modifiers::PUBLIC),
    ]);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::FILE_TYPE_WITH_ACCESSIBILITY]
    );
    assert!(global_symbol(&interner, &arena, "C", 0).is_file_local);
}

#[test]
fn nested_types_merge_under_their_container() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::class("C")
            .partial()
            .with_nested(TypeDeclarationFragment::class("Inner").partial())
            .with_member(MemberFragment::method("M")),
        TypeDeclarationFragment::class("C")
            .partial()
            .with_nested(TypeDeclarationFragment::class("Inner").partial()),
        TypeDeclarationFragment::class("D")
            .with_nested(TypeDeclarationFragment::class("N").with_modifiers(Modifiers::FILE)),
    ]);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::FILE_TYPE_NESTED]);
    let c = global_symbol(&interner, &arena, "C", 0);
    assert_eq!(c.nested_types.len(), 1);
    let inner = arena.get(c.nested_types[0]).expect("nested symbol");
    assert_eq!(inner.fragments.len(), 2);
    assert_eq!(inner.container, Container::Type(c.id));
    assert_eq!(inner.accessibility, Accessibility::Private);
    assert!(matches!(c.members[0].kind, MemberDeclKind::NestedType(_)));
    assert_eq!(c.members.len(), 2);
}

#[test]
fn duplicate_nested_type_reports_type_scope_duplicate() {
    let (_, _, diagnostics) = merge(vec![
        TypeDeclarationFragment::class("C")
            .with_nested(TypeDeclarationFragment::class("X"))
            .with_nested(TypeDeclarationFragment::structure("X")),
    ]);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::DUPLICATE_NAME_IN_TYPE]);
    assert_eq!(
        diagnostics[0].message_text,
        "The type 'C' already contains a definition for 'X'"
    );
}

#[test]
fn ref_struct_and_static_flags_are_recorded() {
    let (interner, arena, diagnostics) = merge(vec![
        TypeDeclarationFragment::structure("S").with_modifiers(Modifiers::REF),
        TypeDeclarationFragment::class("U").with_modifiers(Modifiers::STATIC),
        TypeDeclarationFragment::explicit_extension("R")
            .with_modifiers(Modifiers::STATIC)
            .for_type(TypeSyntax::named("U")),
    ]);
    assert!(diagnostics.is_empty());
    assert!(global_symbol(&interner, &arena, "S", 0).is_ref_like);
    assert!(global_symbol(&interner, &arena, "U", 0).is_static);
    let r = global_symbol(&interner, &arena, "R", 0);
    assert!(r.is_static);
    assert_eq!(r.kind, TypeKind::Extension);
}

#[test]
fn fragments_deserialize_from_json() {
    let json = r#"{
        "name": "R",
        "kind": "extension",
        "extensionModifier": "implicit",
        "underlyingType": { "kind": { "predefined": "int" } },
        "members": [
            { "name": "f", "kind": "field", "modifiers": "STATIC", "ty": { "kind": { "predefined": "int" } } }
        ]
    }"#;
    let fragment: TypeDeclarationFragment = serde_json::from_str(json).expect("valid fragment json");
    assert_eq!(fragment.kind, TypeKind::Extension);
    assert_eq!(fragment.extension_modifier, Some(crate::ExtensionModifier::Implicit));
    assert!(fragment.members[0].modifiers.contains(Modifiers::STATIC));
    assert_eq!(fragment.underlying_type, Some(TypeSyntax::int()));
}

#[test]
fn sealing_under_a_debug_subscriber_logs_and_merges() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let (interner, arena, diagnostics) = merge(vec![
            TypeDeclarationFragment::class("C"),
            TypeDeclarationFragment::explicit_extension("R")
                .partial()
                .for_type(TypeSyntax::named("C")),
            TypeDeclarationFragment::explicit_extension("R")
                .partial()
                .with_member(MemberFragment::method("M")),
        ]);
        assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
        let r = global_symbol(&interner, &arena, "R", 0);
        assert_eq!(r.fragments.len(), 2);
        assert_eq!(r.members.len(), 1);
    });
}
