//! Declaration table: groups fragments and seals them into merged symbols.
//!
//! Merging is a builder pattern. `add_fragment` only accumulates; `seal`
//! validates every group once and produces the immutable `SymbolArena`, so no
//! reader can observe a half-merged symbol.

use crate::modifiers::{
    AccessibilityModifiers, DeclarationScope, Modifiers, allowed_type_modifiers,
    default_type_accessibility, is_type_accessibility_allowed,
};
use crate::symbols::{
    Container, FragmentInfo, MemberDecl, MemberDeclKind, MergedTypeSymbol, SymbolArena, SymbolId,
    TypeParameterDecl,
};
use crate::syntax::{ExtensionModifier, MemberFragment, MemberKind, TypeDeclarationFragment, TypeKind};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_common::limits::MAX_NESTED_TYPE_DEPTH;
use xtc_common::{Accessibility, Atom, Diagnostic, Interner, Span};

/// Display name used for the global namespace in diagnostics.
pub const GLOBAL_NAMESPACE_DISPLAY: &str = "<global namespace>";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GroupKey {
    container: Container,
    name: Atom,
    arity: u32,
}

/// Accumulates fragments across source inputs until `seal` is called.
pub struct DeclarationTable {
    interner: Arc<Interner>,
    groups: IndexMap<GroupKey, Vec<TypeDeclarationFragment>>,
    fragment_count: usize,
}

impl DeclarationTable {
    pub fn new(interner: Arc<Interner>) -> Self {
        DeclarationTable {
            interner,
            groups: IndexMap::new(),
            fragment_count: 0,
        }
    }

    /// Merge a complete set of fragments in one call.
    pub fn merge(
        interner: Arc<Interner>,
        fragments: impl IntoIterator<Item = TypeDeclarationFragment>,
    ) -> (SymbolArena, Vec<Diagnostic>) {
        let mut table = DeclarationTable::new(interner);
        for fragment in fragments {
            table.add_fragment(fragment);
        }
        table.seal()
    }

    pub fn add_fragment(&mut self, fragment: TypeDeclarationFragment) {
        let namespace = self.interner.intern(&fragment.namespace);
        let key = GroupKey {
            container: Container::Namespace(namespace),
            name: self.interner.intern(&fragment.name),
            arity: fragment.arity(),
        };
        trace!(name = %fragment.name, file = %fragment.file, "add fragment");
        self.fragment_count += 1;
        self.groups.entry(key).or_default().push(fragment);
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Validate and merge every group, producing the sealed arena and the
    /// diagnostics found while merging.
    pub fn seal(self) -> (SymbolArena, Vec<Diagnostic>) {
        let mut sealer = Sealer {
            interner: self.interner,
            arena: SymbolArena::new(),
            diagnostics: Vec::new(),
        };
        for (key, fragments) in self.groups {
            let namespace = match key.container {
                Container::Namespace(ns) => ns,
                Container::Type(_) => Atom::NONE,
            };
            sealer.seal_group(key, fragments, DeclarationScope::Namespace, namespace, 0);
        }
        debug!(
            symbols = sealer.arena.len(),
            diagnostics = sealer.diagnostics.len(),
            "declaration table sealed"
        );
        (sealer.arena, sealer.diagnostics)
    }
}

// =============================================================================
// Sealing
// =============================================================================

/// A member slot in declaration order; nested groups are filled in after the
/// nested symbols are sealed.
enum MemberSlot {
    Member(MemberDecl),
    Nested {
        key: GroupKey,
        fragment: usize,
        name_span: Span,
        modifiers: Modifiers,
    },
}

struct Sealer {
    interner: Arc<Interner>,
    arena: SymbolArena,
    diagnostics: Vec<Diagnostic>,
}

impl Sealer {
    fn report(&mut self, file: &str, span: Span, code: u32, args: &[&str]) {
        self.diagnostics.push(Diagnostic::from_code(
            file.to_string(),
            span.start,
            span.len(),
            code,
            args,
        ));
    }

    /// `C.R<T>`-style display of a declaration about to be sealed.
    fn display_name(&self, container: Container, fragment: &TypeDeclarationFragment) -> String {
        let mut out = match container {
            Container::Type(id) => {
                let mut prefix = self.symbol_display(id);
                prefix.push('.');
                prefix
            }
            Container::Namespace(ns) if !ns.is_none() => {
                format!("{}.", self.interner.resolve(ns))
            }
            Container::Namespace(_) => String::new(),
        };
        out.push_str(&fragment.name);
        if !fragment.type_parameters.is_empty() {
            out.push('<');
            for (i, tp) in fragment.type_parameters.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&tp.name);
            }
            out.push('>');
        }
        out
    }

    fn symbol_display(&self, id: SymbolId) -> String {
        let Some(symbol) = self.arena.get(id) else {
            return String::new();
        };
        let mut out = match symbol.container {
            Container::Type(parent) => {
                let mut prefix = self.symbol_display(parent);
                prefix.push('.');
                prefix
            }
            Container::Namespace(ns) if !ns.is_none() => {
                format!("{}.", self.interner.resolve(ns))
            }
            Container::Namespace(_) => String::new(),
        };
        out.push_str(&self.interner.resolve(symbol.name));
        if !symbol.type_parameters.is_empty() {
            out.push('<');
            for (i, tp) in symbol.type_parameters.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.interner.resolve(tp.name));
            }
            out.push('>');
        }
        out
    }

    fn report_duplicate(&mut self, container: Container, fragment: &TypeDeclarationFragment) {
        match container {
            Container::Namespace(ns) => {
                let ns_display = if ns.is_none() {
                    GLOBAL_NAMESPACE_DISPLAY.to_string()
                } else {
                    self.interner.resolve(ns).to_string()
                };
                self.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::DUPLICATE_NAME_IN_NAMESPACE,
                    &[&fragment.name, &ns_display],
                );
            }
            Container::Type(id) => {
                let container_display = self.symbol_display(id);
                self.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::DUPLICATE_NAME_IN_TYPE,
                    &[&container_display, &fragment.name],
                );
            }
        }
    }

    /// Decide which fragments of a group take part in the merge.
    fn partition(
        &mut self,
        container: Container,
        fragments: Vec<TypeDeclarationFragment>,
    ) -> Vec<TypeDeclarationFragment> {
        let mut iter = fragments.into_iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };
        let mut accepted = vec![first];
        let mut missing_partial_on_first = false;
        for fragment in iter {
            let first = &accepted[0];
            match (first.is_partial(), fragment.is_partial()) {
                (true, true) => {
                    if fragment.kind != first.kind {
                        let display = self.display_name(container, &fragment);
                        self.report(
                            &fragment.file,
                            fragment.name_span,
                            diagnostic_codes::PARTIAL_DECLARATIONS_KIND_CONFLICT,
                            &[&display],
                        );
                        continue;
                    }
                    accepted.push(fragment);
                }
                (true, false) => {
                    self.report(
                        &fragment.file,
                        fragment.name_span,
                        diagnostic_codes::MISSING_PARTIAL_MODIFIER,
                        &[&fragment.name],
                    );
                }
                (false, true) => {
                    if !missing_partial_on_first {
                        missing_partial_on_first = true;
                        let (file, span, name) =
                            (first.file.clone(), first.name_span, first.name.clone());
                        self.report(
                            &file,
                            span,
                            diagnostic_codes::MISSING_PARTIAL_MODIFIER,
                            &[&name],
                        );
                    }
                }
                (false, false) => self.report_duplicate(container, &fragment),
            }
        }
        accepted
    }

    /// Validate the modifiers written on one type fragment. Returns the
    /// explicitly declared accessibility (if valid) and the honored modifiers.
    fn validate_type_modifiers(
        &mut self,
        fragment: &TypeDeclarationFragment,
        scope: DeclarationScope,
    ) -> (Option<Accessibility>, Modifiers) {
        let allowed = allowed_type_modifiers(fragment.kind, scope);
        let mut honored = Modifiers::empty();
        for (flag, keyword) in fragment.modifiers.non_accessibility_flags() {
            if flag == Modifiers::FILE && matches!(scope, DeclarationScope::Type(_)) {
                self.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::FILE_TYPE_NESTED,
                    &[&fragment.name],
                );
            } else if allowed.contains(flag) {
                honored |= flag;
            } else {
                self.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::MODIFIER_NOT_VALID_FOR_ITEM,
                    &[keyword],
                );
            }
        }

        let declared = match fragment.modifiers.accessibility() {
            AccessibilityModifiers::None => None,
            AccessibilityModifiers::Conflicting => {
                self.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::MORE_THAN_ONE_PROTECTION_MODIFIER,
                    &[],
                );
                None
            }
            AccessibilityModifiers::Declared(accessibility) => {
                if honored.contains(Modifiers::FILE) {
                    self.report(
                        &fragment.file,
                        fragment.name_span,
                        diagnostic_codes::FILE_TYPE_WITH_ACCESSIBILITY,
                        &[&fragment.name],
                    );
                    None
                } else if !is_type_accessibility_allowed(accessibility, scope) {
                    if scope == DeclarationScope::Namespace {
                        self.report(
                            &fragment.file,
                            fragment.name_span,
                            diagnostic_codes::NAMESPACE_ELEMENT_CANNOT_BE_PRIVATE,
                            &[],
                        );
                    } else {
                        self.report(
                            &fragment.file,
                            fragment.name_span,
                            diagnostic_codes::MODIFIER_NOT_VALID_FOR_ITEM,
                            &[accessibility.as_str()],
                        );
                    }
                    None
                } else {
                    Some(accessibility)
                }
            }
        };
        (declared, honored)
    }

    fn seal_group(
        &mut self,
        key: GroupKey,
        fragments: Vec<TypeDeclarationFragment>,
        scope: DeclarationScope,
        namespace: Atom,
        depth: u32,
    ) -> Option<SymbolId> {
        if depth > MAX_NESTED_TYPE_DEPTH {
            warn!(depth, "nested type depth limit exceeded; group dropped");
            return None;
        }
        let fragments = self.partition(key.container, fragments);
        let first = fragments.first()?;
        let type_display = self.display_name(key.container, first);
        let kind = first.kind;

        // Modifiers and accessibility
        let mut declared_accessibility: Option<Accessibility> = None;
        let mut accessibility_conflict_reported = false;
        let mut honored = Modifiers::empty();
        for fragment in &fragments {
            let (declared, fragment_honored) = self.validate_type_modifiers(fragment, scope);
            honored |= fragment_honored;
            if let Some(accessibility) = declared {
                match declared_accessibility {
                    None => declared_accessibility = Some(accessibility),
                    Some(existing) if existing != accessibility => {
                        if !accessibility_conflict_reported {
                            accessibility_conflict_reported = true;
                            self.report(
                                &fragment.file,
                                fragment.name_span,
                                diagnostic_codes::PARTIAL_DECLARATIONS_ACCESSIBILITY_CONFLICT,
                                &[&type_display],
                            );
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        // Extension modifier: first-seen wins, every disagreeing fragment is reported.
        let extension_modifier = if kind == TypeKind::Extension {
            let canonical = first.extension_modifier.unwrap_or(ExtensionModifier::Explicit);
            for fragment in fragments.iter().skip(1) {
                let modifier = fragment
                    .extension_modifier
                    .unwrap_or(ExtensionModifier::Explicit);
                if modifier != canonical {
                    self.report(
                        &fragment.file,
                        fragment.name_span,
                        diagnostic_codes::PARTIAL_DIFFERENT_EXTENSION_MODIFIERS,
                        &[&type_display],
                    );
                }
            }
            Some(canonical)
        } else {
            None
        };

        // Type parameter names must agree positionally.
        for fragment in fragments.iter().skip(1) {
            let same_names = fragment
                .type_parameters
                .iter()
                .zip(&first.type_parameters)
                .all(|(a, b)| a.name == b.name);
            if !same_names {
                self.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::PARTIAL_DECLARATIONS_TYPE_PARAMETER_NAMES,
                    &[&type_display],
                );
            }
        }

        if kind == TypeKind::Extension && fragments.iter().all(|f| f.underlying_type.is_none()) {
            self.report(
                &first.file,
                first.name_span,
                diagnostic_codes::EXTENSION_MISSING_UNDERLYING_TYPE,
                &[&type_display],
            );
        }

        let id = self.arena.next_id();
        let type_parameters = first
            .type_parameters
            .iter()
            .map(|tp| TypeParameterDecl {
                name: self.interner.intern(&tp.name),
                span: tp.span,
            })
            .collect();
        let symbol = MergedTypeSymbol {
            id,
            name: key.name,
            container: key.container,
            namespace,
            kind,
            extension_modifier,
            accessibility: declared_accessibility.unwrap_or_else(|| default_type_accessibility(scope)),
            has_explicit_accessibility: declared_accessibility.is_some(),
            is_partial: first.is_partial(),
            is_static: honored.contains(Modifiers::STATIC),
            is_file_local: honored.contains(Modifiers::FILE),
            is_ref_like: kind == TypeKind::Struct && honored.contains(Modifiers::REF),
            is_sealed: honored.contains(Modifiers::SEALED),
            is_abstract: honored.contains(Modifiers::ABSTRACT),
            type_parameters,
            fragments: Vec::with_capacity(fragments.len()),
            members: Vec::new(),
            nested_types: Vec::new(),
        };
        self.arena.push(symbol);

        // Members: concatenate in fragment order; nested types are grouped and
        // merged recursively.
        let mut slots = Vec::new();
        let mut nested_groups: IndexMap<GroupKey, Vec<TypeDeclarationFragment>> = IndexMap::new();
        let mut infos = Vec::with_capacity(fragments.len());
        for (index, fragment) in fragments.into_iter().enumerate() {
            let TypeDeclarationFragment {
                file,
                name_span,
                modifiers,
                extension_modifier,
                type_parameters,
                underlying_type,
                base_list,
                members,
                nullable_context,
                ..
            } = fragment;
            for member in members {
                self.collect_member(id, index, member, &mut slots, &mut nested_groups);
            }
            infos.push(FragmentInfo {
                file,
                name_span,
                modifiers,
                extension_modifier,
                type_parameters,
                underlying_type,
                base_list,
                nullable_context,
            });
        }
        if let Some(symbol) = self.arena.get_mut(id) {
            symbol.fragments = infos;
        }

        let mut nested_ids = IndexMap::new();
        for (nested_key, nested_fragments) in nested_groups {
            if let Some(nested_id) = self.seal_group(
                nested_key,
                nested_fragments,
                DeclarationScope::Type(kind),
                namespace,
                depth + 1,
            ) {
                nested_ids.insert(nested_key, nested_id);
            }
        }

        let members = slots
            .into_iter()
            .filter_map(|slot| match slot {
                MemberSlot::Member(decl) => Some(decl),
                MemberSlot::Nested {
                    key,
                    fragment,
                    name_span,
                    modifiers,
                } => nested_ids.get(&key).map(|nested_id| MemberDecl {
                    fragment,
                    name: key.name,
                    name_span,
                    kind: MemberDeclKind::NestedType(*nested_id),
                    modifiers,
                    ty: None,
                    parameters: Vec::new(),
                }),
            })
            .collect();
        if let Some(symbol) = self.arena.get_mut(id) {
            symbol.members = members;
            symbol.nested_types = nested_ids.into_values().collect();
            debug!(
                name = %type_display,
                fragments = symbol.fragments.len(),
                members = symbol.members.len(),
                "sealed merged type symbol"
            );
        }
        Some(id)
    }

    fn collect_member(
        &mut self,
        container: SymbolId,
        fragment: usize,
        member: MemberFragment,
        slots: &mut Vec<MemberSlot>,
        nested_groups: &mut IndexMap<GroupKey, Vec<TypeDeclarationFragment>>,
    ) {
        let MemberFragment {
            name,
            name_span,
            kind,
            modifiers,
            ty,
            parameters,
        } = member;
        let kind = match kind {
            MemberKind::NestedType(nested) => {
                let key = GroupKey {
                    container: Container::Type(container),
                    name: self.interner.intern(&nested.name),
                    arity: nested.arity(),
                };
                let group = nested_groups.entry(key).or_default();
                if group.is_empty() {
                    slots.push(MemberSlot::Nested {
                        key,
                        fragment,
                        name_span: nested.name_span,
                        modifiers: nested.modifiers,
                    });
                }
                group.push(*nested);
                return;
            }
            MemberKind::Field => MemberDeclKind::Field,
            MemberKind::Constant => MemberDeclKind::Constant,
            MemberKind::Method => MemberDeclKind::Method,
            MemberKind::Property(accessors) => MemberDeclKind::Property(accessors),
            MemberKind::Indexer => MemberDeclKind::Indexer,
            MemberKind::Event { field_like } => MemberDeclKind::Event { field_like },
            MemberKind::Operator(op) => MemberDeclKind::Operator(op),
        };
        slots.push(MemberSlot::Member(MemberDecl {
            fragment,
            name: self.interner.intern(&name),
            name_span,
            kind,
            modifiers,
            ty,
            parameters,
        }));
    }
}
