//! The member binder.
//!
//! Turns the member declarations collected from every fragment of a merged
//! type into `MemberSymbol`s. Modifier legality is decided by a table per
//! member kind and container kind; a rejected modifier is reported once and
//! left out of the bound member's modifiers. Bound lists are cached per
//! symbol, so binding twice reports nothing new.

use crate::name_resolution::TypeScope;
use crate::state::CheckerState;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug_span, trace};
use xtc_binder::modifiers::AccessibilityModifiers;
use xtc_binder::{
    MemberDecl, MemberDeclKind, MergedTypeSymbol, Modifiers, OperatorKind, SymbolId, TypeKind,
};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_common::{Accessibility, Atom, Span};
use xtc_solver::{AnnotatedType, TypeCompareKind, types_equal};

/// A bound member of a merged type.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberSymbol {
    pub name: Atom,
    pub kind: MemberDeclKind,
    pub accessibility: Accessibility,
    /// Modifiers that were written and are valid here.
    pub modifiers: Modifiers,
    pub is_static: bool,
    /// Fields, auto-properties and field-like events own storage.
    pub has_state: bool,
    /// Field/property/event type or return type.
    pub ty: Option<AnnotatedType>,
    pub parameters: Vec<AnnotatedType>,
    /// The first parameter is a `this` receiver.
    pub is_extension_method: bool,
    pub file: String,
    pub span: Span,
}

impl MemberSymbol {
    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.modifiers.contains(Modifiers::VIRTUAL)
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.modifiers.contains(Modifiers::SEALED)
    }

    #[inline]
    pub fn is_override(&self) -> bool {
        self.modifiers.contains(Modifiers::OVERRIDE)
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.modifiers.contains(Modifiers::READONLY)
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.modifiers.contains(Modifiers::REQUIRED)
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            MemberDeclKind::Field => "field",
            MemberDeclKind::Constant => "constant",
            MemberDeclKind::Method => "method",
            MemberDeclKind::Property(_) => "property",
            MemberDeclKind::Indexer => "indexer",
            MemberDeclKind::Event { .. } => "event",
            MemberDeclKind::Operator(_) => "operator",
            MemberDeclKind::NestedType(_) => "type",
        }
    }

    fn is_overloadable(&self) -> bool {
        matches!(
            self.kind,
            MemberDeclKind::Method | MemberDeclKind::Operator(_) | MemberDeclKind::Indexer
        )
    }
}

/// Non-accessibility modifiers a member of `kind` may carry inside a type
/// of kind `container`.
pub fn allowed_member_modifiers(kind: &MemberDeclKind, container: TypeKind) -> Modifiers {
    let inheritance = Modifiers::VIRTUAL | Modifiers::SEALED | Modifiers::OVERRIDE | Modifiers::ABSTRACT;
    let common = Modifiers::NEW | Modifiers::EXTERN | Modifiers::UNSAFE;
    let mut allowed = match kind {
        MemberDeclKind::Field => {
            Modifiers::NEW
                | Modifiers::STATIC
                | Modifiers::READONLY
                | Modifiers::VOLATILE
                | Modifiers::UNSAFE
                | Modifiers::REQUIRED
        }
        MemberDeclKind::Constant => Modifiers::NEW,
        MemberDeclKind::Method => {
            common
                | inheritance
                | Modifiers::STATIC
                | Modifiers::ASYNC
                | Modifiers::PARTIAL
                | Modifiers::READONLY
        }
        MemberDeclKind::Property(_) => {
            common | inheritance | Modifiers::STATIC | Modifiers::REQUIRED | Modifiers::READONLY
        }
        MemberDeclKind::Indexer => common | inheritance | Modifiers::READONLY,
        MemberDeclKind::Event { .. } => common | inheritance | Modifiers::STATIC | Modifiers::READONLY,
        MemberDeclKind::Operator(_) => Modifiers::STATIC | Modifiers::EXTERN | Modifiers::UNSAFE,
        // Checked by the declaration table.
        MemberDeclKind::NestedType(_) => return Modifiers::all(),
    };
    // `readonly` on a function member only means something in a struct.
    if container != TypeKind::Struct && !matches!(kind, MemberDeclKind::Field) {
        allowed.remove(Modifiers::READONLY);
    }
    match container {
        TypeKind::Struct => allowed.remove(Modifiers::VIRTUAL | Modifiers::SEALED | Modifiers::ABSTRACT),
        TypeKind::Extension => allowed.remove(inheritance | Modifiers::REQUIRED),
        TypeKind::Interface => allowed.remove(Modifiers::REQUIRED),
        TypeKind::Class | TypeKind::Enum | TypeKind::Delegate => {}
    }
    allowed
}

/// Accessibility of a member written without an accessibility modifier.
pub fn default_member_accessibility(container: TypeKind) -> Accessibility {
    match container {
        TypeKind::Interface => Accessibility::Public,
        _ => Accessibility::Private,
    }
}

fn is_protected(accessibility: Accessibility) -> bool {
    matches!(
        accessibility,
        Accessibility::Protected | Accessibility::ProtectedOrInternal | Accessibility::ProtectedAndInternal
    )
}

impl<'a> CheckerState<'a> {
    /// Bind the members of `symbol`. Later calls return the cached list.
    pub fn bind_members(&mut self, symbol: SymbolId) -> Arc<[MemberSymbol]> {
        if let Some(bound) = self.ctx.bound_members.get(&symbol) {
            return Arc::clone(bound);
        }
        let arena = self.ctx.arena;
        let Some(container) = arena.get(symbol) else {
            return Arc::from(Vec::new());
        };
        let _span = debug_span!("bind_members", symbol = symbol.0).entered();

        let members: Vec<MemberSymbol> = container
            .members
            .iter()
            .map(|decl| self.bind_member(container, decl))
            .collect();
        self.check_member_names(container, &members);
        self.check_operator_pairs(&members);
        self.check_extension_method_container(container, &members);

        trace!(symbol = symbol.0, members = members.len(), "members bound");
        let members: Arc<[MemberSymbol]> = members.into();
        self.ctx.bound_members.insert(symbol, Arc::clone(&members));
        members
    }

    fn bind_member(&mut self, container: &MergedTypeSymbol, decl: &MemberDecl) -> MemberSymbol {
        let fragment = &container.fragments[decl.fragment];
        let file = fragment.file.as_str();
        let span = decl.name_span;
        let name = self.ctx.interner.resolve(decl.name);

        if let MemberDeclKind::NestedType(nested) = decl.kind {
            let nested = self.ctx.arena.get(nested);
            return MemberSymbol {
                name: decl.name,
                kind: decl.kind.clone(),
                accessibility: nested.map_or(Accessibility::Private, |n| n.accessibility),
                modifiers: decl.modifiers,
                is_static: nested.is_some_and(|n| n.is_static),
                has_state: false,
                ty: None,
                parameters: Vec::new(),
                is_extension_method: false,
                file: fragment.file.clone(),
                span,
            };
        }

        let mut honored = Modifiers::empty();
        let allowed = allowed_member_modifiers(&decl.kind, container.kind);
        for (flag, keyword) in decl.modifiers.non_accessibility_flags() {
            if allowed.contains(flag) {
                honored |= flag;
            } else {
                self.ctx.diagnostics.report(
                    file,
                    span,
                    diagnostic_codes::MODIFIER_NOT_VALID_FOR_ITEM,
                    &[keyword],
                );
            }
        }

        let default_accessibility = default_member_accessibility(container.kind);
        let accessibility = match decl.modifiers.accessibility() {
            AccessibilityModifiers::None => default_accessibility,
            AccessibilityModifiers::Declared(declared)
                if is_protected(declared)
                    && matches!(container.kind, TypeKind::Struct | TypeKind::Extension) =>
            {
                self.ctx.diagnostics.report(
                    file,
                    span,
                    diagnostic_codes::MODIFIER_NOT_VALID_FOR_ITEM,
                    &[declared.as_str()],
                );
                default_accessibility
            }
            AccessibilityModifiers::Declared(declared) => {
                honored |= decl.modifiers & Modifiers::ACCESSIBILITY;
                declared
            }
            AccessibilityModifiers::Conflicting => {
                self.ctx.diagnostics.report(
                    file,
                    span,
                    diagnostic_codes::MORE_THAN_ONE_PROTECTION_MODIFIER,
                    &[],
                );
                default_accessibility
            }
        };

        let is_static = honored.contains(Modifiers::STATIC) || decl.kind == MemberDeclKind::Constant;
        let has_state = match &decl.kind {
            MemberDeclKind::Field => true,
            MemberDeclKind::Property(accessors) => accessors.is_auto,
            MemberDeclKind::Event { field_like } => *field_like,
            _ => false,
        };

        if container.is_static && !is_static && !matches!(decl.kind, MemberDeclKind::Operator(_)) {
            let code = if decl.kind == MemberDeclKind::Indexer {
                diagnostic_codes::INDEXER_IN_STATIC_TYPE
            } else {
                diagnostic_codes::INSTANCE_MEMBER_IN_STATIC_TYPE
            };
            self.ctx.diagnostics.report(file, span, code, &[&name]);
        } else if container.is_extension() && has_state && !is_static {
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::STATE_IN_EXTENSION,
                &[&name],
            );
        }

        if let MemberDeclKind::Property(accessors) = &decl.kind
            && accessors.is_auto
            && !accessors.get
        {
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::AUTO_PROPERTY_MUST_HAVE_GET_ACCESSOR,
                &[],
            );
        }

        if matches!(decl.kind, MemberDeclKind::Operator(_))
            && !(is_static && accessibility == Accessibility::Public)
        {
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::OPERATOR_MUST_BE_PUBLIC_AND_STATIC,
                &[&name],
            );
        }

        let is_extension_method = decl.kind == MemberDeclKind::Method
            && decl.parameters.first().is_some_and(|p| p.is_this);

        let scope = TypeScope {
            symbol: container.id,
            file,
            context: self.ctx.effective_context(fragment.nullable_context),
        };
        let ty = decl.ty.as_ref().map(|ty| self.resolve_type(ty, &scope));
        let parameters = decl
            .parameters
            .iter()
            .map(|p| self.resolve_type(&p.ty, &scope))
            .collect();

        MemberSymbol {
            name: decl.name,
            kind: decl.kind.clone(),
            accessibility,
            modifiers: honored,
            is_static,
            has_state,
            ty,
            parameters,
            is_extension_method,
            file: fragment.file.clone(),
            span,
        }
    }

    /// Receiver methods need a non-generic static class, reported once at
    /// the type's name. A nested static class is reported per method.
    fn check_extension_method_container(&mut self, container: &MergedTypeSymbol, members: &[MemberSymbol]) {
        if !members.iter().any(|m| m.is_extension_method) {
            return;
        }
        if container.kind != TypeKind::Class || !container.is_static || container.arity() > 0 {
            let fragment = container.primary_fragment();
            self.ctx.diagnostics.report(
                &fragment.file,
                fragment.name_span,
                diagnostic_codes::EXTENSION_METHOD_IN_INVALID_CONTAINER,
                &[],
            );
            return;
        }
        if container.containing_type().is_some() {
            let name = self.ctx.interner.resolve(container.name);
            for member in members.iter().filter(|m| m.is_extension_method) {
                self.ctx.diagnostics.report(
                    &member.file,
                    member.span,
                    diagnostic_codes::EXTENSION_METHOD_IN_NESTED_CLASS,
                    &[&name],
                );
            }
        }
    }

    /// Members named after the type, after a type parameter, or after an
    /// earlier member with the same signature.
    fn check_member_names(&mut self, container: &MergedTypeSymbol, members: &[MemberSymbol]) {
        let container_display = match self.ctx.def_of(container.id) {
            Some(def) => self.display_def(def),
            None => self.ctx.interner.resolve(container.name).to_string(),
        };
        for (index, member) in members.iter().enumerate() {
            let name = self.ctx.interner.resolve(member.name);
            if member.name == container.name
                && !matches!(
                    member.kind,
                    MemberDeclKind::Operator(_) | MemberDeclKind::Indexer | MemberDeclKind::NestedType(_)
                )
            {
                self.ctx.diagnostics.report(
                    &member.file,
                    member.span,
                    diagnostic_codes::MEMBER_NAME_SAME_AS_TYPE,
                    &[&name],
                );
            }
            let shadows_type_parameter = container.type_parameters.iter().any(|tp| tp.name == member.name);
            let duplicates_earlier = members[..index]
                .iter()
                .any(|earlier| earlier.name == member.name && self.members_collide(earlier, member));
            if shadows_type_parameter || duplicates_earlier {
                self.ctx.diagnostics.report(
                    &member.file,
                    member.span,
                    diagnostic_codes::DUPLICATE_NAME_IN_TYPE,
                    &[&container_display, &name],
                );
            }
        }
    }

    fn members_collide(&self, a: &MemberSymbol, b: &MemberSymbol) -> bool {
        if matches!(
            (&a.kind, &b.kind),
            (MemberDeclKind::NestedType(_), MemberDeclKind::NestedType(_))
        ) {
            // Nested types of the same arity were merged or reported already.
            return false;
        }
        if !(a.is_overloadable() && b.is_overloadable()) {
            return true;
        }
        let types = self.ctx.types;
        let same = |x: &AnnotatedType, y: &AnnotatedType| {
            types_equal(types, x.ty, y.ty, TypeCompareKind::ALL_IGNORE_OPTIONS)
        };
        let same_parameters = a.parameters.len() == b.parameters.len()
            && a.parameters.iter().zip(&b.parameters).all(|(x, y)| same(x, y));
        let is_conversion = matches!(
            a.kind,
            MemberDeclKind::Operator(OperatorKind::Implicit | OperatorKind::Explicit)
        );
        let same_return = match (&a.ty, &b.ty) {
            (Some(x), Some(y)) => same(x, y),
            _ => true,
        };
        same_parameters && (!is_conversion || same_return)
    }

    fn check_operator_pairs(&mut self, members: &[MemberSymbol]) {
        let declared: FxHashSet<OperatorKind> = members
            .iter()
            .filter_map(|m| match m.kind {
                MemberDeclKind::Operator(op) => Some(op),
                _ => None,
            })
            .collect();
        for member in members {
            if let MemberDeclKind::Operator(op) = member.kind
                && let Some(matching) = op.matching()
                && !declared.contains(&matching)
            {
                self.ctx.diagnostics.report(
                    &member.file,
                    member.span,
                    diagnostic_codes::OPERATOR_NEEDS_MATCH,
                    &[op.token(), matching.token()],
                );
            }
        }
    }
}
