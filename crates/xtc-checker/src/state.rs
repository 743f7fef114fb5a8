//! `CheckerState` and the resolution pipeline.
//!
//! The checker runs once per compilation, after the declaration table has
//! sealed every merged symbol:
//!
//! 1. register a definition for every merged symbol
//! 2. merge type-parameter constraints across fragments
//! 3. record base classes and interfaces
//! 4. resolve every extended type
//! 5. collect base-extension lists
//! 6. detect base-extension cycles
//! 7. check edges against extended types, accessibility and file-locality
//! 8. seal extension shapes
//! 9. bind members
//! 10. check every recorded constraint site
//!
//! Stages 1 to 8 build shapes without checking constraints; the constraint
//! pass only runs once every shape is final.

use crate::context::{CheckerContext, CheckerOptions};
use crate::member_binder::MemberSymbol;
use crate::metadata::SymbolLookup;
use crate::name_resolution::TypeScope;
use std::sync::Arc;
use tracing::{Level, debug, span, trace};
use xtc_binder::{
    ConstraintSyntax, Container, ExtensionModifier, MergedTypeSymbol, NullableContext, SymbolArena, SymbolId,
    TypeKind,
};
use xtc_common::Diagnostic;
use xtc_common::diagnostics::diagnostic_codes;
use xtc_solver::{
    AnnotatedType, ConstraintSet, DefId, DefKind, DefinitionInfo, DefinitionStore, ExtensionKind,
    ExtensionShape, NullableAnnotation, TypeClassifier, TypeCompareKind, TypeFormatter, TypeInterner,
    merge_annotations, types_equal,
};

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

fn def_kind(symbol: &MergedTypeSymbol) -> DefKind {
    match symbol.kind {
        TypeKind::Class => DefKind::Class,
        TypeKind::Struct => DefKind::Struct,
        TypeKind::Interface => DefKind::Interface,
        TypeKind::Enum => DefKind::Enum,
        TypeKind::Delegate => DefKind::Delegate,
        TypeKind::Extension => DefKind::Extension(match symbol.extension_modifier {
            Some(ExtensionModifier::Explicit) => ExtensionKind::Explicit,
            Some(ExtensionModifier::Implicit) | None => ExtensionKind::Implicit,
        }),
    }
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a SymbolArena,
        types: &'a TypeInterner,
        defs: &'a DefinitionStore,
        options: CheckerOptions,
    ) -> Self {
        CheckerState {
            ctx: CheckerContext::new(arena, types, defs, options),
        }
    }

    /// Resolve names missing from source through `lookup`.
    #[must_use]
    pub fn with_lookup(mut self, lookup: &'a dyn SymbolLookup) -> Self {
        self.ctx.lookup = Some(lookup);
        self
    }

    pub fn formatter(&self) -> TypeFormatter<'a> {
        TypeFormatter::new(self.ctx.types, self.ctx.defs)
    }

    pub fn display_def(&self, def: DefId) -> String {
        self.formatter().display_def(def)
    }

    pub fn display(&self, ty: AnnotatedType) -> String {
        self.formatter().display(ty)
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Run every stage. `binder_diagnostics` are reported first so the
    /// diagnostic options apply to them too.
    pub fn check_program(&mut self, binder_diagnostics: Vec<Diagnostic>) {
        let _span = span!(Level::INFO, "check_program", symbols = self.ctx.arena.len()).entered();
        self.ctx.diagnostics.extend(binder_diagnostics);

        self.register_definitions();
        let symbols: Vec<(SymbolId, DefId)> = self
            .ctx
            .arena
            .iter()
            .filter_map(|s| self.ctx.def_of(s.id).map(|def| (s.id, def)))
            .collect();
        let extensions: Vec<(SymbolId, DefId)> = symbols
            .iter()
            .copied()
            .filter(|(symbol, _)| self.ctx.arena.get(*symbol).is_some_and(|s| s.is_extension()))
            .collect();

        {
            let _span = span!(Level::DEBUG, "constraints").entered();
            for &(symbol, def) in &symbols {
                self.merge_constraints(symbol, def);
            }
        }
        {
            let _span = span!(Level::DEBUG, "heritage").entered();
            for &(symbol, def) in &symbols {
                self.record_heritage(symbol, def);
            }
        }
        {
            let _span = span!(Level::DEBUG, "extended_types").entered();
            for &(_, def) in &extensions {
                self.extended_type_of(def);
            }
        }
        {
            let _span = span!(Level::DEBUG, "base_extensions").entered();
            for &(symbol, def) in &extensions {
                self.collect_base_extensions(def, symbol);
            }
            self.detect_base_extension_cycles();
            for &(_, def) in &extensions {
                self.check_base_extension_edges(def);
            }
            for &(_, def) in &extensions {
                self.seal_extension_shape(def);
            }
        }
        {
            let _span = span!(Level::DEBUG, "members").entered();
            for &(symbol, _) in &symbols {
                self.bind_members(symbol);
            }
        }
        {
            let _span = span!(Level::DEBUG, "constraint_sites").entered();
            self.check_constraint_sites();
        }
        debug!(
            errors = self.ctx.diagnostics.error_count(),
            warnings = self.ctx.diagnostics.warning_count(),
            "check_program done"
        );
    }

    /// Stage 1. Containers are registered before the types nested in them.
    fn register_definitions(&mut self) {
        let arena = self.ctx.arena;
        for symbol in arena.iter() {
            self.register_symbol(symbol.id);
        }
        trace!(definitions = self.ctx.symbol_to_def.len(), "definitions registered");
    }

    fn register_symbol(&mut self, id: SymbolId) -> Option<DefId> {
        if let Some(def) = self.ctx.def_of(id) {
            return Some(def);
        }
        let arena = self.ctx.arena;
        let symbol = arena.get(id)?;
        let container = match symbol.container {
            Container::Type(outer) => self.register_symbol(outer),
            Container::Namespace(_) => None,
        };
        let type_params: Vec<_> = symbol.type_parameters.iter().map(|tp| tp.name).collect();
        let mut info = DefinitionInfo::new(def_kind(symbol), symbol.name)
            .with_accessibility(symbol.accessibility)
            .with_namespace(symbol.namespace)
            .with_type_params(&type_params)
            .with_static(symbol.is_static)
            .with_file_local(symbol.is_file_local)
            .with_ref_like(symbol.is_ref_like);
        info.is_sealed = symbol.is_sealed;
        if let Some(container) = container {
            info = info.with_container(container);
        }
        let def = self.ctx.defs.register(info);
        self.ctx.symbol_to_def.insert(id, def);
        self.ctx.def_to_symbol.insert(def, id);
        Some(def)
    }

    /// Stage 2. Each fragment that writes a constraint clause must agree
    /// with the first one that did; agreeing clauses merge their
    /// annotations.
    fn merge_constraints(&mut self, symbol: SymbolId, def: DefId) {
        let arena = self.ctx.arena;
        let Some(merged) = arena.get(symbol) else {
            return;
        };
        for (index, param) in merged.type_parameters.iter().enumerate() {
            let mut canonical: Option<ConstraintSet> = None;
            for fragment in &merged.fragments {
                let Some(written) = fragment.type_parameters.get(index) else {
                    continue;
                };
                if written.constraints.is_empty() {
                    continue;
                }
                let scope = TypeScope {
                    symbol,
                    file: &fragment.file,
                    context: self.ctx.effective_context(fragment.nullable_context),
                };
                let set = self.resolve_constraint_clause(&written.constraints, &scope);
                match canonical.as_mut() {
                    None => canonical = Some(set),
                    Some(existing) => {
                        if !self.merge_constraint_sets(existing, &set) {
                            let display = self.display_def(def);
                            let name = self.ctx.interner.resolve(param.name);
                            self.ctx.diagnostics.report(
                                &fragment.file,
                                written.span,
                                diagnostic_codes::PARTIAL_DECLARATIONS_INCONSISTENT_CONSTRAINTS,
                                &[&display, &name],
                            );
                        }
                    }
                }
            }
            if let Some(set) = canonical {
                self.ctx.defs.set_constraints(def, index as u32, set);
            }
        }
    }

    fn resolve_constraint_clause(&mut self, clause: &[ConstraintSyntax], scope: &TypeScope<'_>) -> ConstraintSet {
        let mut set = ConstraintSet::default();
        for constraint in clause {
            match constraint {
                ConstraintSyntax::ReferenceType { annotated: true } => {
                    set.reference_type = Some(NullableAnnotation::Annotated);
                }
                ConstraintSyntax::ReferenceType { annotated: false } => {
                    set.reference_type = Some(match scope.context {
                        NullableContext::Disabled => NullableAnnotation::Oblivious,
                        NullableContext::Enabled => NullableAnnotation::NotAnnotated,
                    });
                }
                ConstraintSyntax::ValueType => set.value_type = true,
                ConstraintSyntax::NotNull => set.not_null = true,
                ConstraintSyntax::Type(syntax) => {
                    let ty = self.resolve_type(syntax, scope);
                    set.types.push(ty);
                }
            }
        }
        set
    }

    /// Merge `other` into `existing` when the two agree up to nullable
    /// annotations. Returns `false` (leaving `existing` alone) otherwise.
    fn merge_constraint_sets(&self, existing: &mut ConstraintSet, other: &ConstraintSet) -> bool {
        let types = self.ctx.types;
        if existing.reference_type.is_some() != other.reference_type.is_some()
            || existing.value_type != other.value_type
            || existing.not_null != other.not_null
            || existing.types.len() != other.types.len()
        {
            return false;
        }
        let mut matched = Vec::with_capacity(existing.types.len());
        for ty in &existing.types {
            let partner = other.types.iter().find(|candidate| {
                types_equal(types, ty.ty, candidate.ty, TypeCompareKind::IGNORE_NULLABLE_ANNOTATIONS)
            });
            match partner {
                Some(partner) => matched.push(merge_annotations(types, *ty, *partner)),
                None => return false,
            }
        }
        if let (Some(a), Some(b)) = (existing.reference_type, other.reference_type) {
            existing.reference_type = Some(a.merge(b));
        }
        existing.types = matched;
        true
    }

    /// Stage 3. Base class and interfaces of classes, structs and
    /// interfaces; extension base lists are handled by the graph stage.
    fn record_heritage(&mut self, symbol: SymbolId, def: DefId) {
        let arena = self.ctx.arena;
        let Some(merged) = arena.get(symbol) else {
            return;
        };
        if merged.is_extension() {
            return;
        }
        let types = self.ctx.types;
        let defs = self.ctx.defs;
        let mut base_class: Option<AnnotatedType> = None;
        let mut interfaces: Vec<AnnotatedType> = Vec::new();
        for fragment in &merged.fragments {
            let scope = TypeScope {
                symbol,
                file: &fragment.file,
                context: self.ctx.effective_context(fragment.nullable_context),
            };
            for syntax in &fragment.base_list {
                let ty = self.resolve_type(syntax, &scope);
                let classifier = TypeClassifier::new(types, defs);
                match classifier.def_kind(ty.ty) {
                    Some(DefKind::Class) if merged.kind == TypeKind::Class && base_class.is_none() => {
                        base_class = Some(ty);
                    }
                    Some(DefKind::Interface) if !interfaces.iter().any(|i| i.ty == ty.ty) => {
                        interfaces.push(ty);
                    }
                    _ => {}
                }
            }
        }
        if base_class.is_some() || !interfaces.is_empty() {
            defs.set_heritage(def, base_class, interfaces);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn def_of(&self, symbol: SymbolId) -> Option<DefId> {
        self.ctx.def_of(symbol)
    }

    /// The sealed shape of the extension declared by `symbol`.
    pub fn extension_shape(&self, symbol: SymbolId) -> Option<ExtensionShape> {
        let def = self.ctx.def_of(symbol)?;
        self.ctx.defs.get_extension_shape(def)
    }

    /// Members bound so far for `symbol`.
    pub fn members_of(&self, symbol: SymbolId) -> Option<Arc<[MemberSymbol]>> {
        self.ctx.bound_members.get(&symbol).cloned()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.ctx.diagnostics.as_slice()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.ctx.diagnostics.into_vec()
    }
}
