//! Checker options and the shared per-compilation context.
//!
//! `CheckerContext` holds everything the resolution passes share: the sealed
//! symbol arena, the type universe, the symbol/definition mapping, the
//! per-definition resolution caches, the deferred constraint sites and the
//! diagnostic reporter.

use crate::diagnostics::DiagnosticBag;
use crate::member_binder::MemberSymbol;
use crate::metadata::SymbolLookup;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use xtc_binder::{NullableContext, SymbolArena, SymbolId};
use xtc_common::{Interner, Span};
use xtc_solver::{AnnotatedType, DefId, DefinitionStore, ExtendedType, TypeInterner};

/// Checker configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    /// Report every warning as an error.
    pub warnings_as_errors: bool,
    /// Warning codes to drop ("nowarn"). Errors are never suppressed.
    pub suppressed_codes: Vec<u32>,
    /// Context for fragments and types that do not carry their own.
    pub nullable_context_default: Option<NullableContext>,
    /// Stop recording diagnostics after this many; `None` is unlimited.
    pub max_diagnostics: Option<usize>,
}

impl CheckerOptions {
    #[must_use]
    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    #[must_use]
    pub fn suppress(mut self, code: u32) -> Self {
        if !self.suppressed_codes.contains(&code) {
            self.suppressed_codes.push(code);
        }
        self
    }

    #[must_use]
    pub fn with_nullable_context(mut self, context: NullableContext) -> Self {
        self.nullable_context_default = Some(context);
        self
    }

    #[must_use]
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = Some(max);
        self
    }
}

/// Demand-driven resolution state of one definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionState<T> {
    InProgress,
    Resolved(T),
}

/// A constructed generic type written in source, checked once every
/// constraint set and extension shape is final.
#[derive(Clone, Debug)]
pub struct ConstraintSite {
    pub def: DefId,
    pub args: Vec<AnnotatedType>,
    pub file: String,
    pub span: Span,
}

/// One resolved base-extension candidate that survived the per-candidate
/// rules, before cycle detection seals it.
#[derive(Clone, Debug)]
pub struct PendingEdge {
    pub ty: AnnotatedType,
    /// `None` for error-typed candidates.
    pub target: Option<DefId>,
    pub fragment: usize,
    pub file: String,
    pub span: Span,
    pub in_cycle: bool,
    pub underlying_mismatch: bool,
}

pub struct CheckerContext<'a> {
    pub options: CheckerOptions,
    pub interner: Arc<Interner>,
    pub arena: &'a SymbolArena,
    pub types: &'a TypeInterner,
    pub defs: &'a DefinitionStore,
    /// Names not declared in source are looked up here.
    pub lookup: Option<&'a dyn SymbolLookup>,

    pub symbol_to_def: FxHashMap<SymbolId, DefId>,
    pub def_to_symbol: FxHashMap<DefId, SymbolId>,

    pub extended_types: FxHashMap<DefId, ResolutionState<Option<ExtendedType>>>,
    pub base_edges: FxHashMap<DefId, Vec<PendingEdge>>,
    pub bound_members: FxHashMap<SymbolId, Arc<[MemberSymbol]>>,
    pub constraint_sites: Vec<ConstraintSite>,

    pub diagnostics: DiagnosticBag,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a SymbolArena,
        types: &'a TypeInterner,
        defs: &'a DefinitionStore,
        options: CheckerOptions,
    ) -> Self {
        let diagnostics = DiagnosticBag::with_options(&options);
        CheckerContext {
            options,
            interner: types.names().clone(),
            arena,
            types,
            defs,
            lookup: None,
            symbol_to_def: FxHashMap::default(),
            def_to_symbol: FxHashMap::default(),
            extended_types: FxHashMap::default(),
            base_edges: FxHashMap::default(),
            bound_members: FxHashMap::default(),
            constraint_sites: Vec::new(),
            diagnostics,
        }
    }

    #[inline]
    pub fn def_of(&self, symbol: SymbolId) -> Option<DefId> {
        self.symbol_to_def.get(&symbol).copied()
    }

    #[inline]
    pub fn symbol_of(&self, def: DefId) -> Option<SymbolId> {
        self.def_to_symbol.get(&def).copied()
    }

    /// Context for a fragment that declared `declared`.
    pub fn effective_context(&self, declared: NullableContext) -> NullableContext {
        match (declared, self.options.nullable_context_default) {
            (NullableContext::Disabled, Some(default)) => default,
            (declared, _) => declared,
        }
    }
}
