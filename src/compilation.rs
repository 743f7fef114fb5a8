//! The compilation facade.
//!
//! Collects fragments and referenced assemblies, runs the declaration table
//! and the checker pipeline once, and exposes the diagnostics plus a
//! read-only view of every extension type.

use crate::error::{Result, XtcError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Level, debug, span};
use xtc_binder::{DeclarationTable, SymbolArena, TypeDeclarationFragment};
use xtc_checker::{CheckerOptions, CheckerState, MetadataAssembly, import_assemblies};
use xtc_common::diagnostics::get_diagnostic_category;
use xtc_common::{Diagnostic, Interner};
use xtc_solver::{DefinitionStore, TypeInterner};

/// Options for one compilation. Loadable from the same camelCase JSON
/// shape as `CheckerOptions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationOptions {
    #[serde(flatten)]
    pub checker: CheckerOptions,
}

impl CompilationOptions {
    pub fn new(checker: CheckerOptions) -> Self {
        CompilationOptions { checker }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: CompilationOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Every suppressed code must name a known diagnostic.
    pub fn validate(&self) -> Result<()> {
        match self
            .checker
            .suppressed_codes
            .iter()
            .find(|code| get_diagnostic_category(**code).is_none())
        {
            Some(code) => Err(XtcError::UnknownDiagnosticCode(*code)),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct Compilation {
    options: CompilationOptions,
    fragments: Vec<TypeDeclarationFragment>,
    references: Vec<MetadataAssembly>,
    compiled: bool,
}

impl Compilation {
    pub fn new(options: CompilationOptions) -> Self {
        Compilation {
            options,
            ..Default::default()
        }
    }

    pub fn add_fragment(&mut self, fragment: TypeDeclarationFragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    pub fn add_fragments(&mut self, fragments: impl IntoIterator<Item = TypeDeclarationFragment>) -> &mut Self {
        self.fragments.extend(fragments);
        self
    }

    pub fn add_reference(&mut self, assembly: MetadataAssembly) -> &mut Self {
        self.references.push(assembly);
        self
    }

    /// Merge, resolve and check everything added so far. A compilation can
    /// be compiled once.
    pub fn compile(&mut self) -> Result<CompilationResult> {
        if self.compiled {
            return Err(XtcError::AlreadyCompiled);
        }
        self.options.validate()?;
        self.compiled = true;
        let _span = span!(
            Level::INFO,
            "compile",
            fragments = self.fragments.len(),
            references = self.references.len()
        )
        .entered();

        let interner = Arc::new(Interner::new());
        let types = TypeInterner::new(interner.clone());
        let defs = DefinitionStore::new();
        let lookup = import_assemblies(&types, &defs, &self.references);
        let (arena, binder_diagnostics) =
            DeclarationTable::merge(interner.clone(), std::mem::take(&mut self.fragments));

        let mut state = CheckerState::new(&arena, &types, &defs, self.options.checker.clone()).with_lookup(&lookup);
        state.check_program(binder_diagnostics);
        let extensions = extension_views(&state, &arena);
        let diagnostics = state.into_diagnostics();
        debug!(
            diagnostics = diagnostics.len(),
            extensions = extensions.len(),
            "compilation done"
        );
        Ok(CompilationResult::new(diagnostics, extensions))
    }
}

fn extension_views(state: &CheckerState<'_>, arena: &SymbolArena) -> Vec<ExtensionView> {
    arena
        .iter()
        .filter(|symbol| symbol.is_extension())
        .filter_map(|symbol| {
            let def = state.def_of(symbol.id)?;
            let modifier = symbol.extension_modifier?.keyword();
            let shape = state.extension_shape(symbol.id).unwrap_or_default();
            let members = state
                .members_of(symbol.id)
                .map(|members| {
                    members
                        .iter()
                        .map(|member| MemberView {
                            name: state.ctx.interner.resolve(member.name).to_string(),
                            kind: member.kind_name(),
                            accessibility: member.accessibility.as_str(),
                            is_static: member.is_static,
                            has_state: member.has_state,
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(ExtensionView {
                name: state.display_def(def),
                modifier,
                is_static: symbol.is_static,
                extended_type: shape.extended_type.map(|e| state.display(e.ty)),
                extended_type_is_error: shape.extended_type.is_some_and(|e| e.is_error),
                base_extensions: shape
                    .base_extensions
                    .iter()
                    .map(|edge| BaseExtensionView {
                        ty: state.display(edge.ty),
                        in_cycle: edge.in_cycle,
                        underlying_mismatch: edge.underlying_mismatch,
                    })
                    .collect(),
                members,
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseExtensionView {
    pub ty: String,
    pub in_cycle: bool,
    pub underlying_mismatch: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub name: String,
    /// `field`, `method`, `property`, ...
    pub kind: &'static str,
    pub accessibility: &'static str,
    pub is_static: bool,
    pub has_state: bool,
}

/// A sealed extension type, with every type rendered for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionView {
    /// Qualified name with type parameters: `N.R<T>`.
    pub name: String,
    pub modifier: &'static str,
    pub is_static: bool,
    pub extended_type: Option<String>,
    pub extended_type_is_error: bool,
    pub base_extensions: Vec<BaseExtensionView>,
    pub members: Vec<MemberView>,
}

impl ExtensionView {
    pub fn base_names(&self) -> Vec<&str> {
        self.base_extensions.iter().map(|b| b.ty.as_str()).collect()
    }

    pub fn member(&self, name: &str) -> Option<&MemberView> {
        self.members.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationResult {
    diagnostics: Vec<Diagnostic>,
    extensions: Vec<ExtensionView>,
    #[serde(skip)]
    by_name: FxHashMap<String, usize>,
}

impl CompilationResult {
    fn new(diagnostics: Vec<Diagnostic>, extensions: Vec<ExtensionView>) -> Self {
        let by_name = extensions
            .iter()
            .enumerate()
            .map(|(index, view)| (view.name.clone(), index))
            .collect();
        CompilationResult {
            diagnostics,
            extensions,
            by_name,
        }
    }

    /// Every diagnostic, in the order it was reported.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// The extension displayed as `name` (for example `N.R<T>`).
    pub fn extension(&self, name: &str) -> Option<&ExtensionView> {
        self.by_name.get(name).map(|&index| &self.extensions[index])
    }

    /// Every extension, in declaration order.
    pub fn extensions(&self) -> &[ExtensionView] {
        &self.extensions
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
