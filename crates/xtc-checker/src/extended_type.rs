//! Extended-type resolution.
//!
//! Each extension wraps exactly one underlying type. The first fragment that
//! names one is canonical; every other fragment must agree with it up to
//! oblivious nullability, and agreeing fragments contribute their
//! annotations. The canonical type is then validated: illegal kinds leave the
//! extended type absent, while accessibility and file-locality problems keep
//! it (file-local and broken imported types are kept error-marked).

use crate::context::ResolutionState;
use crate::name_resolution::TypeScope;
use crate::state::CheckerState;
use tracing::{debug, trace};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_solver::compare::annotated_types_equal;
use xtc_solver::{
    AnnotatedType, DefId, ExtendedType, TypeClassifier, TypeCompareKind, TypeData, TypeId,
    TypeSubstitution, instantiate_type, merge_annotations,
};

impl<'a> CheckerState<'a> {
    /// The extended type of the extension `def`, resolving it on first use.
    ///
    /// Returns `None` for non-extensions, for extensions without a (legal)
    /// underlying type, and while `def` is itself being resolved.
    pub fn extended_type_of(&mut self, def: DefId) -> Option<ExtendedType> {
        match self.ctx.extended_types.get(&def) {
            Some(ResolutionState::Resolved(resolved)) => return *resolved,
            Some(ResolutionState::InProgress) => {
                trace!(def = def.0, "extended type requested during its own resolution");
                return None;
            }
            None => {}
        }
        let Some(symbol) = self.ctx.symbol_of(def) else {
            // Imported extensions arrive with a sealed shape.
            return self
                .ctx
                .defs
                .get_extension_shape(def)
                .and_then(|shape| shape.extended_type);
        };
        if !self.ctx.arena.get(symbol).is_some_and(|s| s.is_extension()) {
            return None;
        }
        self.ctx
            .extended_types
            .insert(def, ResolutionState::InProgress);
        let resolved = self.resolve_extended_type(def, symbol);
        self.ctx
            .extended_types
            .insert(def, ResolutionState::Resolved(resolved));
        resolved
    }

    /// The extended type of the constructed extension `def<args>`.
    pub fn extended_type_of_instance(&mut self, def: DefId, args: &[AnnotatedType]) -> Option<ExtendedType> {
        let extended = self.extended_type_of(def)?;
        let subst = TypeSubstitution::for_def(self.ctx.defs, def, args);
        Some(ExtendedType {
            ty: instantiate_type(self.ctx.types, extended.ty, &subst),
            is_error: extended.is_error,
        })
    }

    fn resolve_extended_type(&mut self, def: DefId, symbol: xtc_binder::SymbolId) -> Option<ExtendedType> {
        let arena = self.ctx.arena;
        let merged = arena.get(symbol)?;

        // Canonical type first, then merge or reject the others.
        let mut canonical: Option<(usize, AnnotatedType)> = None;
        let mut mismatch_reported = false;
        for (index, fragment) in merged.fragments.iter().enumerate() {
            let Some(syntax) = &fragment.underlying_type else {
                continue;
            };
            let scope = TypeScope {
                symbol,
                file: &fragment.file,
                context: self.ctx.effective_context(fragment.nullable_context),
            };
            let ty = self.resolve_type(syntax, &scope);
            let Some((_, current)) = canonical else {
                canonical = Some((index, ty));
                continue;
            };
            if self.ctx.types.is_error(ty.ty) || self.ctx.types.is_error(current.ty) {
                continue;
            }
            if annotated_types_equal(self.ctx.types, current, ty, TypeCompareKind::OBLIVIOUS_MATCHES_ANY) {
                canonical = canonical.map(|(i, c)| (i, merge_annotations(self.ctx.types, c, ty)));
            } else if !mismatch_reported {
                mismatch_reported = true;
                let display = self.display_def(def);
                self.ctx.diagnostics.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::PARTIAL_DIFFERENT_UNDERLYING_TYPES,
                    &[&display],
                );
            }
        }
        let (index, ty) = canonical?;
        let fragment = &merged.fragments[index];
        let span = fragment
            .underlying_type
            .as_ref()
            .map_or(fragment.name_span, |s| s.span);
        let file = fragment.file.as_str();

        if self.ctx.types.is_error(ty.ty) {
            return Some(ExtendedType { ty, is_error: true });
        }

        let types = self.ctx.types;
        let defs = self.ctx.defs;
        let classifier = TypeClassifier::new(types, defs);
        let ext_display = self.display_def(def);
        let ty_display = self.display(ty);

        let is_annotated_reference = ty.is_annotated()
            && !matches!(types.lookup(ty.ty), TypeData::NullableValue(_));
        if ty.ty == TypeId::DYNAMIC
            || classifier.is_pointer_like(ty.ty)
            || classifier.is_ref_like(ty.ty)
            || classifier.is_extension(ty.ty)
            || is_annotated_reference
        {
            debug!(extension = %ext_display, underlying = %ty_display, "illegal underlying type");
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::BAD_EXTENSION_UNDERLYING_TYPE,
                &[&ext_display, &ty_display],
            );
            return None;
        }

        if !merged.is_static && classifier.is_static_type(ty.ty) {
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::STATIC_UNDERLYING_TYPE_ON_INSTANCE_EXTENSION,
                &[&ext_display, &ty_display],
            );
        }

        if !classifier
            .effective_accessibility(ty.ty)
            .is_at_least_as_accessible_as(defs.effective_accessibility(def))
        {
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::INCONSISTENT_ACCESSIBILITY_UNDERLYING_TYPE,
                &[&ext_display, &ty_display],
            );
        }

        let mut is_error = false;
        if !defs.is_file_local_including_containers(def) && classifier.mentions_file_local(ty.ty) {
            self.ctx.diagnostics.report(
                file,
                span,
                diagnostic_codes::FILE_TYPE_UNDERLYING,
                &[&ty_display, &ext_display],
            );
            is_error = true;
        }
        if classifier.use_site_error(ty.ty).is_some() || classifier.malformed_def(ty.ty).is_some() {
            // Already reported where the name was resolved.
            is_error = true;
        }
        Some(ExtendedType { ty, is_error })
    }
}
