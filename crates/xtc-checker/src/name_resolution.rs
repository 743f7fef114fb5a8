//! Resolution of written types (`TypeSyntax`) into the type universe.
//!
//! Names are looked up from the declaring type outwards: its type
//! parameters, nested types of it and of every containing type, the
//! enclosing namespaces from innermost to the global namespace, and finally
//! imported metadata. Every constructed generic type found along the way is
//! recorded as a constraint site for the deferred constraint pass.

use crate::context::ConstraintSite;
use crate::state::CheckerState;
use tracing::{trace, warn};
use xtc_binder::{Container, NameSegment, NullableContext, PredefinedType, SymbolId, TypeSyntax, TypeSyntaxKind};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_common::{Atom, Span};
use xtc_solver::recursion::{DepthCounter, RecursionProfile};
use xtc_solver::{AnnotatedType, DefId, NullableAnnotation, TupleElement, TypeClassifier, TypeId};

pub fn predefined_type_id(ty: PredefinedType) -> TypeId {
    match ty {
        PredefinedType::Object => TypeId::OBJECT,
        PredefinedType::Dynamic => TypeId::DYNAMIC,
        PredefinedType::String => TypeId::STRING,
        PredefinedType::Bool => TypeId::BOOL,
        PredefinedType::Char => TypeId::CHAR,
        PredefinedType::Int => TypeId::INT,
        PredefinedType::Long => TypeId::LONG,
        PredefinedType::Double => TypeId::DOUBLE,
        PredefinedType::NInt => TypeId::NINT,
        PredefinedType::Void => TypeId::VOID,
    }
}

/// Annotation of an un-suffixed type written under `context`.
fn plain_annotation(context: NullableContext) -> NullableAnnotation {
    match context {
        NullableContext::Disabled => NullableAnnotation::Oblivious,
        NullableContext::Enabled => NullableAnnotation::NotAnnotated,
    }
}

/// Where a type is written.
#[derive(Clone, Copy, Debug)]
pub struct TypeScope<'s> {
    /// The type declaration the syntax belongs to.
    pub symbol: SymbolId,
    pub file: &'s str,
    pub context: NullableContext,
}

/// A name found in scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScopeEntry {
    TypeParameter { owner: DefId, index: u32, name: Atom },
    Definition(DefId),
}

impl<'a> CheckerState<'a> {
    /// Resolve `syntax` written in `scope`, reporting unresolved names, wrong
    /// arities and broken imported types at their spans.
    pub fn resolve_type(&mut self, syntax: &TypeSyntax, scope: &TypeScope<'_>) -> AnnotatedType {
        let mut depth = DepthCounter::with_profile(RecursionProfile::TypeSyntaxResolution);
        self.resolve_type_inner(syntax, scope, scope.context, &mut depth)
    }

    fn resolve_type_inner(
        &mut self,
        syntax: &TypeSyntax,
        scope: &TypeScope<'_>,
        context: NullableContext,
        depth: &mut DepthCounter,
    ) -> AnnotatedType {
        if !depth.enter() {
            warn!(depth = depth.depth(), "type syntax nesting limit reached");
            return AnnotatedType::ERROR;
        }
        let context = syntax.nullable_context.unwrap_or(context);
        let plain = plain_annotation(context);
        let types = self.ctx.types;
        let result = match &syntax.kind {
            TypeSyntaxKind::Predefined(predefined) => {
                AnnotatedType::new(predefined_type_id(*predefined), plain)
            }
            TypeSyntaxKind::Name(segments) => {
                let ty = self.resolve_name(segments, syntax.span, scope, context, depth);
                AnnotatedType::new(ty, plain)
            }
            TypeSyntaxKind::Array { element, rank } => {
                let element = self.resolve_type_inner(element, scope, context, depth);
                AnnotatedType::new(types.array(element, (*rank).max(1)), plain)
            }
            TypeSyntaxKind::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| TupleElement {
                        ty: self.resolve_type_inner(&element.ty, scope, context, depth),
                        name: element.name.as_deref().map(|n| types.intern_string(n)),
                    })
                    .collect();
                AnnotatedType::new(types.tuple(elements), plain)
            }
            TypeSyntaxKind::Nullable(inner) => {
                let inner = self.resolve_type_inner(inner, scope, context, depth);
                let classifier = TypeClassifier::new(types, self.ctx.defs);
                if classifier.is_value_type(inner.ty) && !classifier.is_nullable_value_type(inner.ty) {
                    AnnotatedType::new(types.nullable_value(inner.ty), plain)
                } else {
                    inner.with_annotation(NullableAnnotation::Annotated)
                }
            }
            TypeSyntaxKind::Pointer(inner) => {
                let inner = self.resolve_type_inner(inner, scope, context, depth);
                AnnotatedType::new(types.pointer(inner.ty), plain)
            }
            TypeSyntaxKind::FunctionPointer {
                parameters,
                return_type,
            } => {
                let parameters = parameters
                    .iter()
                    .map(|p| self.resolve_type_inner(p, scope, context, depth).ty)
                    .collect();
                let return_type = self.resolve_type_inner(return_type, scope, context, depth).ty;
                AnnotatedType::new(types.function_pointer(parameters, return_type), plain)
            }
            TypeSyntaxKind::Ref(inner) => {
                let inner = self.resolve_type_inner(inner, scope, context, depth);
                AnnotatedType::new(types.by_ref(inner.ty), plain)
            }
        };
        depth.leave();
        result
    }

    fn resolve_args(
        &mut self,
        segment: &NameSegment,
        scope: &TypeScope<'_>,
        context: NullableContext,
        depth: &mut DepthCounter,
    ) -> Vec<AnnotatedType> {
        segment
            .type_arguments
            .iter()
            .map(|arg| self.resolve_type_inner(arg, scope, context, depth))
            .collect()
    }

    fn resolve_name(
        &mut self,
        segments: &[NameSegment],
        span: Span,
        scope: &TypeScope<'_>,
        context: NullableContext,
        depth: &mut DepthCounter,
    ) -> TypeId {
        let types = self.ctx.types;
        let Some(first) = segments.first() else {
            return TypeId::ERROR;
        };
        let spelled = segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".");

        // Leading segment as a type in scope, else the longest namespace
        // prefix that names a type.
        let mut start = None;
        let first_name = types.intern_string(&first.name);
        let first_arity = first.type_arguments.len() as u32;
        if let Some(entry) = self.lookup_in_scope(scope.symbol, first_name, Some(first_arity)) {
            start = Some((entry, 0));
        } else {
            for split in (1..segments.len()).rev() {
                let namespace = segments[..split]
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(".");
                let namespace = types.intern_string(&namespace);
                let segment = &segments[split];
                let name = types.intern_string(&segment.name);
                if let Some(def) =
                    self.lookup_in_namespace(namespace, name, Some(segment.type_arguments.len() as u32))
                {
                    start = Some((ScopeEntry::Definition(def), split));
                    break;
                }
            }
        }

        let Some((entry, start_index)) = start else {
            let args = self.resolve_args(first, scope, context, depth);
            if let Some(ScopeEntry::Definition(other)) = self.lookup_in_scope(scope.symbol, first_name, None) {
                let display = self.display_def(other);
                let count = self.ctx.defs.get_arity(other).to_string();
                self.ctx.diagnostics.report(
                    scope.file,
                    span,
                    diagnostic_codes::WRONG_NUMBER_OF_TYPE_ARGUMENTS,
                    &[&display, &count],
                );
            } else {
                self.ctx.diagnostics.report(
                    scope.file,
                    span,
                    diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
                    &[&spelled],
                );
            }
            return types.error(types.intern_string(&spelled), args);
        };

        let mut current = match entry {
            ScopeEntry::TypeParameter { owner, index, name } => types.type_param(owner, index, name),
            ScopeEntry::Definition(def) => {
                let args = self.resolve_args(&segments[start_index], scope, context, depth);
                self.construct(def, args, span, scope.file)
            }
        };

        // Remaining segments are nested types.
        for segment in &segments[start_index + 1..] {
            let name = types.intern_string(&segment.name);
            let arity = segment.type_arguments.len() as u32;
            let args = self.resolve_args(segment, scope, context, depth);
            let nested = types
                .named_def(current)
                .and_then(|(def, _)| self.ctx.symbol_of(def))
                .and_then(|symbol| self.ctx.arena.lookup(Container::Type(symbol), name, arity))
                .and_then(|symbol| self.ctx.def_of(symbol));
            match nested {
                Some(def) => current = self.construct(def, args, span, scope.file),
                None => {
                    self.ctx.diagnostics.report(
                        scope.file,
                        span,
                        diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
                        &[&spelled],
                    );
                    return types.error(types.intern_string(&spelled), args);
                }
            }
        }
        current
    }

    /// `def<args>`, recorded as a constraint site and checked for
    /// use-site errors.
    fn construct(&mut self, def: DefId, args: Vec<AnnotatedType>, span: Span, file: &str) -> TypeId {
        let ty = self.ctx.types.named(def, args.clone());
        if let Some(info) = self.ctx.defs.get(def) {
            if info.is_malformed {
                let display = self.display_def(def);
                self.ctx.diagnostics.report(
                    file,
                    span,
                    diagnostic_codes::MALFORMED_METADATA_EXTENSION,
                    &[&display],
                );
            } else if let Some(error) = info.use_site_error {
                let display = self.formatter().display_type(ty);
                let assembly = self.ctx.types.resolve_atom(error.assembly);
                self.ctx.diagnostics.report(
                    file,
                    span,
                    diagnostic_codes::TYPE_DEFINED_IN_ERRONEOUS_ASSEMBLY,
                    &[&display, &assembly],
                );
            }
        }
        if !args.is_empty() {
            trace!(def = def.0, "constraint site");
            self.ctx.constraint_sites.push(ConstraintSite {
                def,
                args,
                file: file.to_string(),
                span,
            });
        }
        ty
    }

    /// Look `name` up from `symbol` outwards. `arity: None` accepts any
    /// arity (used to tell "wrong arity" from "not found").
    fn lookup_in_scope(&self, symbol: SymbolId, name: Atom, arity: Option<u32>) -> Option<ScopeEntry> {
        let arena = self.ctx.arena;
        let mut namespace = Atom::NONE;
        let mut current = Some(symbol);
        while let Some(id) = current {
            let merged = arena.get(id)?;
            if arity.is_none_or(|a| a == 0)
                && let Some(index) = merged.type_parameters.iter().position(|tp| tp.name == name)
                && let Some(owner) = self.ctx.def_of(id)
            {
                return Some(ScopeEntry::TypeParameter {
                    owner,
                    index: index as u32,
                    name,
                });
            }
            let nested = match arity {
                Some(arity) => arena.lookup(Container::Type(id), name, arity),
                None => arena.lookup_any_arity(Container::Type(id), name).first().copied(),
            };
            if let Some(def) = nested.and_then(|n| self.ctx.def_of(n)) {
                return Some(ScopeEntry::Definition(def));
            }
            namespace = merged.namespace;
            current = merged.containing_type();
        }

        for candidate in self.enclosing_namespaces(namespace) {
            if let Some(def) = self.lookup_in_namespace(candidate, name, arity) {
                return Some(ScopeEntry::Definition(def));
            }
        }
        None
    }

    fn lookup_in_namespace(&self, namespace: Atom, name: Atom, arity: Option<u32>) -> Option<DefId> {
        let arena = self.ctx.arena;
        let container = Container::Namespace(namespace);
        let source = match arity {
            Some(arity) => arena.lookup(container, name, arity),
            None => arena.lookup_any_arity(container, name).first().copied(),
        };
        if let Some(def) = source.and_then(|s| self.ctx.def_of(s)) {
            return Some(def);
        }
        let lookup = self.ctx.lookup?;
        match arity {
            Some(arity) => lookup.lookup_type(namespace, name, arity),
            None => lookup.lookup_any_arity(namespace, name),
        }
    }

    /// `A.B.C`, `A.B`, `A`, then the global namespace.
    fn enclosing_namespaces(&self, namespace: Atom) -> Vec<Atom> {
        let mut result = Vec::new();
        let text = self.ctx.interner.resolve(namespace);
        let mut current: &str = &text;
        while !current.is_empty() {
            result.push(self.ctx.interner.intern(current));
            current = match current.rfind('.') {
                Some(dot) => &current[..dot],
                None => "",
            };
        }
        result.push(Atom::NONE);
        result
    }
}
