//! The base-extension graph.
//!
//! Candidates are resolved per fragment. Non-extensions are reported and
//! dropped; unresolved names stay in the list as error edges. Once every
//! extension's candidates are known, a depth-first walk finds cycles and
//! each node on a cycle is reported against its own closing edge. A
//! directly named extended type also depends on its containing extensions,
//! so `R for R2.Nested` with `R2 : R` is circular. Finally
//! each surviving edge is checked against the owner's extended type,
//! accessibility and file-locality, and the shapes are sealed into the
//! definition store.

use crate::context::{PendingEdge, ResolutionState};
use crate::name_resolution::TypeScope;
use crate::state::CheckerState;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};
use xtc_binder::{NullableContext, SymbolId};
use xtc_common::diagnostics::diagnostic_codes;
use xtc_common::limits::MAX_BASE_EXTENSION_DEPTH;
use xtc_solver::compare::annotated_types_equal;
use xtc_solver::{
    BaseExtensionEdge, DefId, ExtensionShape, TypeClassifier, TypeCompareKind, TypeDifference,
    classify_difference, merge_annotations,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitMark {
    OnStack,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum DependencyEdge {
    /// Index into the owner's base-extension list.
    Base(usize),
    /// A source extension containing the owner's extended type.
    UnderlyingContainer,
}

/// Component index of every node, by Kosaraju's two-pass walk.
fn strongly_connected_components(
    graph: &FxHashMap<DefId, Vec<(DefId, DependencyEdge)>>,
    nodes: &[DefId],
) -> FxHashMap<DefId, usize> {
    let mut visited: FxHashSet<DefId> = FxHashSet::default();
    let mut finished: Vec<DefId> = Vec::with_capacity(nodes.len());
    for &root in nodes {
        if !visited.insert(root) {
            continue;
        }
        let mut stack: Vec<(DefId, usize)> = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let successors = graph.get(&node).map_or(&[][..], Vec::as_slice);
            match successors.get(next) {
                Some(&(target, _)) => {
                    top.1 += 1;
                    if visited.insert(target) {
                        stack.push((target, 0));
                    }
                }
                None => {
                    finished.push(node);
                    stack.pop();
                }
            }
        }
    }

    let mut reversed: FxHashMap<DefId, Vec<DefId>> = FxHashMap::default();
    for (&from, successors) in graph {
        for &(to, _) in successors {
            reversed.entry(to).or_default().push(from);
        }
    }

    let mut component: FxHashMap<DefId, usize> = FxHashMap::default();
    let mut next_id = 0;
    for &root in finished.iter().rev() {
        if component.contains_key(&root) {
            continue;
        }
        let id = next_id;
        next_id += 1;
        component.insert(root, id);
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            for &from in reversed.get(&node).map_or(&[][..], Vec::as_slice) {
                if !component.contains_key(&from) {
                    component.insert(from, id);
                    pending.push(from);
                }
            }
        }
    }
    component
}

impl<'a> CheckerState<'a> {
    /// Resolve the base list of the extension `def` and apply the
    /// per-candidate rules.
    pub(crate) fn collect_base_extensions(&mut self, def: DefId, symbol: SymbolId) {
        let arena = self.ctx.arena;
        let Some(merged) = arena.get(symbol) else {
            return;
        };
        let types = self.ctx.types;
        let defs = self.ctx.defs;
        let classifier = TypeClassifier::new(types, defs);
        let ext_display = self.display_def(def);
        let mut edges: Vec<PendingEdge> = Vec::new();

        for (index, fragment) in merged.fragments.iter().enumerate() {
            let context = self.ctx.effective_context(fragment.nullable_context);
            for syntax in &fragment.base_list {
                let scope = TypeScope {
                    symbol,
                    file: &fragment.file,
                    context,
                };
                let ty = self.resolve_type(syntax, &scope);
                let edge = PendingEdge {
                    ty,
                    target: None,
                    fragment: index,
                    file: fragment.file.clone(),
                    span: syntax.span,
                    in_cycle: false,
                    underlying_mismatch: false,
                };
                if types.is_error(ty.ty) {
                    edges.push(edge);
                    continue;
                }
                let target = classifier.extension_def(ty.ty).filter(|_| !ty.is_annotated());
                let Some(target) = target else {
                    let display = self.display(ty);
                    self.ctx.diagnostics.report(
                        &fragment.file,
                        syntax.span,
                        diagnostic_codes::BASE_EXTENSION_MUST_BE_EXTENSION,
                        &[&display],
                    );
                    continue;
                };

                let duplicate = edges.iter().enumerate().find_map(|(i, existing)| {
                    existing.target?;
                    match classify_difference(types, existing.ty, ty) {
                        Some(TypeDifference::Other) => None,
                        difference => Some((i, difference)),
                    }
                });
                if let Some((existing_index, difference)) = duplicate {
                    let existing = &edges[existing_index];
                    let same_fragment = existing.fragment == index;
                    let existing_display = self.display(existing.ty);
                    let display = self.display(ty);
                    let written_context = syntax.nullable_context.unwrap_or(context);
                    match difference {
                        None if same_fragment => self.ctx.diagnostics.report(
                            &fragment.file,
                            syntax.span,
                            diagnostic_codes::DUPLICATE_BASE_EXTENSION,
                            &[&display],
                        ),
                        Some(TypeDifference::Nullability) if same_fragment => {
                            if written_context == NullableContext::Enabled {
                                self.ctx.diagnostics.report(
                                    &fragment.file,
                                    syntax.span,
                                    diagnostic_codes::DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH,
                                    &[&display, &ext_display],
                                );
                            }
                        }
                        None | Some(TypeDifference::Nullability) => {
                            let merged_ty = merge_annotations(types, edges[existing_index].ty, ty);
                            edges[existing_index].ty = merged_ty;
                        }
                        Some(TypeDifference::TupleNames) => self.ctx.diagnostics.report(
                            &fragment.file,
                            syntax.span,
                            diagnostic_codes::DUPLICATE_BASE_EXTENSION_TUPLE_NAMES,
                            &[&display, &existing_display, &ext_display],
                        ),
                        Some(TypeDifference::Dynamic | TypeDifference::Other) => {
                            self.ctx.diagnostics.report(
                                &fragment.file,
                                syntax.span,
                                diagnostic_codes::DUPLICATE_BASE_EXTENSION_WITH_DIFFERENCES,
                                &[&display, &existing_display, &ext_display],
                            )
                        }
                    }
                    continue;
                }

                if !merged.is_static && defs.get(target).is_some_and(|d| d.is_static) {
                    let display = self.display(ty);
                    self.ctx.diagnostics.report(
                        &fragment.file,
                        syntax.span,
                        diagnostic_codes::STATIC_BASE_EXTENSION_ON_INSTANCE_EXTENSION,
                        &[&ext_display, &display],
                    );
                }
                edges.push(PendingEdge {
                    target: Some(target),
                    ..edge
                });
            }
        }
        trace!(extension = %ext_display, edges = edges.len(), "base extensions collected");
        self.ctx.base_edges.insert(def, edges);
    }

    /// Dependency edges of every source extension: its base extensions,
    /// then the source extensions containing its extended type when that
    /// type is named directly.
    fn dependency_graph(&mut self) -> FxHashMap<DefId, Vec<(DefId, DependencyEdge)>> {
        let mut nodes: Vec<DefId> = self.ctx.base_edges.keys().copied().collect();
        nodes.sort_unstable();
        let types = self.ctx.types;
        let defs = self.ctx.defs;
        let mut graph: FxHashMap<DefId, Vec<(DefId, DependencyEdge)>> = FxHashMap::default();

        for node in nodes {
            let mut successors: Vec<(DefId, DependencyEdge)> = self
                .ctx
                .base_edges
                .get(&node)
                .map_or(&[][..], Vec::as_slice)
                .iter()
                .enumerate()
                .filter_map(|(index, edge)| Some((edge.target?, DependencyEdge::Base(index))))
                .filter(|(target, _)| self.ctx.base_edges.contains_key(target))
                .collect();
            if let Some(extended) = self.extended_type_of(node)
                && let Some((named, _)) = types.named_def(extended.ty.ty)
            {
                let mut container = defs.get(named).and_then(|info| info.container);
                while let Some(outer) = container {
                    if self.ctx.base_edges.contains_key(&outer) {
                        successors.push((outer, DependencyEdge::UnderlyingContainer));
                    }
                    container = defs.get(outer).and_then(|info| info.container);
                }
            }
            graph.insert(node, successors);
        }
        graph
    }

    /// Find every cycle among source extensions. Each node on a cycle is
    /// reported once per closing edge leaving it; every edge inside a
    /// strongly connected component is marked.
    pub(crate) fn detect_base_extension_cycles(&mut self) {
        let graph = self.dependency_graph();
        let mut nodes: Vec<DefId> = graph.keys().copied().collect();
        nodes.sort_unstable();
        let mut marks: FxHashMap<DefId, VisitMark> = FxHashMap::default();
        let mut closing: Vec<(DefId, DependencyEdge)> = Vec::new();

        for &root in &nodes {
            if marks.contains_key(&root) {
                continue;
            }
            marks.insert(root, VisitMark::OnStack);
            // (node, index of the next successor to explore)
            let mut stack: Vec<(DefId, usize)> = vec![(root, 0)];
            while let Some(top) = stack.last_mut() {
                let (node, next) = *top;
                let successors = graph.get(&node).map_or(&[][..], Vec::as_slice);
                let Some(&(target, _)) = successors.get(next) else {
                    marks.insert(node, VisitMark::Done);
                    stack.pop();
                    continue;
                };
                top.1 += 1;
                match marks.get(&target) {
                    Some(VisitMark::OnStack) => {
                        let Some(start) = stack.iter().position(|(n, _)| *n == target) else {
                            continue;
                        };
                        closing.extend(stack[start..].iter().filter_map(|(n, i)| {
                            let (_, edge) = graph.get(n)?.get(i - 1)?;
                            Some((*n, *edge))
                        }));
                    }
                    Some(VisitMark::Done) => {}
                    None => {
                        if stack.len() as u32 >= MAX_BASE_EXTENSION_DEPTH {
                            warn!(depth = stack.len(), "base extension chain too deep; not descending");
                            continue;
                        }
                        marks.insert(target, VisitMark::OnStack);
                        stack.push((target, 0));
                    }
                }
            }
        }

        let component = strongly_connected_components(&graph, &nodes);
        for (&node, successors) in &graph {
            for &(target, edge) in successors {
                if component.get(&node) == component.get(&target) {
                    self.mark_in_cycle(node, edge);
                }
            }
        }

        let mut reported: FxHashSet<(DefId, DependencyEdge)> = FxHashSet::default();
        for (node, edge) in closing {
            if reported.insert((node, edge)) {
                self.report_cycle_edge(node, edge);
            }
        }
    }

    fn mark_in_cycle(&mut self, node: DefId, edge: DependencyEdge) {
        match edge {
            DependencyEdge::Base(index) => {
                if let Some(edge) = self.ctx.base_edges.get_mut(&node).and_then(|edges| edges.get_mut(index)) {
                    edge.in_cycle = true;
                }
            }
            DependencyEdge::UnderlyingContainer => {
                if let Some(ResolutionState::Resolved(Some(extended))) = self.ctx.extended_types.get_mut(&node) {
                    extended.is_error = true;
                }
            }
        }
    }

    fn report_cycle_edge(&mut self, node: DefId, edge: DependencyEdge) {
        let node_display = self.display_def(node);
        match edge {
            DependencyEdge::Base(index) => {
                let Some(edge) = self.ctx.base_edges.get(&node).and_then(|edges| edges.get(index)) else {
                    return;
                };
                let (ty, file, span) = (edge.ty, edge.file.clone(), edge.span);
                let target_display = self.display(ty);
                debug!(extension = %node_display, base = %target_display, "base extension cycle");
                self.ctx.diagnostics.report(
                    &file,
                    span,
                    diagnostic_codes::CYCLE_IN_BASE_EXTENSIONS,
                    &[&node_display, &target_display],
                );
            }
            DependencyEdge::UnderlyingContainer => {
                let Some(ResolutionState::Resolved(Some(extended))) = self.ctx.extended_types.get(&node) else {
                    return;
                };
                let ty = extended.ty;
                let arena = self.ctx.arena;
                let Some(fragment) = self
                    .ctx
                    .symbol_of(node)
                    .and_then(|symbol| arena.get(symbol))
                    .and_then(|merged| {
                        merged
                            .fragments
                            .iter()
                            .find(|f| f.underlying_type.is_some())
                            .or_else(|| merged.fragments.first())
                    })
                else {
                    return;
                };
                let underlying_display = self.display(ty);
                debug!(extension = %node_display, underlying = %underlying_display, "circular underlying type");
                self.ctx.diagnostics.report(
                    &fragment.file,
                    fragment.name_span,
                    diagnostic_codes::CIRCULAR_BASE,
                    &[&underlying_display, &node_display],
                );
            }
        }
    }

    /// Extended-type agreement, accessibility and file-locality of every
    /// edge of `def`.
    pub(crate) fn check_base_extension_edges(&mut self, def: DefId) {
        let Some(mut edges) = self.ctx.base_edges.get(&def).cloned() else {
            return;
        };
        let own = self.extended_type_of(def).filter(|e| !e.is_error);
        let types = self.ctx.types;
        let defs = self.ctx.defs;
        let classifier = TypeClassifier::new(types, defs);
        let ext_display = self.display_def(def);
        let owner_accessibility = defs.effective_accessibility(def);
        let owner_is_file_local = defs.is_file_local_including_containers(def);

        for edge in &mut edges {
            if edge.target.is_none() {
                continue;
            }
            let base_display = self.display(edge.ty);
            if !edge.in_cycle
                && let Some(own) = own
                && let Some((target, args)) = types.named_def(edge.ty.ty)
                && let Some(base) = self.extended_type_of_instance(target, &args)
                && !base.is_error
                && !annotated_types_equal(types, own.ty, base.ty, TypeCompareKind::OBLIVIOUS_MATCHES_ANY)
            {
                edge.underlying_mismatch = true;
                let own_display = self.display(own.ty);
                let other_display = self.display(base.ty);
                self.ctx.diagnostics.report(
                    &edge.file,
                    edge.span,
                    diagnostic_codes::UNDERLYING_TYPES_MISMATCH,
                    &[&ext_display, &own_display, &other_display],
                );
            }
            if !classifier
                .effective_accessibility(edge.ty.ty)
                .is_at_least_as_accessible_as(owner_accessibility)
            {
                self.ctx.diagnostics.report(
                    &edge.file,
                    edge.span,
                    diagnostic_codes::INCONSISTENT_ACCESSIBILITY_BASE_EXTENSION,
                    &[&ext_display, &base_display],
                );
            }
            if !owner_is_file_local && classifier.mentions_file_local(edge.ty.ty) {
                self.ctx.diagnostics.report(
                    &edge.file,
                    edge.span,
                    diagnostic_codes::FILE_TYPE_BASE_EXTENSION,
                    &[&base_display, &ext_display],
                );
            }
        }
        self.ctx.base_edges.insert(def, edges);
    }

    /// Record the final shape of the source extension `def`.
    pub(crate) fn seal_extension_shape(&mut self, def: DefId) {
        let extended_type = self.extended_type_of(def);
        let base_extensions = self
            .ctx
            .base_edges
            .get(&def)
            .map(|edges| {
                edges
                    .iter()
                    .map(|e| BaseExtensionEdge {
                        ty: e.ty,
                        in_cycle: e.in_cycle,
                        underlying_mismatch: e.underlying_mismatch,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let sealed = self.ctx.defs.set_extension_shape(
            def,
            ExtensionShape {
                extended_type,
                base_extensions,
            },
        );
        if !sealed {
            trace!(def = def.0, "extension shape was already sealed");
        }
    }
}
