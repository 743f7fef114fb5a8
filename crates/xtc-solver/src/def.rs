//! Definition identifiers and storage for the solver.
//!
//! A `DefId` names one nominal type: a merged source symbol or a type imported
//! from metadata. Types refer to definitions only by `DefId`, so the solver
//! never needs the binder's symbol arena and tests can build definitions
//! directly.
//!
//! Extension shapes (extended type and base-extension edges) are recorded
//! once, after the checker has resolved the whole base-extension graph, and are
//! read-only afterwards.

use crate::types::{AnnotatedType, NullableAnnotation};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;
use xtc_common::{Accessibility, Atom};

/// Counter for telling `DefinitionStore` instances apart in traces.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// DefId
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

// =============================================================================
// DefKind
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Implicit,
    Explicit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Extension(ExtensionKind),
}

impl DefKind {
    #[inline]
    pub const fn is_extension(self) -> bool {
        matches!(self, DefKind::Extension(_))
    }

    /// Structs and enums; extensions are neither reference nor value types.
    #[inline]
    pub const fn is_value_kind(self) -> bool {
        matches!(self, DefKind::Struct | DefKind::Enum)
    }

    #[inline]
    pub const fn is_reference_kind(self) -> bool {
        matches!(self, DefKind::Class | DefKind::Interface | DefKind::Delegate)
    }
}

// =============================================================================
// Definition Info
// =============================================================================

/// Where a definition came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefOrigin {
    Source,
    Metadata { assembly: Atom },
}

/// Reported at every use of a definition whose assembly is broken or missing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UseSiteError {
    pub assembly: Atom,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: Atom,
    pub owner: DefId,
    pub index: u32,
}

/// Constraints of one type parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// `class` constraint, with the annotation it was written with:
    /// oblivious in a disabled context, `Annotated` for `class?`.
    pub reference_type: Option<NullableAnnotation>,
    /// `struct`
    pub value_type: bool,
    pub not_null: bool,
    /// Explicit type and interface constraints, in declaration order.
    pub types: Vec<AnnotatedType>,
}

impl ConstraintSet {
    pub fn is_empty(&self) -> bool {
        self.reference_type.is_none() && !self.value_type && !self.not_null && self.types.is_empty()
    }
}

/// The resolved extended type of an extension definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExtendedType {
    pub ty: AnnotatedType,
    /// Kept for display, but the type is unusable (file-local or broken).
    pub is_error: bool,
}

/// One entry of an extension's base-extension list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BaseExtensionEdge {
    pub ty: AnnotatedType,
    /// The edge closes a cycle; consumers must treat its target as an error.
    pub in_cycle: bool,
    /// The target extends a different type than the owner.
    pub underlying_mismatch: bool,
}

impl BaseExtensionEdge {
    pub const fn new(ty: AnnotatedType) -> Self {
        BaseExtensionEdge {
            ty,
            in_cycle: false,
            underlying_mismatch: false,
        }
    }

    #[inline]
    pub const fn is_error(&self) -> bool {
        self.in_cycle
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtensionShape {
    /// `None` when missing or rejected.
    pub extended_type: Option<ExtendedType>,
    pub base_extensions: Vec<BaseExtensionEdge>,
}

/// Complete information about a type definition.
#[derive(Clone, Debug)]
pub struct DefinitionInfo {
    pub kind: DefKind,
    pub name: Atom,
    /// Containing type, for nested definitions.
    pub container: Option<DefId>,
    /// Dotted namespace of the outermost containing type.
    pub namespace: Atom,
    pub type_params: Vec<TypeParamInfo>,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_file_local: bool,
    /// `ref struct`
    pub is_ref_like: bool,
    pub is_sealed: bool,
    pub base_class: Option<AnnotatedType>,
    pub interfaces: Vec<AnnotatedType>,
    pub origin: DefOrigin,
    pub use_site_error: Option<UseSiteError>,
    /// Imported with an unrecognisable extension marker.
    pub is_malformed: bool,
    /// Parallel to `type_params`.
    pub constraints: Vec<ConstraintSet>,
    /// Present once the extension's shape has been sealed.
    pub extension: Option<ExtensionShape>,
}

impl DefinitionInfo {
    pub fn new(kind: DefKind, name: Atom) -> Self {
        DefinitionInfo {
            kind,
            name,
            container: None,
            namespace: Atom::NONE,
            type_params: Vec::new(),
            accessibility: Accessibility::Internal,
            is_static: false,
            is_file_local: false,
            is_ref_like: false,
            is_sealed: false,
            base_class: None,
            interfaces: Vec::new(),
            origin: DefOrigin::Source,
            use_site_error: None,
            is_malformed: false,
            constraints: Vec::new(),
            extension: None,
        }
    }

    pub fn class(name: Atom) -> Self {
        Self::new(DefKind::Class, name)
    }

    pub fn structure(name: Atom) -> Self {
        Self::new(DefKind::Struct, name)
    }

    pub fn interface(name: Atom) -> Self {
        Self::new(DefKind::Interface, name)
    }

    pub fn extension(name: Atom, kind: ExtensionKind) -> Self {
        Self::new(DefKind::Extension(kind), name)
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_container(mut self, container: DefId) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_namespace(mut self, namespace: Atom) -> Self {
        self.namespace = namespace;
        self
    }

    /// Type parameter names; `owner` is filled in by `DefinitionStore::register`.
    pub fn with_type_params(mut self, names: &[Atom]) -> Self {
        self.type_params = names
            .iter()
            .enumerate()
            .map(|(index, &name)| TypeParamInfo {
                name,
                owner: DefId::INVALID,
                index: index as u32,
            })
            .collect();
        self.constraints = vec![ConstraintSet::default(); names.len()];
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_file_local(mut self, is_file_local: bool) -> Self {
        self.is_file_local = is_file_local;
        self
    }

    pub fn with_ref_like(mut self, is_ref_like: bool) -> Self {
        self.is_ref_like = is_ref_like;
        self
    }

    pub fn with_origin(mut self, origin: DefOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    #[inline]
    pub fn is_extension(&self) -> bool {
        self.kind.is_extension()
    }
}

// =============================================================================
// DefinitionStore
// =============================================================================

/// Thread-safe storage for type definitions.
///
/// Uses `DashMap` so sealed shapes can be read from several binding passes
/// without locking the whole store.
pub struct DefinitionStore {
    /// Unique instance ID for debugging
    instance_id: u64,

    definitions: DashMap<DefId, DefinitionInfo>,

    next_id: AtomicU32,
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore {
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "DefinitionStore::new");
        Self {
            instance_id,
            definitions: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    fn allocate(&self) -> DefId {
        DefId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Register a new definition and return its `DefId`.
    pub fn register(&self, mut info: DefinitionInfo) -> DefId {
        let id = self.allocate();
        for param in &mut info.type_params {
            param.owner = id;
        }
        if info.constraints.len() < info.type_params.len() {
            info.constraints
                .resize(info.type_params.len(), ConstraintSet::default());
        }
        trace!(
            instance_id = self.instance_id,
            def_id = %id.0,
            kind = ?info.kind,
            "DefinitionStore::register"
        );
        self.definitions.insert(id, info);
        id
    }

    pub fn get(&self, id: DefId) -> Option<DefinitionInfo> {
        self.definitions.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.definitions.contains_key(&id)
    }

    pub fn get_kind(&self, id: DefId) -> Option<DefKind> {
        self.definitions.get(&id).map(|r| r.kind)
    }

    pub fn get_name(&self, id: DefId) -> Option<Atom> {
        self.definitions.get(&id).map(|r| r.name)
    }

    pub fn get_container(&self, id: DefId) -> Option<DefId> {
        self.definitions.get(&id).and_then(|r| r.container)
    }

    pub fn get_type_params(&self, id: DefId) -> Option<Vec<TypeParamInfo>> {
        self.definitions.get(&id).map(|r| r.type_params.clone())
    }

    pub fn get_arity(&self, id: DefId) -> usize {
        self.definitions.get(&id).map_or(0, |r| r.type_params.len())
    }

    pub fn get_constraints(&self, id: DefId, index: u32) -> Option<ConstraintSet> {
        self.definitions
            .get(&id)
            .and_then(|r| r.constraints.get(index as usize).cloned())
    }

    pub fn set_constraints(&self, id: DefId, index: u32, constraints: ConstraintSet) {
        if let Some(mut entry) = self.definitions.get_mut(&id)
            && let Some(slot) = entry.constraints.get_mut(index as usize)
        {
            *slot = constraints;
        }
    }

    pub fn set_heritage(
        &self,
        id: DefId,
        base_class: Option<AnnotatedType>,
        interfaces: Vec<AnnotatedType>,
    ) {
        if let Some(mut entry) = self.definitions.get_mut(&id) {
            entry.base_class = base_class;
            entry.interfaces = interfaces;
        }
    }

    pub fn set_use_site_error(&self, id: DefId, error: UseSiteError) {
        if let Some(mut entry) = self.definitions.get_mut(&id) {
            entry.use_site_error = Some(error);
        }
    }

    pub fn set_malformed(&self, id: DefId) {
        if let Some(mut entry) = self.definitions.get_mut(&id) {
            entry.is_malformed = true;
        }
    }

    /// Seal the shape of an extension. Returns `false` (and changes nothing)
    /// if a shape was already recorded.
    pub fn set_extension_shape(&self, id: DefId, shape: ExtensionShape) -> bool {
        let Some(mut entry) = self.definitions.get_mut(&id) else {
            return false;
        };
        if entry.extension.is_some() {
            trace!(def_id = %id.0, "extension shape already sealed");
            return false;
        }
        entry.extension = Some(shape);
        true
    }

    pub fn get_extension_shape(&self, id: DefId) -> Option<ExtensionShape> {
        self.definitions.get(&id).and_then(|r| r.extension.clone())
    }

    /// Declared accessibility met with that of every containing type.
    pub fn effective_accessibility(&self, id: DefId) -> Accessibility {
        let mut result = Accessibility::Public;
        let mut current = Some(id);
        while let Some(def) = current {
            let Some(entry) = self.definitions.get(&def) else {
                break;
            };
            result = result.meet(entry.accessibility);
            current = entry.container;
        }
        result
    }

    /// True if `id` or any of its containing types is `file`-local.
    pub fn is_file_local_including_containers(&self, id: DefId) -> bool {
        let mut current = Some(id);
        while let Some(def) = current {
            let Some(entry) = self.definitions.get(&def) else {
                return false;
            };
            if entry.is_file_local {
                return true;
            }
            current = entry.container;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All ids in allocation order.
    pub fn all_ids(&self) -> Vec<DefId> {
        let mut ids: Vec<DefId> = self.definitions.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}
