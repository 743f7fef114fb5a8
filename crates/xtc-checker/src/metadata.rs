//! Import of externally compiled types.
//!
//! Referenced assemblies are described by a small serde model
//! (`MetadataAssembly`). The importer registers every type in the shared
//! `DefinitionStore` and recovers extension shapes from the marker
//! convention:
//!
//! - an extension is a struct with exactly one static method named
//!   `<ImplicitExtension>$` or `<ExplicitExtension>$` returning `void`;
//! - the marker's first parameter is the underlying type, the remaining
//!   parameters are the base extensions;
//! - the type carries an `ObsoleteAttribute` with
//!   [`EXTENSION_OBSOLETE_MESSAGE`] so older compilers refuse to use it.
//!
//! Anything that looks like an extension but breaks the convention is
//! imported as a malformed extension, and every use of it is an error.
//! References into assemblies that were not supplied become placeholder
//! definitions carrying a use-site error.

use crate::name_resolution::predefined_type_id;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use xtc_binder::PredefinedType;
use xtc_common::{Accessibility, Atom};
use xtc_solver::{
    AnnotatedType, ConstraintSet, DefId, DefKind, DefOrigin, DefinitionInfo, DefinitionStore,
    ExtendedType, ExtensionKind, ExtensionShape, BaseExtensionEdge, NullableAnnotation,
    TypeInterner, UseSiteError,
};

pub const IMPLICIT_EXTENSION_MARKER: &str = "<ImplicitExtension>$";
pub const EXPLICIT_EXTENSION_MARKER: &str = "<ExplicitExtension>$";
pub const OBSOLETE_ATTRIBUTE: &str = "System.ObsoleteAttribute";
pub const EXTENSION_OBSOLETE_MESSAGE: &str =
    "Extension types are not supported by this version of your compiler.";

// =============================================================================
// Input model
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAssembly {
    pub name: String,
    /// The assembly was produced by a compilation with errors.
    #[serde(default)]
    pub has_errors: bool,
    #[serde(default)]
    pub types: Vec<MetadataTypeDef>,
}

impl MetadataAssembly {
    pub fn new(name: impl Into<String>) -> Self {
        MetadataAssembly {
            name: name.into(),
            has_errors: false,
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self) -> Self {
        self.has_errors = true;
        self
    }

    #[must_use]
    pub fn with_type(mut self, ty: MetadataTypeDef) -> Self {
        self.types.push(ty);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataTypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

fn public() -> Accessibility {
    Accessibility::Public
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataTypeDef {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    pub kind: MetadataTypeKind,
    #[serde(default = "public")]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_ref_like: bool,
    #[serde(default)]
    pub type_parameters: Vec<MetadataTypeParameter>,
    #[serde(default)]
    pub base_type: Option<MetadataTypeRef>,
    #[serde(default)]
    pub interfaces: Vec<MetadataTypeRef>,
    #[serde(default)]
    pub methods: Vec<MetadataMethod>,
    #[serde(default)]
    pub attributes: Vec<MetadataAttribute>,
}

impl MetadataTypeDef {
    pub fn new(kind: MetadataTypeKind, name: impl Into<String>) -> Self {
        MetadataTypeDef {
            name: name.into(),
            namespace: String::new(),
            kind,
            accessibility: Accessibility::Public,
            is_static: false,
            is_sealed: false,
            is_ref_like: false,
            type_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(MetadataTypeKind::Class, name)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(MetadataTypeKind::Struct, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(MetadataTypeKind::Interface, name)
    }

    /// A well-formed extension in the marker encoding.
    pub fn extension(
        name: impl Into<String>,
        kind: ExtensionKind,
        underlying: MetadataTypeRef,
        bases: Vec<MetadataTypeRef>,
    ) -> Self {
        let marker_name = match kind {
            ExtensionKind::Implicit => IMPLICIT_EXTENSION_MARKER,
            ExtensionKind::Explicit => EXPLICIT_EXTENSION_MARKER,
        };
        let mut marker = MetadataMethod::new(marker_name, MetadataTypeRef::void())
            .with_static()
            .with_parameter(underlying);
        for base in bases {
            marker = marker.with_parameter(base);
        }
        Self::structure(name)
            .with_method(marker)
            .with_attribute(MetadataAttribute::extension_obsolete())
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_type_parameter(mut self, parameter: MetadataTypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_base_type(mut self, base: MetadataTypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: MetadataTypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MetadataMethod) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: MetadataAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn has_extension_obsolete_attribute(&self) -> bool {
        self.attributes.iter().any(MetadataAttribute::is_extension_obsolete)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataTypeParameter {
    pub name: String,
    pub reference_type: bool,
    pub value_type: bool,
    pub not_null: bool,
    pub constraint_types: Vec<MetadataTypeRef>,
}

impl MetadataTypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        MetadataTypeParameter {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataMethod {
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    pub return_type: MetadataTypeRef,
    #[serde(default)]
    pub parameters: Vec<MetadataParameter>,
}

impl MetadataMethod {
    pub fn new(name: impl Into<String>, return_type: MetadataTypeRef) -> Self {
        MetadataMethod {
            name: name.into(),
            is_static: false,
            return_type,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, ty: MetadataTypeRef) -> Self {
        self.parameters.push(MetadataParameter {
            ty,
            has_custom_modifiers: false,
        });
        self
    }

    /// A parameter carrying `modopt`/`modreq` custom modifiers.
    #[must_use]
    pub fn with_modified_parameter(mut self, ty: MetadataTypeRef) -> Self {
        self.parameters.push(MetadataParameter {
            ty,
            has_custom_modifiers: true,
        });
        self
    }

    fn is_extension_marker(&self) -> bool {
        self.name == IMPLICIT_EXTENSION_MARKER || self.name == EXPLICIT_EXTENSION_MARKER
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataParameter {
    pub ty: MetadataTypeRef,
    #[serde(default)]
    pub has_custom_modifiers: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAttribute {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl MetadataAttribute {
    pub fn extension_obsolete() -> Self {
        MetadataAttribute {
            name: OBSOLETE_ATTRIBUTE.to_string(),
            arguments: vec![EXTENSION_OBSOLETE_MESSAGE.to_string()],
        }
    }

    fn is_extension_obsolete(&self) -> bool {
        self.name == OBSOLETE_ATTRIBUTE
            && self
                .arguments
                .first()
                .is_some_and(|message| message == EXTENSION_OBSOLETE_MESSAGE)
    }
}

/// A type as encoded in a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataTypeRef {
    Intrinsic(PredefinedType),
    Named {
        /// Defining assembly; `None` searches every imported assembly.
        #[serde(default)]
        assembly: Option<String>,
        #[serde(default)]
        namespace: String,
        name: String,
        #[serde(default)]
        args: Vec<MetadataTypeRef>,
    },
    /// Type parameter of the declaring type, by position.
    TypeParameter(u32),
    Array {
        element: Box<MetadataTypeRef>,
        rank: u32,
    },
    Pointer(Box<MetadataTypeRef>),
    NullableValue(Box<MetadataTypeRef>),
}

impl MetadataTypeRef {
    pub fn void() -> Self {
        MetadataTypeRef::Intrinsic(PredefinedType::Void)
    }

    pub fn named(name: impl Into<String>) -> Self {
        MetadataTypeRef::Named {
            assembly: None,
            namespace: String::new(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn qualified(
        assembly: Option<&str>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        args: Vec<MetadataTypeRef>,
    ) -> Self {
        MetadataTypeRef::Named {
            assembly: assembly.map(str::to_string),
            namespace: namespace.into(),
            name: name.into(),
            args,
        }
    }
}

// =============================================================================
// Symbol lookup
// =============================================================================

/// Names the checker cannot find among source declarations.
pub trait SymbolLookup {
    /// The definition `name` with `arity` type parameters in `namespace`.
    fn lookup_type(&self, namespace: Atom, name: Atom, arity: u32) -> Option<DefId>;

    /// Some definition `name` in `namespace`, of any arity.
    fn lookup_any_arity(&self, namespace: Atom, name: Atom) -> Option<DefId>;
}

/// Imported types by namespace, name and arity. The first assembly to
/// define a name wins.
#[derive(Debug, Default)]
pub struct MetadataSymbolTable {
    by_arity: FxHashMap<(Atom, Atom, u32), DefId>,
    by_name: FxHashMap<(Atom, Atom), DefId>,
}

impl MetadataSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, namespace: Atom, name: Atom, arity: u32, def: DefId) {
        self.by_arity.entry((namespace, name, arity)).or_insert(def);
        self.by_name.entry((namespace, name)).or_insert(def);
    }

    pub fn len(&self) -> usize {
        self.by_arity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_arity.is_empty()
    }
}

impl SymbolLookup for MetadataSymbolTable {
    fn lookup_type(&self, namespace: Atom, name: Atom, arity: u32) -> Option<DefId> {
        self.by_arity.get(&(namespace, name, arity)).copied()
    }

    fn lookup_any_arity(&self, namespace: Atom, name: Atom) -> Option<DefId> {
        self.by_name.get(&(namespace, name)).copied()
    }
}

// =============================================================================
// Importer
// =============================================================================

/// How one imported type is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ImportedKind {
    Plain(DefKind),
    Extension(ExtensionKind),
    Malformed(ExtensionKind),
}

fn plain_kind(kind: MetadataTypeKind) -> DefKind {
    match kind {
        MetadataTypeKind::Class => DefKind::Class,
        MetadataTypeKind::Struct => DefKind::Struct,
        MetadataTypeKind::Interface => DefKind::Interface,
        MetadataTypeKind::Enum => DefKind::Enum,
        MetadataTypeKind::Delegate => DefKind::Delegate,
    }
}

/// Decide from the marker convention what `ty` is. Base-extension
/// parameters are validated later, once every kind is known.
fn classify(ty: &MetadataTypeDef) -> ImportedKind {
    let markers: Vec<&MetadataMethod> = ty
        .methods
        .iter()
        .filter(|m| m.is_extension_marker())
        .collect();
    let Some(marker) = markers.first() else {
        return if ty.has_extension_obsolete_attribute() {
            ImportedKind::Malformed(ExtensionKind::Explicit)
        } else {
            ImportedKind::Plain(plain_kind(ty.kind))
        };
    };
    let kind = if marker.name == IMPLICIT_EXTENSION_MARKER {
        ExtensionKind::Implicit
    } else {
        ExtensionKind::Explicit
    };
    let well_formed = markers.len() == 1
        && ty.kind == MetadataTypeKind::Struct
        && marker.is_static
        && !marker.parameters.is_empty()
        && marker.return_type == MetadataTypeRef::void()
        && marker.parameters.iter().all(|p| !p.has_custom_modifiers);
    if well_formed {
        ImportedKind::Extension(kind)
    } else {
        ImportedKind::Malformed(kind)
    }
}

/// Register every type of `assemblies` in `defs` and return the lookup
/// table the checker consults for names not declared in source.
pub fn import_assemblies(
    types: &TypeInterner,
    defs: &DefinitionStore,
    assemblies: &[MetadataAssembly],
) -> MetadataSymbolTable {
    let mut importer = MetadataImporter::new(types, defs, assemblies);
    importer.register_all();
    importer.complete_all();
    debug!(
        assemblies = assemblies.len(),
        types = importer.table.len(),
        "metadata imported"
    );
    importer.table
}

struct ImportedType<'m> {
    def: DefId,
    assembly: Atom,
    source: &'m MetadataTypeDef,
    kind: ImportedKind,
}

struct MetadataImporter<'a, 'm> {
    types: &'a TypeInterner,
    defs: &'a DefinitionStore,
    assemblies: &'m [MetadataAssembly],
    imported_assemblies: FxHashSet<Atom>,
    by_assembly: FxHashMap<(Atom, Atom, Atom, u32), DefId>,
    /// Placeholders for types in assemblies that were not supplied.
    missing: FxHashMap<(Atom, Atom, Atom, u32), DefId>,
    imported: Vec<ImportedType<'m>>,
    table: MetadataSymbolTable,
}

impl<'a, 'm> MetadataImporter<'a, 'm> {
    fn new(types: &'a TypeInterner, defs: &'a DefinitionStore, assemblies: &'m [MetadataAssembly]) -> Self {
        MetadataImporter {
            types,
            defs,
            assemblies,
            imported_assemblies: FxHashSet::default(),
            by_assembly: FxHashMap::default(),
            missing: FxHashMap::default(),
            imported: Vec::new(),
            table: MetadataSymbolTable::new(),
        }
    }

    fn atom(&self, s: &str) -> Atom {
        self.types.intern_string(s)
    }

    /// Pass 1: allocate a definition for every type so references resolve
    /// regardless of declaration order.
    fn register_all(&mut self) {
        for assembly in self.assemblies {
            let assembly_name = self.atom(&assembly.name);
            self.imported_assemblies.insert(assembly_name);
            for ty in &assembly.types {
                let kind = classify(ty);
                let def_kind = match kind {
                    ImportedKind::Plain(kind) => kind,
                    ImportedKind::Extension(kind) | ImportedKind::Malformed(kind) => {
                        DefKind::Extension(kind)
                    }
                };
                let name = self.atom(&ty.name);
                let namespace = self.atom(&ty.namespace);
                let params: Vec<Atom> = ty.type_parameters.iter().map(|p| self.atom(&p.name)).collect();
                let mut info = DefinitionInfo::new(def_kind, name)
                    .with_namespace(namespace)
                    .with_type_params(&params)
                    .with_accessibility(ty.accessibility)
                    .with_static(ty.is_static)
                    .with_ref_like(ty.is_ref_like)
                    .with_origin(DefOrigin::Metadata {
                        assembly: assembly_name,
                    });
                info.is_sealed = ty.is_sealed;
                let def = self.defs.register(info);
                if assembly.has_errors {
                    self.defs.set_use_site_error(
                        def,
                        UseSiteError {
                            assembly: assembly_name,
                        },
                    );
                }
                if matches!(kind, ImportedKind::Malformed(_)) {
                    trace!(name = %ty.name, "malformed extension marker");
                    self.defs.set_malformed(def);
                }
                let arity = params.len() as u32;
                self.by_assembly
                    .entry((assembly_name, namespace, name, arity))
                    .or_insert(def);
                self.table.insert(namespace, name, arity, def);
                self.imported.push(ImportedType {
                    def,
                    assembly: assembly_name,
                    source: ty,
                    kind,
                });
            }
        }
    }

    /// Pass 2: constraints, heritage and extension shapes.
    fn complete_all(&mut self) {
        let imported = std::mem::take(&mut self.imported);
        for entry in &imported {
            self.complete(entry);
        }
        self.imported = imported;
    }

    fn complete(&mut self, entry: &ImportedType<'m>) {
        let ty = entry.source;
        for (index, param) in ty.type_parameters.iter().enumerate() {
            let constraints = ConstraintSet {
                reference_type: param.reference_type.then_some(NullableAnnotation::Oblivious),
                value_type: param.value_type,
                not_null: param.not_null,
                types: param
                    .constraint_types
                    .iter()
                    .map(|c| self.resolve(entry, c))
                    .collect(),
            };
            if !constraints.is_empty() {
                self.defs.set_constraints(entry.def, index as u32, constraints);
            }
        }

        let base_class = ty.base_type.as_ref().map(|b| self.resolve(entry, b));
        let interfaces = ty.interfaces.iter().map(|i| self.resolve(entry, i)).collect();
        self.defs.set_heritage(entry.def, base_class, interfaces);

        match entry.kind {
            ImportedKind::Plain(_) => {}
            ImportedKind::Malformed(_) => {
                self.defs.set_extension_shape(entry.def, ExtensionShape::default());
            }
            ImportedKind::Extension(_) => {
                let Some(marker) = ty.methods.iter().find(|m| m.is_extension_marker()) else {
                    return;
                };
                let mut parameters = marker.parameters.iter().map(|p| self.resolve(entry, &p.ty));
                let underlying = parameters.next();
                let bases: Vec<AnnotatedType> = parameters.collect();
                let bases_are_extensions = bases.iter().all(|base| {
                    self.types
                        .named_def(base.ty)
                        .and_then(|(def, _)| self.defs.get_kind(def))
                        .is_some_and(DefKind::is_extension)
                });
                if !bases_are_extensions {
                    trace!(name = %ty.name, "extension marker lists a non-extension base");
                    self.defs.set_malformed(entry.def);
                    self.defs.set_extension_shape(entry.def, ExtensionShape::default());
                    return;
                }
                let shape = ExtensionShape {
                    extended_type: underlying.map(|ty| ExtendedType {
                        ty,
                        is_error: self.types.contains_error(ty.ty),
                    }),
                    base_extensions: bases.into_iter().map(BaseExtensionEdge::new).collect(),
                };
                self.defs.set_extension_shape(entry.def, shape);
            }
        }
    }

    fn resolve(&mut self, entry: &ImportedType<'m>, ty: &MetadataTypeRef) -> AnnotatedType {
        let id = match ty {
            MetadataTypeRef::Intrinsic(predefined) => predefined_type_id(*predefined),
            MetadataTypeRef::TypeParameter(index) => {
                let name = entry
                    .source
                    .type_parameters
                    .get(*index as usize)
                    .map(|p| self.atom(&p.name))
                    .unwrap_or(Atom::NONE);
                self.types.type_param(entry.def, *index, name)
            }
            MetadataTypeRef::Array { element, rank } => {
                let element = self.resolve(entry, element);
                self.types.array(element, *rank)
            }
            MetadataTypeRef::Pointer(inner) => {
                let inner = self.resolve(entry, inner);
                self.types.pointer(inner.ty)
            }
            MetadataTypeRef::NullableValue(inner) => {
                let inner = self.resolve(entry, inner);
                self.types.nullable_value(inner.ty)
            }
            MetadataTypeRef::Named {
                assembly,
                namespace,
                name,
                args,
            } => {
                let args: Vec<AnnotatedType> = args.iter().map(|a| self.resolve(entry, a)).collect();
                match self.resolve_named(entry, assembly.as_deref(), namespace, name, args.len() as u32) {
                    Some(def) => self.types.named(def, args),
                    None => {
                        let name = self.atom(name);
                        self.types.error(name, args)
                    }
                }
            }
        };
        AnnotatedType::oblivious(id)
    }

    fn resolve_named(
        &mut self,
        entry: &ImportedType<'m>,
        assembly: Option<&str>,
        namespace: &str,
        name: &str,
        arity: u32,
    ) -> Option<DefId> {
        let namespace = self.atom(namespace);
        let name = self.atom(name);
        let Some(assembly) = assembly else {
            // Unqualified references prefer the declaring assembly.
            return self
                .by_assembly
                .get(&(entry.assembly, namespace, name, arity))
                .copied()
                .or_else(|| self.table.lookup_type(namespace, name, arity));
        };
        let assembly = self.atom(assembly);
        if self.imported_assemblies.contains(&assembly) {
            return self.by_assembly.get(&(assembly, namespace, name, arity)).copied();
        }
        let key = (assembly, namespace, name, arity);
        if let Some(def) = self.missing.get(&key) {
            return Some(*def);
        }
        let params: Vec<Atom> = (0..arity).map(|i| self.atom(&format!("T{i}"))).collect();
        let def = self.defs.register(
            DefinitionInfo::class(name)
                .with_namespace(namespace)
                .with_type_params(&params)
                .with_accessibility(Accessibility::Public)
                .with_origin(DefOrigin::Metadata { assembly }),
        );
        self.defs.set_use_site_error(def, UseSiteError { assembly });
        debug!(
            assembly = %self.types.resolve_atom(assembly),
            name = %self.types.resolve_atom(name),
            "reference into missing assembly"
        );
        self.missing.insert(key, def);
        Some(def)
    }
}
