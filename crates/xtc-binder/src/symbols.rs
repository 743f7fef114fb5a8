//! Sealed merged symbols and the arena that owns them.
//!
//! Symbols are identified by `SymbolId` handles into a `SymbolArena`; nested
//! types and containers refer to each other by handle, never by reference, so
//! self-referential and mutually-referential shapes need no shared ownership.

use crate::modifiers::Modifiers;
use crate::syntax::{
    ExtensionModifier, NullableContext, OperatorKind, ParameterSyntax, PropertyAccessors,
    TypeKind, TypeParameterSyntax, TypeSyntax,
};
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use xtc_common::{Accessibility, Atom, Span};

/// Handle to a `MergedTypeSymbol` in a `SymbolArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scope that directly contains a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// Interned dotted namespace name (`Atom::NONE` is the global namespace).
    Namespace(Atom),
    Type(SymbolId),
}

/// Per-fragment data the checker still needs after merging.
#[derive(Clone, Debug)]
pub struct FragmentInfo {
    pub file: String,
    pub name_span: Span,
    pub modifiers: Modifiers,
    pub extension_modifier: Option<ExtensionModifier>,
    pub type_parameters: Vec<TypeParameterSyntax>,
    pub underlying_type: Option<TypeSyntax>,
    pub base_list: Vec<TypeSyntax>,
    pub nullable_context: NullableContext,
}

#[derive(Clone, Debug)]
pub struct TypeParameterDecl {
    pub name: Atom,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberDeclKind {
    Field,
    Constant,
    Method,
    Property(PropertyAccessors),
    Indexer,
    Event { field_like: bool },
    Operator(OperatorKind),
    NestedType(SymbolId),
}

/// A member as declared in one fragment, before binding.
#[derive(Clone, Debug)]
pub struct MemberDecl {
    /// Index into `MergedTypeSymbol::fragments`.
    pub fragment: usize,
    pub name: Atom,
    pub name_span: Span,
    pub kind: MemberDeclKind,
    pub modifiers: Modifiers,
    pub ty: Option<TypeSyntax>,
    pub parameters: Vec<ParameterSyntax>,
}

/// The logical union of all fragments sharing a container, name and arity.
///
/// Produced once by `DeclarationTable::seal` and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct MergedTypeSymbol {
    pub id: SymbolId,
    pub name: Atom,
    pub container: Container,
    /// Namespace the outermost containing type lives in.
    pub namespace: Atom,
    pub kind: TypeKind,
    /// First-seen extension modifier; `None` for non-extensions.
    pub extension_modifier: Option<ExtensionModifier>,
    /// Declared accessibility after defaults and conflict resolution.
    pub accessibility: Accessibility,
    /// The accessibility was written explicitly on some fragment.
    pub has_explicit_accessibility: bool,
    pub is_partial: bool,
    pub is_static: bool,
    pub is_file_local: bool,
    pub is_ref_like: bool,
    pub is_sealed: bool,
    pub is_abstract: bool,
    pub type_parameters: Vec<TypeParameterDecl>,
    pub fragments: Vec<FragmentInfo>,
    pub members: Vec<MemberDecl>,
    pub nested_types: Vec<SymbolId>,
}

impl MergedTypeSymbol {
    #[inline]
    pub fn arity(&self) -> u32 {
        self.type_parameters.len() as u32
    }

    #[inline]
    pub fn is_extension(&self) -> bool {
        self.kind == TypeKind::Extension
    }

    /// The fragment whose name token anchors symbol-level diagnostics.
    #[inline]
    pub fn primary_fragment(&self) -> &FragmentInfo {
        &self.fragments[0]
    }

    pub fn containing_type(&self) -> Option<SymbolId> {
        match self.container {
            Container::Type(id) => Some(id),
            Container::Namespace(_) => None,
        }
    }
}

/// Arena of sealed symbols, with lookup by container + name + arity.
#[derive(Default, Debug)]
pub struct SymbolArena {
    symbols: Vec<MergedTypeSymbol>,
    by_name: FxHashMap<(Container, Atom), SmallVec<[SymbolId; 1]>>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&self) -> SymbolId {
        SymbolId(self.symbols.len() as u32)
    }

    pub(crate) fn push(&mut self, symbol: MergedTypeSymbol) -> SymbolId {
        let id = symbol.id;
        debug_assert_eq!(id, self.next_id());
        self.by_name
            .entry((symbol.container, symbol.name))
            .or_default()
            .push(id);
        self.symbols.push(symbol);
        id
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut MergedTypeSymbol> {
        self.symbols.get_mut(id.index())
    }

    pub fn get(&self, id: SymbolId) -> Option<&MergedTypeSymbol> {
        self.symbols.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergedTypeSymbol> {
        self.symbols.iter()
    }

    /// Find the symbol declared in `container` with `name` and `arity`.
    pub fn lookup(&self, container: Container, name: Atom, arity: u32) -> Option<SymbolId> {
        self.by_name.get(&(container, name))?.iter().copied().find(|id| {
            self.get(*id)
                .is_some_and(|symbol| symbol.arity() == arity)
        })
    }

    /// All symbols declared in `container` with `name`, of any arity.
    pub fn lookup_any_arity(&self, container: Container, name: Atom) -> &[SymbolId] {
        self.by_name
            .get(&(container, name))
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }
}
