//! Declaration collection and partial-type merging.
//!
//! The binder consumes `TypeDeclarationFragment`s produced by an external
//! parser, groups them by containing scope + name + arity, validates that the
//! fragments of each group may be merged, and seals every group into one
//! immutable `MergedTypeSymbol` stored in a `SymbolArena`.

pub mod syntax;
pub use syntax::{
    ConstraintSyntax, ExtensionModifier, MemberFragment, MemberKind, NameSegment,
    NullableContext, OperatorKind, ParameterSyntax, PredefinedType, PropertyAccessors,
    TupleElementSyntax, TypeDeclarationFragment, TypeKind, TypeParameterSyntax, TypeSyntax,
    TypeSyntaxKind,
};

pub mod modifiers;
pub use modifiers::Modifiers;

pub mod symbols;
pub use symbols::{
    Container, FragmentInfo, MemberDecl, MemberDeclKind, MergedTypeSymbol, SymbolArena, SymbolId,
    TypeParameterDecl,
};

pub mod state;
pub use state::DeclarationTable;

#[cfg(test)]
#[path = "../tests/declaration_table_tests.rs"]
mod declaration_table_tests;

#[cfg(test)]
#[path = "../tests/modifiers_tests.rs"]
mod modifiers_tests;
