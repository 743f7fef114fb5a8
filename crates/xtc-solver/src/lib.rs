//! Type universe and pure type relations.
//!
//! The solver owns everything that can be computed without source syntax:
//! interned types (`TypeId`), definitions (`DefId`), structural comparison,
//! substitution, classification (reference/value/extension), implicit
//! conversions, constraint satisfaction, and display. It never reports
//! diagnostics; the checker turns solver results into diagnostics.

pub mod types;
pub use types::{AnnotatedType, IntrinsicKind, NullableAnnotation, TupleElement, TypeData, TypeId};

pub mod intern;
pub use intern::TypeInterner;

pub mod def;
pub use def::{
    BaseExtensionEdge, ConstraintSet, DefId, DefKind, DefOrigin, DefinitionInfo, DefinitionStore,
    ExtendedType, ExtensionKind, ExtensionShape, TypeParamInfo, UseSiteError,
};

pub mod compare;
pub use compare::{TypeCompareKind, TypeDifference, classify_difference, merge_annotations, types_equal};

pub mod instantiate;
pub use instantiate::{TypeSubstitution, instantiate_type};

pub mod classify;
pub use classify::TypeClassifier;

pub mod conversions;

pub mod constraints;
pub use constraints::{ArgumentKind, ConstraintChecker, ConstraintViolation, ConstraintViolationKind};

pub mod format;
pub use format::TypeFormatter;

pub mod recursion;

#[cfg(test)]
#[path = "../tests/compare_tests.rs"]
mod compare_tests;

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod instantiate_tests;

#[cfg(test)]
#[path = "../tests/constraint_tests.rs"]
mod constraint_tests;

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod recursion_tests;
