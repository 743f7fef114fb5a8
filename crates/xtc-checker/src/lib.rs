//! Extension type checker.
//!
//! Drives resolution over the symbols sealed by the declaration table:
//! - `name_resolution` - written types to `TypeId`s, recording constraint sites
//! - `extended_type` - the type each extension augments
//! - `base_extensions` - base-extension lists, cycles and shape sealing
//! - `member_binder` - member symbols, modifier legality, state rules
//! - `constraint_checker` - the deferred constraint pass
//! - `diagnostics` - the diagnostic reporter
//! - `metadata` - imported assemblies and symbol lookup
//!
//! `CheckerState::check_program` runs the stages in order.

pub mod context;
pub use context::{CheckerContext, CheckerOptions, ConstraintSite};

pub mod diagnostics;
pub use diagnostics::DiagnosticBag;

pub mod metadata;
pub use metadata::{
    MetadataAssembly, MetadataAttribute, MetadataMethod, MetadataSymbolTable, MetadataTypeDef,
    MetadataTypeKind, MetadataTypeParameter, MetadataTypeRef, SymbolLookup, import_assemblies,
};

pub mod name_resolution;
pub use name_resolution::TypeScope;

mod base_extensions;
mod constraint_checker;
mod extended_type;

pub mod member_binder;
pub use member_binder::MemberSymbol;

pub mod state;
pub use state::CheckerState;

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;

#[cfg(test)]
#[path = "../tests/extended_type_tests.rs"]
mod extended_type_tests;

#[cfg(test)]
#[path = "../tests/base_extension_tests.rs"]
mod base_extension_tests;

#[cfg(test)]
#[path = "../tests/member_binder_tests.rs"]
mod member_binder_tests;

#[cfg(test)]
#[path = "../tests/constraint_checker_tests.rs"]
mod constraint_checker_tests;

#[cfg(test)]
#[path = "../tests/metadata_tests.rs"]
mod metadata_tests;

#[cfg(test)]
#[path = "../tests/diagnostic_bag_tests.rs"]
mod diagnostic_bag_tests;
