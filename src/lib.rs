//! Declaration merging and constraint checking for extension types.
//!
//! The pipeline lives in the member crates:
//! - `xtc-common` - interner, spans, accessibility, diagnostic catalog
//! - `xtc-binder` - declaration fragments and the declaration table
//! - `xtc-solver` - interned types, definitions, comparison and constraints
//! - `xtc-checker` - extended types, base extensions, members, constraint pass
//!
//! This crate adds the `Compilation` facade over them.

pub use xtc_binder as binder;
pub use xtc_checker as checker;
pub use xtc_common as common;
pub use xtc_solver as solver;

pub mod error;
pub use error::{Result, XtcError};

pub mod compilation;
pub use compilation::{
    BaseExtensionView, Compilation, CompilationOptions, CompilationResult, ExtensionView, MemberView,
};

pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};

pub use xtc_binder::{
    MemberFragment, NullableContext, TypeDeclarationFragment, TypeParameterSyntax, TypeSyntax,
};
pub use xtc_checker::{CheckerOptions, MetadataAssembly, MetadataTypeDef, MetadataTypeRef};
pub use xtc_common::{Diagnostic, DiagnosticCategory};
