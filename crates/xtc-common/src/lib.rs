//! Common types and utilities for the xtc extension type checker.
//!
//! This crate provides foundational types used across all xtc crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - The accessibility lattice (`Accessibility`)
//! - Compiler limits and thresholds
//! - Diagnostic types and the diagnostic message table

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Declared and effective accessibility
pub mod accessibility;
pub use accessibility::Accessibility;

// Centralized limits and thresholds
pub mod limits;

// Diagnostic types and message data
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    diagnostic_codes, format_message, get_diagnostic_category, get_diagnostic_message,
    get_message_template,
};

#[cfg(test)]
#[path = "../tests/accessibility_tests.rs"]
mod accessibility_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
