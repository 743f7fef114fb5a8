//! The diagnostic reporter.
//!
//! Every rule violation found by the binder and checker goes through one
//! `DiagnosticBag`. Diagnostics are kept in insertion order; the options
//! decide which warnings are dropped, whether warnings become errors, and
//! where recording stops.

use crate::context::CheckerOptions;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};
use xtc_common::limits::INITIAL_DIAGNOSTIC_CAPACITY;
use xtc_common::{Diagnostic, DiagnosticCategory, Span};

#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    suppressed_codes: FxHashSet<u32>,
    warnings_as_errors: bool,
    max_diagnostics: Option<usize>,
    suppressed: usize,
    dropped: usize,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag {
            diagnostics: Vec::with_capacity(INITIAL_DIAGNOSTIC_CAPACITY),
            ..Default::default()
        }
    }

    pub fn with_options(options: &CheckerOptions) -> Self {
        DiagnosticBag {
            suppressed_codes: options.suppressed_codes.iter().copied().collect(),
            warnings_as_errors: options.warnings_as_errors,
            max_diagnostics: options.max_diagnostics,
            ..Self::new()
        }
    }

    pub fn push(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            if self.suppressed_codes.contains(&diagnostic.code) {
                trace!(code = diagnostic.code, "warning suppressed");
                self.suppressed += 1;
                return;
            }
            if self.warnings_as_errors {
                diagnostic.category = DiagnosticCategory::Error;
            }
        }
        if self
            .max_diagnostics
            .is_some_and(|max| self.diagnostics.len() >= max)
        {
            if self.dropped == 0 {
                debug!(limit = ?self.max_diagnostics, "diagnostic limit reached");
            }
            self.dropped += 1;
            return;
        }
        trace!(code = diagnostic.code, message = %diagnostic.message_text, "report");
        self.diagnostics.push(diagnostic);
    }

    /// Report the message-table entry for `code` at `span`.
    pub fn report(&mut self, file: &str, span: Span, code: u32, args: &[&str]) {
        self.push(Diagnostic::from_code(
            file.to_string(),
            span.start,
            span.len(),
            code,
            args,
        ));
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    pub fn has_code(&self, code: u32) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Warnings dropped because their code was suppressed.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    /// Diagnostics dropped after `max_diagnostics` was reached.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
