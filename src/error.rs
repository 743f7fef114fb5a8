//! Host-level failures.
//!
//! Problems in the checked program are never Rust errors; they are
//! `Diagnostic`s in the `CompilationResult`. `XtcError` covers misuse of the
//! facade itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XtcError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown diagnostic code {0} in suppression list")]
    UnknownDiagnosticCode(u32),

    #[error("this compilation has already been compiled")]
    AlreadyCompiled,
}

pub type Result<T> = std::result::Result<T, XtcError>;
