//! Centralized limits and thresholds for the extension type checker.
//!
//! Solver recursion limits (constraint satisfaction, conversion search,
//! instantiation) are centralized in `xtc_solver::recursion::RecursionProfile`.
//! The constants below cover the checker and binder.

// =============================================================================
// Recursion Depth Limits (Checker / Binder)
// =============================================================================

/// Maximum nesting depth of type syntax resolved by the checker.
///
/// `C<C<C<...>>>` deeper than this resolves to an error type instead of
/// overflowing the stack.
pub const MAX_TYPE_SYNTAX_DEPTH: u32 = 100;

/// Maximum nesting depth of nested type declarations merged by the binder.
pub const MAX_NESTED_TYPE_DEPTH: u32 = 64;

/// Maximum depth of the base-extension walk used for cycle detection.
///
/// The walk stops descending at this depth; edges past it are left
/// unchecked for cycles.
pub const MAX_BASE_EXTENSION_DEPTH: u32 = 1_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Initial capacity of per-compilation diagnostic buffers.
pub const INITIAL_DIAGNOSTIC_CAPACITY: usize = 32;
