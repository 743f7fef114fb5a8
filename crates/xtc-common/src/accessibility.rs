//! Declared and effective accessibility.
//!
//! Accessibilities form a lattice:
//!
//! ```text
//!                  Public
//!                    |
//!           ProtectedOrInternal
//!              /           \
//!         Protected      Internal
//!              \           /
//!           ProtectedAndInternal
//!                    |
//!                 Private
//! ```
//!
//! The effective accessibility of a nested or constructed type is the `meet`
//! of its own accessibility and every accessibility it is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    Private,
    /// `private protected`
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    /// True when every location that can see `other` can also see `self`.
    pub fn is_at_least_as_accessible_as(self, other: Accessibility) -> bool {
        use Accessibility::*;
        match (self, other) {
            (a, b) if a == b => true,
            (Public, _) => true,
            (_, Public) => false,
            (ProtectedOrInternal, _) => true,
            (_, ProtectedOrInternal) => false,
            (Protected, Internal) | (Internal, Protected) => false,
            (Protected | Internal, _) => true,
            (_, Protected | Internal) => false,
            (ProtectedAndInternal, _) => true,
            (Private, _) => false,
        }
    }

    /// Greatest lower bound of two accessibilities.
    #[must_use]
    pub fn meet(self, other: Accessibility) -> Accessibility {
        use Accessibility::*;
        if self.is_at_least_as_accessible_as(other) {
            other
        } else if other.is_at_least_as_accessible_as(self) {
            self
        } else {
            // Only Protected and Internal are incomparable.
            debug_assert!(matches!(
                (self, other),
                (Protected, Internal) | (Internal, Protected)
            ));
            ProtectedAndInternal
        }
    }

    /// Source spelling of the accessibility.
    pub const fn as_str(self) -> &'static str {
        match self {
            Accessibility::Private => "private",
            Accessibility::ProtectedAndInternal => "private protected",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedOrInternal => "protected internal",
            Accessibility::Public => "public",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
