//! Declaration modifiers and the type-declaration legality table.
//!
//! Member modifier legality lives with the member binder in the checker; the
//! binder only validates modifiers that decide how fragments merge (type
//! accessibility, `static`, `file`, ...).

use crate::syntax::TypeKind;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use xtc_common::Accessibility;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const INTERNAL = 1 << 1;
        const PROTECTED = 1 << 2;
        const PRIVATE = 1 << 3;
        const FILE = 1 << 4;
        const PARTIAL = 1 << 5;
        const STATIC = 1 << 6;
        const ABSTRACT = 1 << 7;
        const SEALED = 1 << 8;
        const VIRTUAL = 1 << 9;
        const OVERRIDE = 1 << 10;
        const READONLY = 1 << 11;
        const REQUIRED = 1 << 12;
        const ASYNC = 1 << 13;
        const NEW = 1 << 14;
        const EXTERN = 1 << 15;
        const UNSAFE = 1 << 16;
        const VOLATILE = 1 << 17;
        const REF = 1 << 18;

        const ACCESSIBILITY = Self::PUBLIC.bits()
            | Self::INTERNAL.bits()
            | Self::PROTECTED.bits()
            | Self::PRIVATE.bits();
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::empty()
    }
}

/// Keyword spelling of each single modifier, in source order.
const KEYWORDS: &[(Modifiers, &str)] = &[
    (Modifiers::PUBLIC, "public"),
    (Modifiers::INTERNAL, "internal"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::FILE, "file"),
    (Modifiers::NEW, "new"),
    (Modifiers::STATIC, "static"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::SEALED, "sealed"),
    (Modifiers::VIRTUAL, "virtual"),
    (Modifiers::OVERRIDE, "override"),
    (Modifiers::READONLY, "readonly"),
    (Modifiers::REQUIRED, "required"),
    (Modifiers::EXTERN, "extern"),
    (Modifiers::UNSAFE, "unsafe"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::ASYNC, "async"),
    (Modifiers::REF, "ref"),
    (Modifiers::PARTIAL, "partial"),
];

/// Result of reading the accessibility modifiers of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessibilityModifiers {
    /// No accessibility modifier was written.
    None,
    /// A valid single modifier or one of the two legal combinations.
    Declared(Accessibility),
    /// Any other combination (e.g. `public private`).
    Conflicting,
}

impl Modifiers {
    pub fn keyword(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, kw)| *kw)
            .unwrap_or("")
    }

    /// Iterate the single (non-accessibility) modifiers set in `self`, in
    /// source order.
    pub fn non_accessibility_flags(self) -> impl Iterator<Item = (Modifiers, &'static str)> {
        KEYWORDS
            .iter()
            .copied()
            .filter(move |(flag, _)| !Modifiers::ACCESSIBILITY.contains(*flag) && self.contains(*flag))
    }

    pub fn accessibility(self) -> AccessibilityModifiers {
        let access = self & Modifiers::ACCESSIBILITY;
        if access.is_empty() {
            return AccessibilityModifiers::None;
        }
        let declared = if access == Modifiers::PUBLIC {
            Accessibility::Public
        } else if access == Modifiers::INTERNAL {
            Accessibility::Internal
        } else if access == Modifiers::PROTECTED {
            Accessibility::Protected
        } else if access == Modifiers::PRIVATE {
            Accessibility::Private
        } else if access == Modifiers::PROTECTED | Modifiers::INTERNAL {
            Accessibility::ProtectedOrInternal
        } else if access == Modifiers::PRIVATE | Modifiers::PROTECTED {
            Accessibility::ProtectedAndInternal
        } else {
            return AccessibilityModifiers::Conflicting;
        };
        AccessibilityModifiers::Declared(declared)
    }
}

/// Where a type declaration appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationScope {
    Namespace,
    Type(TypeKind),
}

/// Non-accessibility modifiers a type declaration of `kind` may carry.
pub fn allowed_type_modifiers(kind: TypeKind, scope: DeclarationScope) -> Modifiers {
    let common = Modifiers::UNSAFE | Modifiers::FILE;
    let mut allowed = match kind {
        TypeKind::Class => {
            common | Modifiers::PARTIAL | Modifiers::STATIC | Modifiers::SEALED | Modifiers::ABSTRACT
        }
        TypeKind::Struct => common | Modifiers::PARTIAL | Modifiers::READONLY | Modifiers::REF,
        TypeKind::Extension => common | Modifiers::PARTIAL | Modifiers::STATIC,
        TypeKind::Interface => common | Modifiers::PARTIAL,
        TypeKind::Enum | TypeKind::Delegate => common,
    };
    if matches!(scope, DeclarationScope::Type(_)) {
        allowed |= Modifiers::NEW;
    }
    allowed
}

/// Whether a type declared in `scope` may be declared with `accessibility`.
pub fn is_type_accessibility_allowed(accessibility: Accessibility, scope: DeclarationScope) -> bool {
    match scope {
        DeclarationScope::Namespace => {
            matches!(accessibility, Accessibility::Public | Accessibility::Internal)
        }
        // Protected access has no meaning where there is no inheritance.
        DeclarationScope::Type(TypeKind::Struct | TypeKind::Extension) => !matches!(
            accessibility,
            Accessibility::Protected
                | Accessibility::ProtectedOrInternal
                | Accessibility::ProtectedAndInternal
        ),
        DeclarationScope::Type(_) => true,
    }
}

/// Accessibility of a type declaration without an accessibility modifier.
pub fn default_type_accessibility(scope: DeclarationScope) -> Accessibility {
    match scope {
        DeclarationScope::Namespace => Accessibility::Internal,
        DeclarationScope::Type(TypeKind::Interface) => Accessibility::Public,
        DeclarationScope::Type(_) => Accessibility::Private,
    }
}
