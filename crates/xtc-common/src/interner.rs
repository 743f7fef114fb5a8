//! String interner for identifier deduplication.
//!
//! Names of types, members and type parameters are interned into a shared pool
//! and passed around as u32 indices (`Atom`s). Comparisons become integer
//! comparisons instead of string comparisons.
//!
//! The interner is shared between the binder (which interns declaration names)
//! and the checker (which resolves them for display), so interning takes `&self`.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Default)]
struct InternerInner {
    map: FxHashMap<Arc<str>, Atom>,
    strings: Vec<Arc<str>>,
}

/// String interner that deduplicates strings and returns Atom handles.
///
/// # Example
/// ```
/// use xtc_common::Interner;
/// let interner = Interner::new();
/// let a1 = interner.intern("Outer");
/// let a2 = interner.intern("Outer");
/// assert_eq!(a1, a2);
/// assert_eq!(&*interner.resolve(a1), "Outer");
/// ```
pub struct Interner {
    inner: RwLock<InternerInner>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut inner = InternerInner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: Arc<str> = Arc::from("");
        inner.strings.push(empty.clone());
        inner.map.insert(empty, Atom::NONE);
        Interner {
            inner: RwLock::new(inner),
        }
    }

    /// Intern a string, returning its Atom handle.
    /// If the string was already interned, returns the existing Atom.
    pub fn intern(&self, s: &str) -> Atom {
        {
            let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
            if let Some(&atom) = inner.map.get(s) {
                return atom;
            }
        }
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        // Another writer may have won the race between the two locks.
        if let Some(&atom) = inner.map.get(s) {
            return atom;
        }
        let atom = Atom(inner.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        inner.strings.push(owned.clone());
        inner.map.insert(owned, atom);
        atom
    }

    /// Look up an already interned string without interning it.
    pub fn get(&self, s: &str) -> Option<Atom> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.map.get(s).copied()
    }

    /// Resolve an Atom back to its string value.
    /// Returns the empty string for atoms this interner never produced.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .strings
            .get(atom.0 as usize)
            .cloned()
            .unwrap_or_else(|| inner.strings[0].clone())
    }

    /// Number of interned strings (including the empty string).
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}
