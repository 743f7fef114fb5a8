//! Type representation.
//!
//! Types are interned: structurally identical `TypeData` values share one
//! `TypeId`, so identity comparison is an integer comparison. Nullable
//! annotations are part of the structure of type arguments, array elements
//! and tuple elements, but the top-level annotation of a use lives beside the
//! `TypeId` in an `AnnotatedType`.

use crate::def::DefId;
use serde::Serialize;
use xtc_common::Atom;

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Anonymous error type; satisfies every check to avoid cascades.
    pub const ERROR: TypeId = TypeId(0);
    pub const OBJECT: TypeId = TypeId(1);
    pub const DYNAMIC: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const BOOL: TypeId = TypeId(4);
    pub const CHAR: TypeId = TypeId(5);
    pub const INT: TypeId = TypeId(6);
    pub const LONG: TypeId = TypeId(7);
    pub const DOUBLE: TypeId = TypeId(8);
    pub const NINT: TypeId = TypeId(9);
    pub const VOID: TypeId = TypeId(10);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 11;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IntrinsicKind {
    Object,
    Dynamic,
    String,
    Bool,
    Char,
    Int,
    Long,
    Double,
    NInt,
    Void,
}

impl IntrinsicKind {
    /// Intrinsics in `TypeId` order, starting at `TypeId::OBJECT`.
    pub const ALL: [IntrinsicKind; 10] = [
        IntrinsicKind::Object,
        IntrinsicKind::Dynamic,
        IntrinsicKind::String,
        IntrinsicKind::Bool,
        IntrinsicKind::Char,
        IntrinsicKind::Int,
        IntrinsicKind::Long,
        IntrinsicKind::Double,
        IntrinsicKind::NInt,
        IntrinsicKind::Void,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            IntrinsicKind::Object => "object",
            IntrinsicKind::Dynamic => "dynamic",
            IntrinsicKind::String => "string",
            IntrinsicKind::Bool => "bool",
            IntrinsicKind::Char => "char",
            IntrinsicKind::Int => "int",
            IntrinsicKind::Long => "long",
            IntrinsicKind::Double => "double",
            IntrinsicKind::NInt => "nint",
            IntrinsicKind::Void => "void",
        }
    }

    pub const fn is_reference_type(self) -> bool {
        matches!(
            self,
            IntrinsicKind::Object | IntrinsicKind::Dynamic | IntrinsicKind::String
        )
    }

    pub const fn is_value_type(self) -> bool {
        matches!(
            self,
            IntrinsicKind::Bool
                | IntrinsicKind::Char
                | IntrinsicKind::Int
                | IntrinsicKind::Long
                | IntrinsicKind::Double
                | IntrinsicKind::NInt
        )
    }
}

/// Nullable-reference annotation on one use of a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum NullableAnnotation {
    /// Written where nullable annotations are disabled; matches anything.
    #[default]
    Oblivious,
    NotAnnotated,
    /// `T?`
    Annotated,
}

impl NullableAnnotation {
    #[inline]
    pub const fn is_oblivious(self) -> bool {
        matches!(self, NullableAnnotation::Oblivious)
    }

    /// The more informative of two annotations: anything beats oblivious.
    #[must_use]
    pub const fn merge(self, other: NullableAnnotation) -> NullableAnnotation {
        match self {
            NullableAnnotation::Oblivious => other,
            _ => self,
        }
    }
}

/// A type together with the top-level nullable annotation of its use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotatedType {
    pub ty: TypeId,
    pub annotation: NullableAnnotation,
}

impl AnnotatedType {
    #[inline]
    pub const fn new(ty: TypeId, annotation: NullableAnnotation) -> Self {
        AnnotatedType { ty, annotation }
    }

    #[inline]
    pub const fn oblivious(ty: TypeId) -> Self {
        Self::new(ty, NullableAnnotation::Oblivious)
    }

    #[inline]
    pub const fn not_annotated(ty: TypeId) -> Self {
        Self::new(ty, NullableAnnotation::NotAnnotated)
    }

    #[inline]
    pub const fn annotated(ty: TypeId) -> Self {
        Self::new(ty, NullableAnnotation::Annotated)
    }

    pub const ERROR: AnnotatedType = AnnotatedType::oblivious(TypeId::ERROR);

    #[inline]
    pub const fn is_annotated(self) -> bool {
        matches!(self.annotation, NullableAnnotation::Annotated)
    }

    #[inline]
    #[must_use]
    pub const fn with_annotation(self, annotation: NullableAnnotation) -> Self {
        Self::new(self.ty, annotation)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub ty: AnnotatedType,
    pub name: Option<Atom>,
}

/// Structure of an interned type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// A class, struct, interface, enum, delegate or extension, with its
    /// (possibly empty) type arguments.
    Named {
        def: DefId,
        args: Vec<AnnotatedType>,
    },
    TypeParameter {
        owner: DefId,
        index: u32,
        name: Atom,
    },
    Array {
        element: AnnotatedType,
        rank: u32,
    },
    Tuple(Vec<TupleElement>),
    /// `int?`
    NullableValue(TypeId),
    Pointer(TypeId),
    FunctionPointer {
        parameters: Vec<TypeId>,
        return_type: TypeId,
    },
    ByRef(TypeId),
    /// A name that failed to resolve, or a reference that is known to be broken.
    Error {
        name: Atom,
        args: Vec<AnnotatedType>,
    },
}
