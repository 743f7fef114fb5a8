//! Constraint satisfaction.
//!
//! Pure relation between a type argument and the `ConstraintSet` of the
//! parameter it is substituted for. Returns violations as data; the checker
//! decides where they are reported and when (after every shape is sealed).

use crate::classify::TypeClassifier;
use crate::conversions::has_implicit_conversion;
use crate::def::{ConstraintSet, DefId, DefinitionStore};
use crate::instantiate::{TypeSubstitution, instantiate_type};
use crate::intern::TypeInterner;
use crate::types::{AnnotatedType, NullableAnnotation};
use smallvec::SmallVec;
use tracing::trace;

/// What kind of type failed an explicit type constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentKind {
    ReferenceType,
    /// Value types, and extension types (which have no conversions).
    ValueType,
    TypeParameter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintViolationKind {
    /// `class` given a non-reference type.
    ReferenceType,
    /// `struct` given anything but a non-nullable value type.
    ValueType,
    /// `class` given `T?` (warning).
    NullableForReferenceType,
    /// `notnull` given a nullable type (warning).
    NullableForNotNull,
    /// No implicit conversion to `constraint`.
    TypeConstraint {
        constraint: AnnotatedType,
        argument_kind: ArgumentKind,
    },
    /// Pointers, by-refs and the like are never type arguments.
    NotTypeArgument,
}

impl ConstraintViolationKind {
    pub const fn is_warning(self) -> bool {
        matches!(
            self,
            ConstraintViolationKind::NullableForReferenceType
                | ConstraintViolationKind::NullableForNotNull
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub parameter_index: u32,
    pub argument: AnnotatedType,
    pub kind: ConstraintViolationKind,
}

pub type Violations = SmallVec<[ConstraintViolation; 2]>;

pub struct ConstraintChecker<'a> {
    types: &'a TypeInterner,
    defs: &'a DefinitionStore,
}

impl<'a> ConstraintChecker<'a> {
    pub fn new(types: &'a TypeInterner, defs: &'a DefinitionStore) -> Self {
        ConstraintChecker { types, defs }
    }

    /// Check every argument of the constructed type `def<args>`.
    pub fn check_instantiation(&self, def: DefId, args: &[AnnotatedType]) -> Violations {
        let subst = TypeSubstitution::for_def(self.defs, def, args);
        let mut violations = Violations::new();
        for (index, arg) in args.iter().enumerate() {
            let Some(constraints) = self.defs.get_constraints(def, index as u32) else {
                continue;
            };
            violations.extend(self.check_type_argument(&constraints, &subst, index as u32, *arg));
        }
        if !violations.is_empty() {
            trace!(def = def.0, count = violations.len(), "constraint violations");
        }
        violations
    }

    /// Check one argument against its parameter's constraints. `subst` maps
    /// the generic's own parameters, for constraint types that mention them.
    pub fn check_type_argument(
        &self,
        constraints: &ConstraintSet,
        subst: &TypeSubstitution,
        parameter_index: u32,
        arg: AnnotatedType,
    ) -> Violations {
        let classifier = TypeClassifier::new(self.types, self.defs);
        let mut violations = Violations::new();
        let mut push = |kind| {
            violations.push(ConstraintViolation {
                parameter_index,
                argument: arg,
                kind,
            });
        };

        if classifier.is_error(arg.ty) {
            return violations;
        }
        if classifier.may_not_be_type_argument(arg.ty) {
            push(ConstraintViolationKind::NotTypeArgument);
            return violations;
        }

        if let Some(annotation) = constraints.reference_type {
            if !classifier.is_reference_type(arg.ty) {
                push(ConstraintViolationKind::ReferenceType);
            } else if annotation == NullableAnnotation::NotAnnotated && arg.is_annotated() {
                push(ConstraintViolationKind::NullableForReferenceType);
            }
        }

        if constraints.value_type && !classifier.is_non_nullable_value_type(arg.ty) {
            push(ConstraintViolationKind::ValueType);
        }

        if constraints.not_null
            && (classifier.is_nullable_value_type(arg.ty)
                || (arg.is_annotated() && !classifier.is_value_type(arg.ty)))
        {
            push(ConstraintViolationKind::NullableForNotNull);
        }

        for constraint in &constraints.types {
            let constraint = instantiate_type(self.types, *constraint, subst);
            if classifier.is_error(constraint.ty) {
                continue;
            }
            if has_implicit_conversion(self.types, self.defs, arg.ty, constraint.ty) {
                continue;
            }
            let argument_kind = if classifier.is_type_parameter(arg.ty) {
                ArgumentKind::TypeParameter
            } else if classifier.is_reference_type(arg.ty) {
                ArgumentKind::ReferenceType
            } else {
                ArgumentKind::ValueType
            };
            push(ConstraintViolationKind::TypeConstraint {
                constraint,
                argument_kind,
            });
        }

        violations
    }
}
