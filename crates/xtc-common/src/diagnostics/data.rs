//! Diagnostic message data.
//!
//! One row per diagnostic code. Codes are stable; templates use positional
//! `{0}`, `{1}`, ... placeholders filled by `format_message`.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const TYPE_DEFINED_IN_ERRONEOUS_ASSEMBLY: u32 = 12;
    pub const DUPLICATE_NAME_IN_NAMESPACE: u32 = 101;
    pub const DUPLICATE_NAME_IN_TYPE: u32 = 102;
    pub const MODIFIER_NOT_VALID_FOR_ITEM: u32 = 106;
    pub const MORE_THAN_ONE_PROTECTION_MODIFIER: u32 = 107;
    pub const CIRCULAR_BASE: u32 = 146;
    pub const OPERATOR_NEEDS_MATCH: u32 = 216;
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: u32 = 246;
    pub const MISSING_PARTIAL_MODIFIER: u32 = 260;
    pub const PARTIAL_DECLARATIONS_KIND_CONFLICT: u32 = 261;
    pub const PARTIAL_DECLARATIONS_ACCESSIBILITY_CONFLICT: u32 = 262;
    pub const PARTIAL_DECLARATIONS_TYPE_PARAMETER_NAMES: u32 = 264;
    pub const PARTIAL_DECLARATIONS_INCONSISTENT_CONSTRAINTS: u32 = 265;
    pub const WRONG_NUMBER_OF_TYPE_ARGUMENTS: u32 = 305;
    pub const TYPE_MAY_NOT_BE_TYPE_ARGUMENT: u32 = 306;
    pub const CONSTRAINT_NOT_SATISFIED_REFERENCE_TYPE: u32 = 311;
    pub const CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER: u32 = 314;
    pub const CONSTRAINT_NOT_SATISFIED_VALUE_TYPE: u32 = 315;
    pub const REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED: u32 = 452;
    pub const VALUE_TYPE_CONSTRAINT_NOT_SATISFIED: u32 = 453;
    pub const MEMBER_NAME_SAME_AS_TYPE: u32 = 542;
    pub const OPERATOR_MUST_BE_PUBLIC_AND_STATIC: u32 = 558;
    pub const INSTANCE_MEMBER_IN_STATIC_TYPE: u32 = 708;
    pub const INDEXER_IN_STATIC_TYPE: u32 = 720;
    pub const EXTENSION_METHOD_IN_INVALID_CONTAINER: u32 = 1106;
    pub const EXTENSION_METHOD_IN_NESTED_CLASS: u32 = 1109;
    pub const NAMESPACE_ELEMENT_CANNOT_BE_PRIVATE: u32 = 1527;
    pub const AUTO_PROPERTY_MUST_HAVE_GET_ACCESSOR: u32 = 8051;
    pub const NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT: u32 = 8634;
    pub const NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT: u32 = 8714;
    pub const FILE_TYPE_WITH_ACCESSIBILITY: u32 = 9052;
    pub const FILE_TYPE_NESTED: u32 = 9054;
    pub const BAD_EXTENSION_UNDERLYING_TYPE: u32 = 9105;
    pub const STATIC_UNDERLYING_TYPE_ON_INSTANCE_EXTENSION: u32 = 9106;
    pub const BASE_EXTENSION_MUST_BE_EXTENSION: u32 = 9107;
    pub const PARTIAL_DIFFERENT_UNDERLYING_TYPES: u32 = 9108;
    pub const INCONSISTENT_ACCESSIBILITY_UNDERLYING_TYPE: u32 = 9109;
    pub const INCONSISTENT_ACCESSIBILITY_BASE_EXTENSION: u32 = 9110;
    pub const CYCLE_IN_BASE_EXTENSIONS: u32 = 9111;
    pub const FILE_TYPE_UNDERLYING: u32 = 9112;
    pub const STATE_IN_EXTENSION: u32 = 9113;
    pub const EXTENSION_MISSING_UNDERLYING_TYPE: u32 = 9114;
    pub const PARTIAL_DIFFERENT_EXTENSION_MODIFIERS: u32 = 9115;
    pub const UNDERLYING_TYPES_MISMATCH: u32 = 9116;
    pub const DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH: u32 = 9117;
    pub const DUPLICATE_BASE_EXTENSION_TUPLE_NAMES: u32 = 9118;
    pub const DUPLICATE_BASE_EXTENSION_WITH_DIFFERENCES: u32 = 9119;
    pub const DUPLICATE_BASE_EXTENSION: u32 = 9120;
    pub const FILE_TYPE_BASE_EXTENSION: u32 = 9121;
    pub const MALFORMED_METADATA_EXTENSION: u32 = 9122;
    pub const STATIC_BASE_EXTENSION_ON_INSTANCE_EXTENSION: u32 = 9123;
}

pub mod diagnostic_messages {
    pub const TYPE_DEFINED_IN_ERRONEOUS_ASSEMBLY: &str =
        "The type '{0}' is defined in an assembly that is not referenced or contains errors: '{1}'.";
    pub const DUPLICATE_NAME_IN_NAMESPACE: &str =
        "The namespace '{1}' already contains a definition for '{0}'";
    pub const DUPLICATE_NAME_IN_TYPE: &str =
        "The type '{0}' already contains a definition for '{1}'";
    pub const MODIFIER_NOT_VALID_FOR_ITEM: &str =
        "The modifier '{0}' is not valid for this item";
    pub const MORE_THAN_ONE_PROTECTION_MODIFIER: &str =
        "More than one protection modifier";
    pub const CIRCULAR_BASE: &str =
        "Circular base type dependency involving '{0}' and '{1}'";
    pub const OPERATOR_NEEDS_MATCH: &str =
        "The operator '{0}' requires a matching operator '{1}' to also be defined";
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: &str =
        "The type or namespace name '{0}' could not be found (are you missing a using directive or an assembly reference?)";
    pub const MISSING_PARTIAL_MODIFIER: &str =
        "Missing partial modifier on declaration of type '{0}'; another partial declaration of this type exists";
    pub const PARTIAL_DECLARATIONS_KIND_CONFLICT: &str =
        "Partial declarations of '{0}' must be all classes, all structs, all interfaces, or all extensions";
    pub const PARTIAL_DECLARATIONS_ACCESSIBILITY_CONFLICT: &str =
        "Partial declarations of '{0}' have conflicting accessibility modifiers";
    pub const PARTIAL_DECLARATIONS_TYPE_PARAMETER_NAMES: &str =
        "Partial declarations of '{0}' must have the same type parameter names in the same order";
    pub const PARTIAL_DECLARATIONS_INCONSISTENT_CONSTRAINTS: &str =
        "Partial declarations of '{0}' have inconsistent constraints for type parameter '{1}'";
    pub const WRONG_NUMBER_OF_TYPE_ARGUMENTS: &str =
        "Using the generic type '{0}' requires {1} type arguments";
    pub const TYPE_MAY_NOT_BE_TYPE_ARGUMENT: &str =
        "The type '{0}' may not be used as a type argument";
    pub const CONSTRAINT_NOT_SATISFIED_REFERENCE_TYPE: &str =
        "The type '{3}' cannot be used as type parameter '{2}' in the generic type or method '{0}'. There is no implicit reference conversion from '{3}' to '{1}'.";
    pub const CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER: &str =
        "The type '{3}' cannot be used as type parameter '{2}' in the generic type or method '{0}'. There is no boxing conversion or type parameter conversion from '{3}' to '{1}'.";
    pub const CONSTRAINT_NOT_SATISFIED_VALUE_TYPE: &str =
        "The type '{3}' cannot be used as type parameter '{2}' in the generic type or method '{0}'. There is no boxing conversion from '{3}' to '{1}'.";
    pub const REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED: &str =
        "The type '{2}' must be a reference type in order to use it as parameter '{1}' in the generic type or method '{0}'";
    pub const VALUE_TYPE_CONSTRAINT_NOT_SATISFIED: &str =
        "The type '{2}' must be a non-nullable value type in order to use it as parameter '{1}' in the generic type or method '{0}'";
    pub const MEMBER_NAME_SAME_AS_TYPE: &str =
        "'{0}': member names cannot be the same as their enclosing type";
    pub const OPERATOR_MUST_BE_PUBLIC_AND_STATIC: &str =
        "User-defined operator '{0}' must be declared static and public";
    pub const INSTANCE_MEMBER_IN_STATIC_TYPE: &str =
        "'{0}': cannot declare instance members in a static class";
    pub const INDEXER_IN_STATIC_TYPE: &str =
        "'{0}': cannot declare indexers in a static class";
    pub const EXTENSION_METHOD_IN_INVALID_CONTAINER: &str =
        "Extension method must be defined in a non-generic static class";
    pub const EXTENSION_METHOD_IN_NESTED_CLASS: &str =
        "Extension methods must be defined in a top level static class; {0} is a nested class";
    pub const NAMESPACE_ELEMENT_CANNOT_BE_PRIVATE: &str =
        "Elements defined in a namespace cannot be explicitly declared as private, protected, protected internal, or private protected";
    pub const AUTO_PROPERTY_MUST_HAVE_GET_ACCESSOR: &str =
        "Auto-implemented properties must have get accessors.";
    pub const NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT: &str =
        "The type '{2}' cannot be used as type parameter '{1}' in the generic type or method '{0}'. Nullability of type argument '{2}' doesn't match 'class' constraint.";
    pub const NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT: &str =
        "The type '{2}' cannot be used as type parameter '{1}' in the generic type or method '{0}'. Nullability of type argument '{2}' doesn't match 'notnull' constraint.";
    pub const FILE_TYPE_WITH_ACCESSIBILITY: &str =
        "File-local type '{0}' cannot use accessibility modifiers.";
    pub const FILE_TYPE_NESTED: &str =
        "File-local type '{0}' must be defined in a top level type; '{0}' is a nested type.";
    pub const BAD_EXTENSION_UNDERLYING_TYPE: &str =
        "Extension '{0}' cannot augment underlying type '{1}'. The extension underlying type may not be dynamic, a pointer, a nullable reference type, a ref struct or an extension.";
    pub const STATIC_UNDERLYING_TYPE_ON_INSTANCE_EXTENSION: &str =
        "Instance extension '{0}' cannot augment static type '{1}'.";
    pub const BASE_EXTENSION_MUST_BE_EXTENSION: &str =
        "'{0}' is not an un-annotated extension type.";
    pub const PARTIAL_DIFFERENT_UNDERLYING_TYPES: &str =
        "Partial declarations of '{0}' must not specify different underlying types.";
    pub const INCONSISTENT_ACCESSIBILITY_UNDERLYING_TYPE: &str =
        "Inconsistent accessibility: underlying type '{1}' is less accessible than extension '{0}'";
    pub const INCONSISTENT_ACCESSIBILITY_BASE_EXTENSION: &str =
        "Inconsistent accessibility: base extension '{1}' is less accessible than extension '{0}'";
    pub const CYCLE_IN_BASE_EXTENSIONS: &str =
        "Base extension '{1}' causes a cycle in the extension hierarchy of '{0}'.";
    pub const FILE_TYPE_UNDERLYING: &str =
        "File-local type '{0}' cannot be used as a underlying type of non-file-local extension '{1}'.";
    pub const STATE_IN_EXTENSION: &str =
        "'{0}': cannot declare instance members with state in extension types.";
    pub const EXTENSION_MISSING_UNDERLYING_TYPE: &str =
        "No part of a partial extension '{0}' includes an underlying type specification.";
    pub const PARTIAL_DIFFERENT_EXTENSION_MODIFIERS: &str =
        "Partial declarations of '{0}' must specify the same extension modifier ('implicit' or 'explicit').";
    pub const UNDERLYING_TYPES_MISMATCH: &str =
        "Extension '{0}' has underlying type '{1}' but a base extension has underlying type '{2}'.";
    pub const DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH: &str =
        "'{0}' is already listed in the base extension list on type '{1}' with different nullability of reference types.";
    pub const DUPLICATE_BASE_EXTENSION_TUPLE_NAMES: &str =
        "'{0}' is already listed in the base extension list on type '{2}' with different tuple element names, as '{1}'.";
    pub const DUPLICATE_BASE_EXTENSION_WITH_DIFFERENCES: &str =
        "'{0}' is already listed in the base extension list on type '{2}' as '{1}'.";
    pub const DUPLICATE_BASE_EXTENSION: &str =
        "'{0}' is already listed in the base extension list";
    pub const FILE_TYPE_BASE_EXTENSION: &str =
        "File-local type '{0}' cannot be used as a base extension of non-file-local extension '{1}'.";
    pub const MALFORMED_METADATA_EXTENSION: &str =
        "'{0}' is an extension type from metadata that is malformed and cannot be used.";
    pub const STATIC_BASE_EXTENSION_ON_INSTANCE_EXTENSION: &str =
        "Instance extension '{0}' cannot have static base extension '{1}'.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_DEFINED_IN_ERRONEOUS_ASSEMBLY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_DEFINED_IN_ERRONEOUS_ASSEMBLY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_NAME_IN_NAMESPACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_NAME_IN_NAMESPACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_NAME_IN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_NAME_IN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MODIFIER_NOT_VALID_FOR_ITEM,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MODIFIER_NOT_VALID_FOR_ITEM,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MORE_THAN_ONE_PROTECTION_MODIFIER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MORE_THAN_ONE_PROTECTION_MODIFIER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CIRCULAR_BASE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CIRCULAR_BASE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OPERATOR_NEEDS_MATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OPERATOR_NEEDS_MATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_PARTIAL_MODIFIER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MISSING_PARTIAL_MODIFIER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARTIAL_DECLARATIONS_KIND_CONFLICT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARTIAL_DECLARATIONS_KIND_CONFLICT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARTIAL_DECLARATIONS_ACCESSIBILITY_CONFLICT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARTIAL_DECLARATIONS_ACCESSIBILITY_CONFLICT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARTIAL_DECLARATIONS_TYPE_PARAMETER_NAMES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARTIAL_DECLARATIONS_TYPE_PARAMETER_NAMES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARTIAL_DECLARATIONS_INCONSISTENT_CONSTRAINTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARTIAL_DECLARATIONS_INCONSISTENT_CONSTRAINTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::WRONG_NUMBER_OF_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::WRONG_NUMBER_OF_TYPE_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_MAY_NOT_BE_TYPE_ARGUMENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_MAY_NOT_BE_TYPE_ARGUMENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRAINT_NOT_SATISFIED_REFERENCE_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRAINT_NOT_SATISFIED_REFERENCE_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRAINT_NOT_SATISFIED_TYPE_PARAMETER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRAINT_NOT_SATISFIED_VALUE_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRAINT_NOT_SATISFIED_VALUE_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REFERENCE_TYPE_CONSTRAINT_NOT_SATISFIED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::VALUE_TYPE_CONSTRAINT_NOT_SATISFIED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::VALUE_TYPE_CONSTRAINT_NOT_SATISFIED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MEMBER_NAME_SAME_AS_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MEMBER_NAME_SAME_AS_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OPERATOR_MUST_BE_PUBLIC_AND_STATIC,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OPERATOR_MUST_BE_PUBLIC_AND_STATIC,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INSTANCE_MEMBER_IN_STATIC_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INSTANCE_MEMBER_IN_STATIC_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INDEXER_IN_STATIC_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INDEXER_IN_STATIC_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXTENSION_METHOD_IN_INVALID_CONTAINER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXTENSION_METHOD_IN_INVALID_CONTAINER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXTENSION_METHOD_IN_NESTED_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXTENSION_METHOD_IN_NESTED_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NAMESPACE_ELEMENT_CANNOT_BE_PRIVATE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NAMESPACE_ELEMENT_CANNOT_BE_PRIVATE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AUTO_PROPERTY_MUST_HAVE_GET_ACCESSOR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AUTO_PROPERTY_MUST_HAVE_GET_ACCESSOR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FILE_TYPE_WITH_ACCESSIBILITY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FILE_TYPE_WITH_ACCESSIBILITY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FILE_TYPE_NESTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FILE_TYPE_NESTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_EXTENSION_UNDERLYING_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BAD_EXTENSION_UNDERLYING_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::STATIC_UNDERLYING_TYPE_ON_INSTANCE_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::STATIC_UNDERLYING_TYPE_ON_INSTANCE_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BASE_EXTENSION_MUST_BE_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BASE_EXTENSION_MUST_BE_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARTIAL_DIFFERENT_UNDERLYING_TYPES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARTIAL_DIFFERENT_UNDERLYING_TYPES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INCONSISTENT_ACCESSIBILITY_UNDERLYING_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INCONSISTENT_ACCESSIBILITY_UNDERLYING_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INCONSISTENT_ACCESSIBILITY_BASE_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INCONSISTENT_ACCESSIBILITY_BASE_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CYCLE_IN_BASE_EXTENSIONS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CYCLE_IN_BASE_EXTENSIONS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FILE_TYPE_UNDERLYING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FILE_TYPE_UNDERLYING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::STATE_IN_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::STATE_IN_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXTENSION_MISSING_UNDERLYING_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXTENSION_MISSING_UNDERLYING_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARTIAL_DIFFERENT_EXTENSION_MODIFIERS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARTIAL_DIFFERENT_EXTENSION_MODIFIERS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNDERLYING_TYPES_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNDERLYING_TYPES_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_BASE_EXTENSION_TUPLE_NAMES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_BASE_EXTENSION_TUPLE_NAMES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_BASE_EXTENSION_WITH_DIFFERENCES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_BASE_EXTENSION_WITH_DIFFERENCES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_BASE_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_BASE_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FILE_TYPE_BASE_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FILE_TYPE_BASE_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MALFORMED_METADATA_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MALFORMED_METADATA_EXTENSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::STATIC_BASE_EXTENSION_ON_INSTANCE_EXTENSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::STATIC_BASE_EXTENSION_ON_INSTANCE_EXTENSION,
    },
];
