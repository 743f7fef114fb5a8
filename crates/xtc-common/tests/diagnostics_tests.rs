use crate::diagnostics::diagnostic_codes;
use crate::{
    Diagnostic, DiagnosticCategory, Interner, format_message, get_diagnostic_category,
    get_message_template,
};

#[test]
fn format_message_substitutes_positional_arguments() {
    let template = get_message_template(diagnostic_codes::UNDERLYING_TYPES_MISMATCH)
        .expect("template for underlying mismatch");
    let text = format_message(template, &["R2", "C<object>", "C<dynamic>"]);
    assert_eq!(
        text,
        "Extension 'R2' has underlying type 'C<object>' but a base extension has underlying type 'C<dynamic>'."
    );
}

#[test]
fn codes_are_unique() {
    let mut codes: Vec<u32> = crate::diagnostics::DIAGNOSTIC_MESSAGES
        .iter()
        .map(|m| m.code)
        .collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total, "duplicate diagnostic code in data table");
}

#[test]
fn nullability_only_diagnostics_are_warnings() {
    for code in [
        diagnostic_codes::DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH,
        diagnostic_codes::NULLABLE_ARGUMENT_FOR_NOTNULL_CONSTRAINT,
        diagnostic_codes::NULLABLE_ARGUMENT_FOR_CLASS_CONSTRAINT,
    ] {
        assert_eq!(
            get_diagnostic_category(code),
            Some(DiagnosticCategory::Warning),
            "code {code}"
        );
    }
    for code in [
        diagnostic_codes::CYCLE_IN_BASE_EXTENSIONS,
        diagnostic_codes::BAD_EXTENSION_UNDERLYING_TYPE,
        diagnostic_codes::INCONSISTENT_ACCESSIBILITY_UNDERLYING_TYPE,
        diagnostic_codes::EXTENSION_MISSING_UNDERLYING_TYPE,
    ] {
        assert_eq!(
            get_diagnostic_category(code),
            Some(DiagnosticCategory::Error),
            "code {code}"
        );
    }
}

#[test]
fn from_code_uses_table_category() {
    let diag = Diagnostic::from_code(
        "a.cs".to_string(),
        10,
        2,
        diagnostic_codes::DUPLICATE_BASE_EXTENSION_NULLABILITY_MISMATCH,
        &["R<object?>", "R2"],
    );
    assert!(diag.is_warning());
    assert_eq!(diag.start, 10);
    assert!(diag.message_text.starts_with("'R<object?>' is already listed"));
}

#[test]
fn diagnostic_serializes_without_empty_related_information() {
    let diag = Diagnostic::error("a.cs".to_string(), 0, 1, "boom".to_string(), 9105);
    let json = serde_json::to_string(&diag).expect("serialize diagnostic");
    assert!(!json.contains("related_information"));
    assert!(json.contains("\"code\":9105"));
}

#[test]
fn interner_round_trips_and_deduplicates() {
    let interner = Interner::new();
    let a = interner.intern("UnderlyingClass");
    let b = interner.intern("UnderlyingClass");
    assert_eq!(a, b);
    assert!(!a.is_none());
    assert_eq!(&*interner.resolve(a), "UnderlyingClass");
    assert_eq!(interner.get("Missing"), None);
}
