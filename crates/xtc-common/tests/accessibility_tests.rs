use crate::Accessibility::{self, *};

#[test]
fn public_is_at_least_as_accessible_as_everything() {
    for other in [
        Private,
        ProtectedAndInternal,
        Protected,
        Internal,
        ProtectedOrInternal,
        Public,
    ] {
        assert!(Public.is_at_least_as_accessible_as(other), "{other}");
    }
}

#[test]
fn protected_and_internal_are_incomparable() {
    assert!(!Protected.is_at_least_as_accessible_as(Internal));
    assert!(!Internal.is_at_least_as_accessible_as(Protected));
    assert_eq!(Protected.meet(Internal), ProtectedAndInternal);
    assert_eq!(Internal.meet(Protected), ProtectedAndInternal);
}

#[test]
fn meet_picks_the_narrower_accessibility() {
    assert_eq!(Public.meet(Internal), Internal);
    assert_eq!(Internal.meet(Private), Private);
    assert_eq!(ProtectedOrInternal.meet(Protected), Protected);
    assert_eq!(Private.meet(Public), Private);
}

#[test]
fn private_is_only_as_accessible_as_private() {
    assert!(Private.is_at_least_as_accessible_as(Private));
    assert!(!Private.is_at_least_as_accessible_as(ProtectedAndInternal));
    assert!(ProtectedAndInternal.is_at_least_as_accessible_as(Private));
}

#[test]
fn accessibility_displays_source_spelling() {
    let spelled: Vec<String> = [ProtectedAndInternal, ProtectedOrInternal]
        .iter()
        .map(Accessibility::to_string)
        .collect();
    assert_eq!(spelled, vec!["private protected", "protected internal"]);
}
