#![allow(missing_docs)]

use clinsig_core::threshold::{is_actionable, is_actionable_label};
use clinsig_model::Significance;

#[test]
fn test_non_pathogenic_label_is_never_actionable() {
    assert!(!is_actionable(&"drug-response".into(), 0.02, 0.01));
    assert!(!is_actionable(&"benign".into(), 1.0, 0.0));
}

#[test]
fn test_frequency_must_exceed_cutoff() {
    assert!(is_actionable(&"likely-pathogenic".into(), 0.02, 0.01));
    assert!(!is_actionable(&"likely-pathogenic".into(), 0.005, 0.01));
    // Strictly greater.
    assert!(!is_actionable(&"pathogenic".into(), 0.01, 0.01));
}

#[test]
fn test_zero_cutoff_triggers_on_any_frequency() {
    assert!(is_actionable(&"pathogenic".into(), 1e-9, 0.0));
    assert!(!is_actionable(&"pathogenic".into(), 0.0, 0.0));
}

#[test]
fn test_composite_is_canonicalized() {
    let significance = Significance::from(&["uncertain", "pathogenic"][..]);
    assert!(is_actionable(&significance, 0.02, 0.01));
    assert_eq!(
        is_actionable(&significance, 0.02, 0.01),
        is_actionable_label("uncertain,pathogenic", 0.02, 0.01)
    );

    let benign = Significance::from(&["benign", "likely-benign"][..]);
    assert!(!is_actionable(&benign, 0.5, 0.01));

    let empty = Significance::Composite(vec![]);
    assert!(!is_actionable(&empty, 0.5, 0.01));
}

#[test]
fn test_marker_is_case_sensitive() {
    assert!(!is_actionable(&"Pathogenic".into(), 0.02, 0.01));
}
