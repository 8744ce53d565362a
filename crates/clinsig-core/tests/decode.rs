#![allow(missing_docs)]

use clinsig_core::code_table::{clinical_significance, variant_origin};
use clinsig_core::decode::{decode, decode_with};
use clinsig_model::{AnnotationError, FieldKind, RawFieldValue, Scalar, UnknownCodePolicy};

fn sequence(codes: &[&str]) -> RawFieldValue {
    RawFieldValue::Sequence(codes.iter().map(|code| Scalar::from(*code)).collect())
}

#[test]
fn test_scalar_decodes_directly() {
    let table = clinical_significance();
    assert_eq!(decode(table, &RawFieldValue::from(5)).unwrap(), "pathogenic");
    assert_eq!(decode(table, &RawFieldValue::from("2")).unwrap(), "benign");
    assert_eq!(decode(table, &RawFieldValue::from(".")).unwrap(), ".");
    assert_eq!(
        decode(table, &RawFieldValue::Scalar(Scalar::Float(4.0))).unwrap(),
        "likely-pathogenic"
    );
}

#[test]
fn test_scalar_is_not_split() {
    let error = decode(clinical_significance(), &RawFieldValue::from("4|5")).unwrap_err();
    assert!(matches!(error, AnnotationError::UnknownCode { ref code, .. } if code == "4|5"));
}

#[test]
fn test_sequence_with_composites() {
    let decoded = decode(clinical_significance(), &sequence(&["4|5", "2"])).unwrap();
    assert_eq!(decoded, "likely-pathogenic|pathogenic,benign");
}

#[test]
fn test_sequence_preserves_order_and_count() {
    let decoded = decode(clinical_significance(), &sequence(&["5", "5|5|0", "255", "."])).unwrap();
    assert_eq!(decoded, "pathogenic,pathogenic|pathogenic|uncertain,other,.");
}

#[test]
fn test_integer_sequence() {
    let value = RawFieldValue::Sequence(vec![Scalar::Integer(1), Scalar::Integer(16)]);
    assert_eq!(decode(variant_origin(), &value).unwrap(), "germline,maternal");
}

#[test]
fn test_empty_sequence_is_empty_string() {
    let decoded = decode(clinical_significance(), &RawFieldValue::Sequence(vec![])).unwrap();
    assert_eq!(decoded, "");
}

#[test]
fn test_empty_composite_segment_is_malformed() {
    for element in ["4|", "|5", "4||5"] {
        let error = decode(clinical_significance(), &sequence(&[element])).unwrap_err();
        assert!(
            matches!(error, AnnotationError::MalformedField { ref value, .. } if value == element),
            "{element}: {error}"
        );
    }
}

#[test]
fn test_unknown_sub_code_fails_or_substitutes() {
    let value = sequence(&["4|9", "2"]);
    let error = decode(clinical_significance(), &value).unwrap_err();
    assert!(matches!(error, AnnotationError::UnknownCode { ref code, .. } if code == "9"));

    let policy = UnknownCodePolicy::Substitute("other".to_string());
    let decoded = decode_with(clinical_significance(), &value, &policy).unwrap();
    assert_eq!(decoded, "likely-pathogenic|other,benign");
}

#[test]
fn test_parsed_text_field() {
    let value = RawFieldValue::parse(FieldKind::String, "5,4|5,.").unwrap();
    let decoded = decode(clinical_significance(), &value).unwrap();
    assert_eq!(decoded, "pathogenic,likely-pathogenic|pathogenic,.");
}

#[test]
fn test_trailing_comma_is_rejected_before_lookup() {
    let error = RawFieldValue::parse(FieldKind::String, "5,").unwrap_err();
    assert!(matches!(error, AnnotationError::MalformedField { .. }));
}
