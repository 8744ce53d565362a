#![allow(missing_docs)]

use clinsig_core::ratio::{AlleleRatio, format_ratio, ratio};
use clinsig_core::reducers::{concat, loc, max, mean, min, sum, uniq};
use clinsig_model::AnnotationError;

#[test]
fn test_ratio_of_two_counts() {
    assert_eq!(ratio(&[0.0, 0.0]), AlleleRatio::Value(0.0));
    assert_eq!(ratio(&[3.0, 7.0]), AlleleRatio::Value(0.7));
    assert_eq!(ratio(&[0.0, 4.0]), AlleleRatio::Value(1.0));
}

#[test]
fn test_ratio_wrong_arity_is_bad() {
    assert_eq!(ratio(&[1.0, 2.0, 3.0]), AlleleRatio::Bad);
    assert_eq!(ratio(&[1.0]), AlleleRatio::Bad);
    assert_eq!(ratio(&[]), AlleleRatio::Bad);
    assert_eq!(AlleleRatio::Bad.to_string(), "BAD");
    assert!(matches!(
        AlleleRatio::Bad.into_result(),
        Err(AnnotationError::Shape { .. })
    ));
    assert_eq!(ratio(&[3.0, 7.0]).into_result().unwrap(), 0.7);
}

#[test]
fn test_format_ratio() {
    assert_eq!(format_ratio(0.0, 10.0), "0.0");
    assert_eq!(format_ratio(0.0, 0.0), "0.0");
    assert_eq!(format_ratio(1.0, 3.0), "0.333333333");
    assert_eq!(format_ratio(7.0, 10.0), "0.700000000");
}

#[test]
fn test_reducers() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    assert_eq!(mean(&[]), None);
    assert_eq!(loc("chr1", "100", "200"), "chr1:100-200");
    assert_eq!(sum(&[]), 0.0);
    assert_eq!(sum(&[0.5, 1.5]), 2.0);
    assert_eq!(max(&[0.001, 0.03, 0.002]), Some(0.03));
    assert_eq!(min(&[0.001, 0.03, 0.002]), Some(0.001));
    assert_eq!(max(&[]), None);
    assert_eq!(concat(&["a", "b", "a"]), "a,b,a");
    assert_eq!(uniq(&["a", "b", "a"]), "a,b");
    assert_eq!(uniq::<&str>(&[]), "");
}
