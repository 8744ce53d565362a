#![allow(missing_docs)]

use clinsig_core::classify::{
    PathogenicityFlags, flag_drug_response, flag_histocompatibility, flag_likely_pathogenic,
    flag_pathogenic,
};

#[test]
fn test_pathogenic_flag() {
    assert!(flag_pathogenic(&[1, 3, 5]));
    assert!(!flag_pathogenic(&[1, 3]));
    assert!(!flag_pathogenic(&[]));
}

#[test]
fn test_each_flag_matches_its_code() {
    assert!(flag_likely_pathogenic(&[4]));
    assert!(!flag_likely_pathogenic(&[5]));
    assert!(flag_histocompatibility(&[2, 7]));
    assert!(!flag_histocompatibility(&[255]));
    assert!(flag_drug_response(&[6, 0]));
    assert!(!flag_drug_response(&[]));
}

#[test]
fn test_flags_from_codes() {
    let codes = vec![6, 4, 4];
    let flags = PathogenicityFlags::from_codes(&codes);
    assert_eq!(
        flags,
        PathogenicityFlags {
            pathogenic: false,
            likely_pathogenic: true,
            histocompatibility: false,
            drug_response: true,
        }
    );
    assert!(flags.any());
    // Input untouched.
    assert_eq!(codes, vec![6, 4, 4]);

    assert!(!PathogenicityFlags::from_codes(&[]).any());
}
