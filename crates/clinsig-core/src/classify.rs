//! Exact-match pathogenicity flags over raw significance codes.
//!
//! These work on the undecoded codes, so no table lookup is involved.

use serde::Serialize;

pub const LIKELY_PATHOGENIC_CODE: i64 = 4;
pub const PATHOGENIC_CODE: i64 = 5;
pub const DRUG_RESPONSE_CODE: i64 = 6;
pub const HISTOCOMPATIBILITY_CODE: i64 = 7;

/// True when any code equals `target`.
pub fn has_code(codes: &[i64], target: i64) -> bool {
    codes.contains(&target)
}

pub fn flag_pathogenic(codes: &[i64]) -> bool {
    has_code(codes, PATHOGENIC_CODE)
}

pub fn flag_likely_pathogenic(codes: &[i64]) -> bool {
    has_code(codes, LIKELY_PATHOGENIC_CODE)
}

pub fn flag_histocompatibility(codes: &[i64]) -> bool {
    has_code(codes, HISTOCOMPATIBILITY_CODE)
}

pub fn flag_drug_response(codes: &[i64]) -> bool {
    has_code(codes, DRUG_RESPONSE_CODE)
}

/// All four flags for one code sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PathogenicityFlags {
    pub pathogenic: bool,
    pub likely_pathogenic: bool,
    pub histocompatibility: bool,
    pub drug_response: bool,
}

impl PathogenicityFlags {
    pub fn from_codes(codes: &[i64]) -> Self {
        Self {
            pathogenic: flag_pathogenic(codes),
            likely_pathogenic: flag_likely_pathogenic(codes),
            histocompatibility: flag_histocompatibility(codes),
            drug_response: flag_drug_response(codes),
        }
    }

    pub fn any(&self) -> bool {
        self.pathogenic || self.likely_pathogenic || self.histocompatibility || self.drug_response
    }
}
