//! Static code tables for coded ClinVar fields.
//!
//! Two tables exist:
//!
//! - **Clinical significance** (`CLNSIG`): small integer codes plus the
//!   pass-through missing value `.`
//! - **Variant origin** (`CLNORIGIN`): a bitmask where every key is a power
//!   of two naming one provenance
//!
//! Both are built once on first access and shared by reference for the rest
//! of the process.

use std::collections::HashMap;
use std::sync::OnceLock;

use clinsig_model::{AnnotationError, Result, UnknownCodePolicy};

const CLINICAL_SIGNIFICANCE_CODES: [(&str, &str); 10] = [
    ("0", "uncertain"),
    ("1", "not-provided"),
    ("2", "benign"),
    ("3", "likely-benign"),
    ("4", "likely-pathogenic"),
    ("5", "pathogenic"),
    ("6", "drug-response"),
    ("7", "histocompatibility"),
    ("255", "other"),
    (".", "."),
];

const VARIANT_ORIGIN_CODES: [(&str, &str); 12] = [
    ("0", "unknown"),
    ("1", "germline"),
    ("2", "somatic"),
    ("4", "inherited"),
    ("8", "paternal"),
    ("16", "maternal"),
    ("32", "de-novo"),
    ("64", "biparental"),
    ("128", "uniparental"),
    ("256", "not-tested"),
    ("512", "tested-inconclusive"),
    ("1073741824", "other"),
];

/// Immutable mapping from string-encoded code to label.
///
/// Entries keep their declaration order for display; lookups go through a
/// hash index.
#[derive(Debug)]
pub struct CodeTable {
    name: &'static str,
    entries: Vec<(&'static str, &'static str)>,
    index: HashMap<&'static str, &'static str>,
}

impl CodeTable {
    /// Build a table. Keys must be unique; a repeated key keeps its first label.
    pub fn new(name: &'static str, entries: &[(&'static str, &'static str)]) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for &(code, label) in entries {
            if index.contains_key(code) {
                continue;
            }
            index.insert(code, label);
            kept.push((code, label));
        }
        Self {
            name,
            entries: kept,
            index,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Label for `code`, or [`AnnotationError::UnknownCode`].
    pub fn lookup(&self, code: &str) -> Result<&'static str> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| AnnotationError::UnknownCode {
                table: self.name,
                code: code.to_string(),
            })
    }

    /// Label for `code`, or `default` when the table has no such code.
    pub fn lookup_or<'a>(&self, code: &str, default: &'a str) -> &'a str {
        match self.index.get(code) {
            Some(label) => label,
            None => default,
        }
    }

    /// Resolve `code` under an explicit unknown-code policy.
    pub fn resolve<'a>(&self, code: &str, policy: &'a UnknownCodePolicy) -> Result<&'a str> {
        match policy {
            UnknownCodePolicy::Error => self.lookup(code),
            UnknownCodePolicy::Substitute(default) => {
                if !self.contains(code) {
                    tracing::debug!(
                        table = self.name,
                        code,
                        substitute = default.as_str(),
                        "substituting unknown code"
                    );
                }
                Ok(self.lookup_or(code, default))
            }
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static CLINICAL_SIGNIFICANCE: OnceLock<CodeTable> = OnceLock::new();
static VARIANT_ORIGIN: OnceLock<CodeTable> = OnceLock::new();

/// The clinical significance table (`CLNSIG` codes).
pub fn clinical_significance() -> &'static CodeTable {
    CLINICAL_SIGNIFICANCE
        .get_or_init(|| CodeTable::new("clinical significance", &CLINICAL_SIGNIFICANCE_CODES))
}

/// The variant origin table (`CLNORIGIN` bitmask codes).
pub fn variant_origin() -> &'static CodeTable {
    VARIANT_ORIGIN.get_or_init(|| CodeTable::new("variant origin", &VARIANT_ORIGIN_CODES))
}

/// All built-in tables, significance first.
pub fn all_tables() -> [&'static CodeTable; 2] {
    [clinical_significance(), variant_origin()]
}
