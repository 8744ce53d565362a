//! Post-annotation configuration model.
//!
//! A post-annotation derives one output column from fields already present
//! on a record. The configuration mirrors the `[[postannotation]]` blocks of
//! an annotation config file:
//!
//! ```toml
//! [[field]]
//! name = "CLNSIG"
//! type = "String"
//!
//! [[postannotation]]
//! name = "clinvar_sig"
//! fields = ["CLNSIG"]
//! op = "clinvar_sig"
//! type = "String"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::UnknownCodePolicy;
use crate::value::FieldKind;

/// Name that replaces the record identifier instead of adding a column.
pub const ID_COLUMN: &str = "ID";

/// Names that never receive an INFO header line.
const RESERVED_NAMES: [&str; 3] = ["", ID_COLUMN, "FILTER"];

/// Type of a post-annotation output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    Flag,
    String,
    Float,
    Integer,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::Flag => "Flag",
            OutputType::String => "String",
            OutputType::Float => "Float",
            OutputType::Integer => "Integer",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAnnotation {
    /// Output column name.
    #[serde(default)]
    pub name: String,

    /// Record fields passed to the op, in order.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Registered op name (e.g. `clinvar_sig`, `div2`).
    pub op: String,

    #[serde(rename = "type")]
    pub output_type: OutputType,

    /// Allele-frequency cutoff for threshold ops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<f64>,

    /// Label used for codes missing from the lookup table.
    /// Unknown codes are errors when this is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_code: Option<String>,
}

impl PostAnnotation {
    pub fn new(
        name: impl Into<String>,
        op: impl Into<String>,
        output_type: OutputType,
        fields: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            fields: fields.iter().map(|field| (*field).to_string()).collect(),
            op: op.into(),
            output_type,
            cutoff: None,
            unknown_code: None,
        }
    }

    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    #[must_use]
    pub fn with_unknown_code(mut self, label: impl Into<String>) -> Self {
        self.unknown_code = Some(label.into());
        self
    }

    pub fn unknown_code_policy(&self) -> UnknownCodePolicy {
        UnknownCodePolicy::from_default(self.unknown_code.as_deref())
    }

    pub fn sets_id(&self) -> bool {
        self.name == ID_COLUMN
    }

    /// VCF `Number` for the output column.
    ///
    /// Flags take no value; names that look like per-allele frequencies
    /// (`af_` / `_af`) get one value per alternate allele.
    pub fn header_number(&self) -> &'static str {
        if self.output_type == OutputType::Flag {
            return "0";
        }
        let lower = self.name.to_lowercase();
        if lower.contains("af_") || lower.contains("_af") {
            "A"
        } else {
            "."
        }
    }

    /// INFO header for the column, or `None` for reserved names.
    pub fn info_header(&self) -> Option<InfoHeader> {
        if RESERVED_NAMES.contains(&self.name.as_str()) {
            return None;
        }
        Some(InfoHeader {
            id: self.name.clone(),
            number: self.header_number(),
            output_type: self.output_type,
            description: format!("calculated field: {}", self.name),
        })
    }
}

/// INFO header metadata for one output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoHeader {
    pub id: String,
    pub number: &'static str,
    pub output_type: OutputType,
    pub description: String,
}

impl fmt::Display for InfoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "##INFO=<ID={},Number={},Type={},Description=\"{}\">",
            self.id, self.number, self.output_type, self.description
        )
    }
}

/// Declared kind of an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

/// Input declarations plus the ordered post-annotation list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldDeclaration>,

    #[serde(default, rename = "postannotation")]
    pub post_annotations: Vec<PostAnnotation>,
}

impl AnnotationConfig {
    /// Declared kind of an input field, if any.
    pub fn declared_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.kind)
    }

    /// Names of the output columns, in configured order, without `ID`
    /// and without column-less ops.
    pub fn output_columns(&self) -> Vec<&str> {
        self.post_annotations
            .iter()
            .filter(|post| !post.name.is_empty() && !post.sets_id())
            .map(|post| post.name.as_str())
            .collect()
    }

    pub fn info_headers(&self) -> Vec<InfoHeader> {
        self.post_annotations
            .iter()
            .filter_map(PostAnnotation::info_header)
            .collect()
    }
}
