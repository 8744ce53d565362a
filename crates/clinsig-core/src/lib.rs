//! Clinical-significance decoding and pathogenicity classification.
//!
//! Everything here is a pure function of its inputs. The only shared data
//! are the code tables and the op registry, both immutable and built once.
//!
//! - [`code_table`]: static `code -> label` tables
//! - [`decode`]: scalar, sequence and composite field decoding
//! - [`classify`]: exact-match pathogenicity flags on raw codes
//! - [`threshold`]: significance plus allele-frequency gate
//! - [`ratio`] and [`reducers`]: numeric helpers for sibling columns
//! - [`ops`] and [`evaluate`]: configured post-annotation columns
//!
//! # Example
//!
//! ```
//! use clinsig_core::code_table::clinical_significance;
//! use clinsig_core::decode::decode;
//! use clinsig_model::RawFieldValue;
//!
//! let value = RawFieldValue::Sequence(vec!["4|5".into(), "2".into()]);
//! let decoded = decode(clinical_significance(), &value).unwrap();
//! assert_eq!(decoded, "likely-pathogenic|pathogenic,benign");
//! ```

pub mod classify;
pub mod code_table;
pub mod config;
pub mod decode;
pub mod evaluate;
pub mod ops;
pub mod ratio;
pub mod reducers;
pub mod threshold;

pub use classify::PathogenicityFlags;
pub use code_table::{CodeTable, clinical_significance, variant_origin};
pub use config::{ConfigError, load_config, parse_config};
pub use decode::{decode, decode_with};
pub use evaluate::Evaluator;
pub use ratio::{AlleleRatio, format_ratio, ratio};
pub use threshold::is_actionable;
