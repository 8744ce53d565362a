//! Multi-value field decoding.
//!
//! A coded field arrives as one scalar, a flat sequence of codes, or a
//! sequence whose elements are pipe-delimited composites. Decoding keeps the
//! shape: commas still separate elements and pipes still separate
//! co-occurring codes inside an element.
//!
//! ```text
//! ["4|5", "2"]  ->  "likely-pathogenic|pathogenic,benign"
//! ```

use clinsig_model::{
    AnnotationError, COMPOSITE_DELIMITER, ELEMENT_DELIMITER, RawFieldValue, Result,
    UnknownCodePolicy,
};

use crate::code_table::CodeTable;

/// Decode a field, failing on the first unknown code.
pub fn decode(table: &CodeTable, value: &RawFieldValue) -> Result<String> {
    decode_with(table, value, &UnknownCodePolicy::Error)
}

/// Decode a field, applying `policy` to every individual code lookup.
pub fn decode_with(
    table: &CodeTable,
    value: &RawFieldValue,
    policy: &UnknownCodePolicy,
) -> Result<String> {
    match value {
        // Scalars are looked up whole, without splitting on pipes.
        RawFieldValue::Scalar(scalar) => table
            .resolve(&scalar.to_code(), policy)
            .map(str::to_string),
        RawFieldValue::Sequence(elements) => {
            let mut decoded = Vec::with_capacity(elements.len());
            for element in elements {
                decoded.push(decode_element(table, &element.to_code(), policy)?);
            }
            Ok(decoded.join(&ELEMENT_DELIMITER.to_string()))
        }
    }
}

fn decode_element(table: &CodeTable, element: &str, policy: &UnknownCodePolicy) -> Result<String> {
    if !element.contains(COMPOSITE_DELIMITER) {
        return table.resolve(element, policy).map(str::to_string);
    }
    let mut labels = Vec::new();
    for code in element.split(COMPOSITE_DELIMITER) {
        if code.is_empty() {
            return Err(AnnotationError::malformed(
                element,
                "empty code in composite value",
            ));
        }
        labels.push(table.resolve(code, policy)?);
    }
    Ok(labels.join(&COMPOSITE_DELIMITER.to_string()))
}
