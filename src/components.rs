//! Components block discovery.
//!
//! Shared schemas are declared once, in a comment whose first key is
//! `components`:
//!
//! ```lua
//! --[[
//! components:
//!   schemas:
//!     Document:
//!       type: object
//! --]]
//! ```

use crate::annotation::{parse_yaml_mapping, yaml_to_json};
use crate::patterns::COMPONENTS_BLOCK;
use log::debug;
use serde_json::{Map, Value};

/// Returns the value under `components` from the first components block.
///
/// Yields an empty object when there is no such block, when it is not
/// valid YAML, or when `components` is empty.
pub fn parse_components(source: &str) -> Value {
    let empty = || Value::Object(Map::new());

    let Some(caps) = COMPONENTS_BLOCK.captures(source) else {
        debug!("No components block found");
        return empty();
    };

    let Some(mapping) = parse_yaml_mapping(&caps[1], "components block") else {
        return empty();
    };

    match mapping.get("components") {
        Some(value) if !value.is_null() => {
            debug!("Parsed components block");
            yaml_to_json(value)
        }
        _ => empty(),
    }
}
