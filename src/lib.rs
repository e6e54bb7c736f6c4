//! OpenAPI from comments - API documentation from annotated Lua route handlers.
//!
//! Routes are declared as `routes:<verb>("@/<url>", function(req, ...)` and
//! documented by a YAML long-bracket comment on the next line. A separate
//! comment whose first key is `components` holds the shared schemas. This
//! library locates those comments in one source text and assembles a single
//! OpenAPI document from them.
//!
//! # Architecture
//!
//! 1. [`patterns`] - The regular expressions that define the annotation dialect
//! 2. [`signature`] - Parses a route declaration line into verb, URL template and path parameters
//! 3. [`annotation`] - Parses the YAML comment of a route
//! 4. [`locator`] - Finds route blocks in the source and feeds them to the two parsers
//! 5. [`components`] - Finds and parses the components block
//! 6. [`openapi_builder`] - Assembles the document
//! 7. [`serializer`] - Serializes the document to JSON or YAML
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_comments::{config::GeneratorConfig, generate, serializer::serialize_json};
//!
//! let source = r#"
//! routes:get("@/:int", function(req, index_id)
//!     --[[
//!     description: Show an index
//!     --]]
//! end)
//! "#;
//!
//! let document = generate(source, &GeneratorConfig::default()).unwrap();
//! assert_eq!(document.paths["/{index_id}"]["get"].description, "Show an index");
//!
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod config;
pub mod patterns;
pub mod signature;
pub mod annotation;
pub mod locator;
pub mod components;
pub mod openapi_builder;
pub mod serializer;
pub mod error;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::openapi_builder::{ApiDocument, OpenApiBuilder};
use log::debug;
use std::fs;
use std::path::Path;

/// Builds the API document for one source text.
///
/// # Errors
///
/// Returns [`error::Error::MalformedSignature`] for the first route block
/// whose declaration line cannot be parsed. Unparseable YAML never fails.
pub fn generate(source: &str, config: &GeneratorConfig) -> Result<ApiDocument> {
    let mut builder = OpenApiBuilder::new(config);

    let mut route_count = 0;
    for route in locator::parse_routes(source, config) {
        let (signature, annotation) = route?;
        builder.add_route(signature, annotation);
        route_count += 1;
    }
    debug!("Assembled {} route blocks", route_count);

    builder.set_components(components::parse_components(source));

    Ok(builder.build())
}

/// Reads `path` and builds the API document for its content.
///
/// # Errors
///
/// Returns [`error::Error::Io`] if the file cannot be read, otherwise the
/// same errors as [`generate`].
pub fn generate_from_file(path: &Path, config: &GeneratorConfig) -> Result<ApiDocument> {
    debug!("Reading annotated source: {}", path.display());
    let source = fs::read_to_string(path)?;
    generate(&source, config)
}
