//! Serialization module for converting API documents to JSON or YAML format.
//!
//! This module provides functions to serialize documents into standard formats
//! and write them to files or return them as strings.

use crate::openapi_builder::ApiDocument;
use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

/// Serializes a document to JSON, indented with four spaces.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use openapi_from_comments::openapi_builder::OpenApiBuilder;
/// use openapi_from_comments::serializer::serialize_json;
///
/// let doc = OpenApiBuilder::default().build();
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"paths\": {}"));
/// ```
pub fn serialize_json(doc: &ApiDocument) -> Result<String> {
    debug!("Serializing API document to JSON");

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    doc.serialize(&mut serializer)
        .context("Failed to serialize API document to JSON")?;

    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}

/// Serializes a document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &ApiDocument) -> Result<String> {
    debug!("Serializing API document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize API document to YAML")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// Overwrites the file if it already exists.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
