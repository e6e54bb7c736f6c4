//! Generator defaults.
//!
//! Every literal that ends up in the generated document without coming from
//! the source text lives here, so it can be overridden from a YAML file
//! (`--config`) without touching the parsers.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Process-wide defaults for document generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Value of the top-level `openapi` field
    pub openapi_version: String,
    /// `info.title`
    pub title: String,
    /// `info.description`
    pub description: String,
    /// `type` of the placeholder request body schema
    pub placeholder_schema_type: String,
    /// `example` of the placeholder request body schema
    pub placeholder_example: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            openapi_version: "3.0.2".to_string(),
            title: "Swagger NXSearch".to_string(),
            description: String::new(),
            placeholder_schema_type: "object".to_string(),
            placeholder_example: "your doc text".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a config file; fields absent from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or is not valid YAML
    /// for this structure.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading generator config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| Error::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to null rather than an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Overrides the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overrides the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.openapi_version, "3.0.2");
        assert_eq!(config.title, "Swagger NXSearch");
        assert_eq!(config.description, "");
        assert_eq!(config.placeholder_schema_type, "object");
        assert_eq!(config.placeholder_example, "your doc text");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml_str("title: Search API\n").unwrap();
        assert_eq!(config.title, "Search API");
        assert_eq!(config.openapi_version, "3.0.2");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = GeneratorConfig::from_yaml_str("  \n").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::default()
            .with_title("T")
            .with_description("D");
        assert_eq!(config.title, "T");
        assert_eq!(config.description, "D");
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen.yaml");
        fs::write(&path, "placeholder_example: see docs\nopenapi_version: 3.1.0\n").unwrap();

        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.placeholder_example, "see docs");
        assert_eq!(config.openapi_version, "3.1.0");
    }

    #[test]
    fn test_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = GeneratorConfig::from_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen.yaml");
        fs::write(&path, "title: [unclosed\n").unwrap();

        let err = GeneratorConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
