use crate::annotation::AnnotationBody;
use crate::config::GeneratorConfig;
use crate::signature::RouteSignature;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// Value of the `openapi` field
    openapi_version: String,
    /// OpenAPI info section
    info: Info,
    /// Paths collection (URL template -> verb -> entry)
    paths: BTreeMap<String, PathItem>,
    /// Components section, passed through verbatim
    components: Value,
}

/// All operations documented for one URL template, keyed by verb
pub type PathItem = BTreeMap<String, RouteEntry>;

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API description
    pub description: String,
}

/// Documentation for a single verb on a URL template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Operation description
    pub description: String,
    /// Path parameters
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code
    pub responses: Map<String, Value>,
    /// Request body
    #[serde(rename = "requestBody")]
    pub request_body: RequestBody,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location, always `path` for URL placeholders
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter schema
    pub schema: ParameterSchema,
}

/// Schema of a path parameter, typed by its placeholder token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Content types and their schemas; empty when no body is declared
    pub content: BTreeMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: PlaceholderSchema,
}

/// Fixed stand-in schema for declared request bodies.
///
/// No schema is inferred from the handler; the values come from
/// [`GeneratorConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub example: String,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// API paths
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable components
    pub components: Value,
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder from generator defaults
    pub fn new(config: &GeneratorConfig) -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            openapi_version: config.openapi_version.clone(),
            info: Info {
                title: config.title.clone(),
                description: config.description.clone(),
            },
            paths: BTreeMap::new(),
            components: Value::Object(Map::new()),
        }
    }

    /// Add a parsed route to the document.
    ///
    /// A later route with the same template and verb replaces the earlier one.
    pub fn add_route(&mut self, signature: RouteSignature, annotation: AnnotationBody) {
        debug!("Adding route: {} {}", signature.verb, signature.url_template);

        let parameters = signature
            .parameters
            .into_iter()
            .map(|p| Parameter {
                name: p.name,
                location: "path".to_string(),
                required: true,
                schema: ParameterSchema {
                    schema_type: p.param_type,
                },
            })
            .collect();

        let entry = RouteEntry {
            description: annotation.description,
            parameters,
            responses: annotation.responses,
            request_body: RequestBody {
                content: annotation.request_body,
            },
        };

        self.paths
            .entry(signature.url_template)
            .or_default()
            .insert(signature.verb, entry);
    }

    /// Attach the components object
    pub fn set_components(&mut self, components: Value) {
        self.components = components;
    }

    /// Build the final OpenAPI document
    pub fn build(self) -> ApiDocument {
        debug!("Building final OpenAPI document with {} paths", self.paths.len());

        ApiDocument {
            openapi: self.openapi_version,
            info: self.info,
            paths: self.paths,
            components: self.components,
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}
