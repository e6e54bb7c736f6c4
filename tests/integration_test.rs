use openapi_from_comments::{
    cli::{self, CliArgs},
    config::GeneratorConfig,
    error::Error,
    generate,
    openapi_builder::ApiDocument,
    serializer::{serialize_json, serialize_yaml},
};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/search_routes.lua");

fn generate_fixture() -> ApiDocument {
    generate(FIXTURE, &GeneratorConfig::default()).expect("fixture should generate")
}

fn cli_args(input: &Path, output: &Path, extra: &[&str]) -> CliArgs {
    let mut argv = vec![
        "openapi-from-comments".to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    CliArgs::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn test_get_item_end_to_end() {
    let document = generate_fixture();
    let entry = serde_json::to_value(&document.paths["/{id}"]["get"]).unwrap();

    assert_eq!(
        entry,
        json!({
            "description": "Get item",
            "parameters": [
                {"name": "id", "in": "path", "required": true, "schema": {"type": "id"}}
            ],
            "responses": {},
            "requestBody": {"content": {}}
        })
    );
}

#[test]
fn test_verbs_share_template() {
    let document = generate_fixture();
    let item = &document.paths["/{index_id}"];

    let verbs: Vec<_> = item.keys().map(String::as_str).collect();
    assert_eq!(verbs, vec!["delete", "put"]);

    let put = &item["put"];
    assert_eq!(put.description, "Create an index");
    assert_eq!(put.responses["201"], json!({"description": "Index created"}));
    assert_eq!(put.responses["409"], json!({}));
    assert_eq!(
        serde_json::to_value(&put.request_body).unwrap(),
        json!({
            "content": {
                "application/json": {
                    "schema": {"type": "object", "example": "your doc text"}
                }
            }
        })
    );

    assert_eq!(item["delete"].responses["204"], json!({}));
}

#[test]
fn test_higher_level_bracket_comment() {
    let document = generate_fixture();
    let search = &document.paths["/{index_id}/_search"]["post"];

    assert_eq!(
        search.description,
        "Search an index; the query may contain ]] safely"
    );
    assert!(search.request_body.content.contains_key("text/plain"));
    assert_eq!(
        search.responses["200"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/SearchResult"
    );
}

#[test]
fn test_invalid_annotation_and_short_parameter_list() {
    let document = generate_fixture();
    let entry = &document.paths["/{index_id}/docs/:int"]["post"];

    assert_eq!(entry.description, "");
    assert!(entry.request_body.content.is_empty());
    assert!(entry.responses.is_empty());
    assert_eq!(entry.parameters.len(), 1);
    assert_eq!(entry.parameters[0].name, "index_id");
    assert_eq!(entry.parameters[0].schema.schema_type, "int");
}

#[test]
fn test_undocumented_route_is_skipped() {
    let document = generate_fixture();

    assert!(!document.paths.contains_key("/health"));
    assert_eq!(document.paths.len(), 4);
}

#[test]
fn test_components_passed_through() {
    let document = generate_fixture();

    assert_eq!(
        document.components,
        json!({
            "schemas": {
                "SearchResult": {
                    "type": "object",
                    "properties": {
                        "results": {"type": "array", "items": {"type": "integer"}}
                    }
                }
            }
        })
    );
}

#[test]
fn test_no_route_blocks() {
    let source = "--[[\ncomponents:\n  schemas:\n    Foo: {type: string}\n--]]\n";
    let document = generate(source, &GeneratorConfig::default()).unwrap();

    assert!(document.paths.is_empty());
    assert_eq!(document.components, json!({"schemas": {"Foo": {"type": "string"}}}));
}

#[test]
fn test_malformed_signature_is_fatal() {
    let source = format!(
        "{}\nroutes:get(\"items\", function(req)\n    --[[\n    description: broken\n    --]]\n",
        FIXTURE
    );
    let result = generate(&source, &GeneratorConfig::default());

    assert!(matches!(result, Err(Error::MalformedSignature { .. })));
}

#[test]
fn test_serialized_outputs() {
    let document = generate_fixture();

    let json: Value = serde_json::from_str(&serialize_json(&document).unwrap()).unwrap();
    assert_eq!(json["openapi"], "3.0.2");
    assert_eq!(json["info"], json!({"title": "Swagger NXSearch", "description": ""}));
    assert!(json["paths"]["/{id}"]["get"].is_object());

    let yaml = serialize_yaml(&document).unwrap();
    let back: ApiDocument = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, document);
}

#[test]
fn test_cli_run_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("routes.lua");
    let output = temp_dir.path().join("out").join("openapi.json");
    std::fs::write(&input, FIXTURE).unwrap();

    let args = cli::parse_args_from_parsed(cli_args(&input, &output, &[])).unwrap();
    cli::run(args).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("{\n    \"openapi\""));

    let written: ApiDocument = serde_json::from_str(&content).unwrap();
    assert_eq!(written, generate_fixture());
}

#[test]
fn test_cli_run_with_config_and_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("routes.lua");
    let config = temp_dir.path().join("gen.yaml");
    let output = temp_dir.path().join("openapi.yaml");
    std::fs::write(&input, FIXTURE).unwrap();
    std::fs::write(&config, "title: From config\nplaceholder_example: see docs\n").unwrap();

    let config_path = config.display().to_string();
    let args = cli_args(
        &input,
        &output,
        &["--format", "yaml", "--config", &config_path, "--description", "Search"],
    );
    cli::run(args).unwrap();

    let written: ApiDocument =
        serde_yaml::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.info.title, "From config");
    assert_eq!(written.info.description, "Search");
    assert_eq!(
        written.paths["/{index_id}"]["put"].request_body.content["application/json"]
            .schema
            .example,
        "see docs"
    );
}

#[test]
fn test_cli_run_malformed_leaves_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("routes.lua");
    let output = temp_dir.path().join("openapi.json");
    std::fs::write(&input, "routes:get(oops)\n--[[\ndescription: x\n]]\n").unwrap();

    let result = cli::run(cli_args(&input, &output, &[]));

    assert!(result.is_err());
    assert!(!output.exists());
}
