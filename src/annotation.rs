//! Route comment parsing.
//!
//! The comment attached to a route is YAML. Known keys are `description`,
//! `bodyContentType` and `responses`; everything else is ignored. A comment
//! that is not valid YAML never fails the run, it just documents nothing.

use crate::config::GeneratorConfig;
use crate::openapi_builder::{MediaType, PlaceholderSchema};
use log::{debug, warn};
use serde::de::{Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::BTreeMap;
use std::fmt;

/// Documentation parsed from a route comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationBody {
    /// Top-level `description`, empty when absent
    pub description: String,
    /// Top-level `bodyContentType`, if declared (`"null"` when the key has no value)
    pub body_content_type: Option<String>,
    /// Request body content keyed by content type; empty without `bodyContentType`
    pub request_body: BTreeMap<String, MediaType>,
    /// Responses keyed by status code
    pub responses: Map<String, JsonValue>,
}

/// Parses the text of a route comment.
pub fn parse_annotation(comment: &str, config: &GeneratorConfig) -> AnnotationBody {
    let Some(yaml) = parse_yaml_mapping(comment, "route annotation") else {
        return AnnotationBody::default();
    };

    let description = yaml
        .get("description")
        .and_then(scalar_to_string)
        .unwrap_or_default();

    let body_content_type = yaml.get("bodyContentType").map(key_to_string);

    let mut request_body = BTreeMap::new();
    if let Some(content_type) = &body_content_type {
        request_body.insert(
            content_type.clone(),
            MediaType {
                schema: PlaceholderSchema {
                    schema_type: config.placeholder_schema_type.clone(),
                    example: config.placeholder_example.clone(),
                },
            },
        );
    }

    let mut responses = Map::new();
    match yaml.get("responses") {
        Some(YamlValue::Mapping(entries)) => {
            for (code, content) in entries {
                let content = if is_falsy(content) {
                    JsonValue::Object(Map::new())
                } else {
                    yaml_to_json(content)
                };
                responses.insert(key_to_string(code), content);
            }
        }
        Some(YamlValue::Null) | None => {}
        Some(other) => warn!("Ignoring non-mapping `responses`: {:?}", other),
    }

    debug!(
        "Parsed annotation: {} response(s), body content type {:?}",
        responses.len(),
        body_content_type
    );

    AnnotationBody {
        description,
        body_content_type,
        request_body,
        responses,
    }
}

/// Parses `text` as a YAML mapping.
///
/// Repeated keys keep their last value and `<<` merge keys are resolved.
/// Returns `None` (and logs) when the text is not YAML. Empty text and
/// non-mapping documents are treated as an empty mapping.
pub(crate) fn parse_yaml_mapping(text: &str, what: &str) -> Option<Mapping> {
    let text = dedent(text);
    let mut value = match serde_yaml::from_str::<LenientValue>(&text) {
        Ok(LenientValue(value)) => value,
        Err(e) => {
            warn!("Unparseable {}, using empty values: {}", what, e);
            return None;
        }
    };

    if let Err(e) = value.apply_merge() {
        warn!("Unresolvable merge key in {}, using empty values: {}", what, e);
        return None;
    }

    match value {
        YamlValue::Mapping(mapping) => Some(mapping),
        YamlValue::Null => Some(Mapping::new()),
        other => {
            warn!("Ignoring {} that is not a mapping: {:?}", what, other);
            Some(Mapping::new())
        }
    }
}

/// A YAML value whose mappings accept repeated keys, last one wins.
///
/// `serde_yaml::Value` rejects duplicates outright.
struct LenientValue(YamlValue);

impl<'de> Deserialize<'de> for LenientValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientVisitor)
    }
}

struct LenientVisitor;

impl<'de> Visitor<'de> for LenientVisitor {
    type Value = LenientValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::Number(v.into())))
    }

    fn visit_u64<E>(self, v: u64) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::Number(v.into())))
    }

    fn visit_f64<E>(self, v: f64) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::Number(v.into())))
    }

    fn visit_str<E>(self, v: &str) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::String(v.to_string())))
    }

    fn visit_string<E>(self, v: String) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::String(v)))
    }

    fn visit_unit<E>(self) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::Null))
    }

    fn visit_none<E>(self) -> Result<LenientValue, E> {
        Ok(LenientValue(YamlValue::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<LenientValue, D::Error> {
        LenientValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LenientValue, A::Error> {
        let mut items = Vec::new();
        while let Some(LenientValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(LenientValue(YamlValue::Sequence(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LenientValue, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((LenientValue(key), LenientValue(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(LenientValue(YamlValue::Mapping(mapping)))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<LenientValue, A::Error> {
        let (tag, variant): (String, _) = data.variant()?;
        let LenientValue(value) = variant.newtype_variant()?;
        Ok(LenientValue(YamlValue::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        }))))
    }
}

/// Converts a YAML value into the JSON value model, stringifying mapping keys.
pub(crate) fn yaml_to_json(value: &YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                JsonValue::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(JsonValue::Null, JsonValue::Number)
            }
        }
        YamlValue::String(s) => JsonValue::String(s.clone()),
        YamlValue::Sequence(items) => JsonValue::Array(items.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => JsonValue::Object(
            mapping
                .iter()
                .map(|(k, v)| (key_to_string(k), yaml_to_json(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn key_to_string(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Tagged(tagged) => key_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Empty-ish values that document nothing.
fn is_falsy(value: &YamlValue) -> bool {
    match value {
        YamlValue::Null => true,
        YamlValue::Bool(b) => !b,
        YamlValue::Number(n) => n.as_f64() == Some(0.0),
        YamlValue::String(s) => s.is_empty(),
        YamlValue::Sequence(items) => items.is_empty(),
        YamlValue::Mapping(mapping) => mapping.is_empty(),
        YamlValue::Tagged(tagged) => is_falsy(&tagged.value),
    }
}

/// Removes the indentation shared by all non-blank lines.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
