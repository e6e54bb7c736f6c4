//! Route declaration parsing.
//!
//! A declaration line such as
//!
//! ```lua
//! routes:get("@/:int/docs/:int", function(req, index_id, doc_id)
//! ```
//!
//! yields the verb `get`, the URL template `/{index_id}/docs/{doc_id}` and one
//! path parameter per typed placeholder, typed by the placeholder token (`int`).

use crate::error::{Error, Result};
use crate::patterns::{HANDLER_ARGS, ROUTE_URL, ROUTE_VERB, TYPED_PLACEHOLDER};
use log::{debug, warn};

/// A parsed route declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSignature {
    /// HTTP verb as written in the declaration (e.g. `get`)
    pub verb: String,
    /// URL with typed placeholders replaced by `{name}`
    pub url_template: String,
    /// Handler argument names, without the leading request argument
    pub parameter_names: Vec<String>,
    /// Path parameters, zipped positionally from placeholders and names
    pub parameters: Vec<PathParameter>,
}

/// A path parameter discovered in a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParameter {
    /// Name taken from the handler argument list
    pub name: String,
    /// Type token taken from the placeholder (`:int` -> `int`)
    pub param_type: String,
}

/// Parses one route declaration line.
///
/// # Errors
///
/// Returns [`Error::MalformedSignature`] when the line lacks the
/// `routes:<verb>(` call, the `"@/..."` URL literal, or the
/// `function(...)` argument list.
pub fn parse_signature(line: &str) -> Result<RouteSignature> {
    let verb = ROUTE_VERB
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::malformed(line, "expected `routes:<verb>(`"))?;

    let raw_url = ROUTE_URL
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::malformed(line, "expected a quoted URL starting with `@/`"))?;

    let args = HANDLER_ARGS
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::malformed(line, "expected a `function(...)` handler"))?;

    // The first argument is the request context.
    let parameter_names: Vec<String> = args
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .skip(1)
        .map(String::from)
        .collect();

    let (url_template, parameters) = normalize_url(&raw_url, &parameter_names);

    debug!(
        "Parsed signature: {} {} ({} path parameters)",
        verb,
        url_template,
        parameters.len()
    );

    Ok(RouteSignature {
        verb,
        url_template,
        parameter_names,
        parameters,
    })
}

/// Replaces typed placeholders with `{name}` left to right.
///
/// Placeholders and names are zipped, so whichever runs out first ends the
/// substitution; leftover placeholders stay in the URL untouched.
fn normalize_url(raw_url: &str, names: &[String]) -> (String, Vec<PathParameter>) {
    let placeholder_count = TYPED_PLACEHOLDER.find_iter(raw_url).count();
    if placeholder_count != names.len() {
        warn!(
            "URL {} has {} typed placeholders but the handler declares {} parameters; \
             extra entries are ignored",
            raw_url,
            placeholder_count,
            names.len()
        );
    }

    let mut template = String::with_capacity(raw_url.len());
    let mut parameters = Vec::new();
    let mut last = 0;

    for (placeholder, name) in TYPED_PLACEHOLDER.find_iter(raw_url).zip(names) {
        template.push_str(&raw_url[last..placeholder.start()]);
        template.push('{');
        template.push_str(name);
        template.push('}');
        last = placeholder.end();

        parameters.push(PathParameter {
            name: name.clone(),
            param_type: placeholder.as_str().trim_start_matches(':').to_string(),
        });
    }
    template.push_str(&raw_url[last..]);

    (template, parameters)
}
