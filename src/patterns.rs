//! Regular expressions describing the annotation dialect.
//!
//! All structural scanning goes through the patterns below, so the accepted
//! source shape is defined in one place. A fully annotated route looks like:
//!
//! ```lua
//! routes:get("@/:int/items", function(req, index_id)
//!     --[[
//!     description: "List items of an index"
//!     responses:
//!       200:
//!         description: OK
//!     --]]
//!     ...
//! end)
//! ```
//!
//! and the shared components live in a single comment region:
//!
//! ```lua
//! --[[
//! components:
//!   schemas:
//!     Item:
//!       type: object
//! --]]
//! ```
//!
//! The `regex` crate has no backreferences, so only the opening long bracket
//! is matched here; the matching `]=*]` is located by
//! [`closing_long_bracket`].

use regex::Regex;
use std::sync::LazyLock;

/// Start of a route block: a declaration line directly followed by a line
/// opening a long-bracket comment.
///
/// Group 1 is the declaration line, group 2 the `=` run of the bracket level.
///
/// Matches `routes:post("@/:int", function(req, id)\n    --[==[`.
pub static ROUTE_BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(routes:[^\r\n]*)\r?\n[ \t]*--\[(=*)\[")
        .expect("route block pattern is valid")
});

/// HTTP verb in `routes:<verb>(`. Group 1 is the verb.
///
/// Matches `routes:get(` and `routes:delete(`.
pub static ROUTE_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*routes:([A-Za-z_][A-Za-z0-9_]*)\(").expect("verb pattern is valid")
});

/// Quoted URL literal rooted at `@/`. Group 1 is the URL without the `@`.
///
/// Matches `"@/:int/_search"`, yielding `/:int/_search`.
pub static ROUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""@(/[^"]*)""#).expect("URL pattern is valid"));

/// Handler argument list. Group 1 is the raw, comma separated argument list.
///
/// Matches `function(req, index_id, doc_id)`.
pub static HANDLER_ARGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"function\s*\(([^)]*)\)").expect("handler pattern is valid")
});

/// Typed placeholder inside a URL. Group 1 is the type token.
///
/// Matches `:int` and `:str` in `/:int/docs/:str`.
pub static TYPED_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z]+)").expect("placeholder pattern is valid"));

/// The components region. Group 1 is the body between the delimiters.
///
/// Matches `--[[\ncomponents:\n  schemas: {}\n--]]`.
pub static COMPONENTS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)--\[\[([ \t\r\n]*components:.*?)--\]\]")
        .expect("components pattern is valid")
});

/// Closing delimiter for a long bracket opened with `level` equals signs.
pub fn closing_long_bracket(level: usize) -> String {
    format!("]{}]", "=".repeat(level))
}
