//! Route block discovery.
//!
//! A route block is a `routes:<verb>(...)` line immediately followed by a
//! long-bracket comment (`--[[ ... ]]`, `--[==[ ... ]==]`, ...). Anything
//! else in the source is skipped.

use crate::annotation::{parse_annotation, AnnotationBody};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::patterns::{closing_long_bracket, ROUTE_BLOCK_START};
use crate::signature::{parse_signature, RouteSignature};
use log::debug;

/// A located route block, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteBlock<'a> {
    /// The `routes:...` declaration line
    pub declaration: &'a str,
    /// Comment text with the long-bracket delimiters removed
    pub comment: &'a str,
}

/// Lazy iterator over the route blocks of a source text, in source order.
///
/// Scanning resumes after the closing bracket of each block, so a
/// declaration quoted inside another block's comment is never reported.
pub struct RouteBlocks<'a> {
    source: &'a str,
    cursor: usize,
}

impl<'a> RouteBlocks<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, cursor: 0 }
    }
}

impl<'a> Iterator for RouteBlocks<'a> {
    type Item = RouteBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let caps = ROUTE_BLOCK_START.captures_at(self.source, self.cursor)?;
            let start = caps.get(0)?;
            let declaration = caps.get(1)?.as_str();
            let level = caps.get(2).map_or(0, |m| m.len());

            let body_start = start.end();
            let closing = closing_long_bracket(level);

            match self.source[body_start..].find(&closing) {
                Some(offset) => {
                    let body_end = body_start + offset;
                    self.cursor = body_end + closing.len();
                    debug!("Located route block: {}", declaration.trim());
                    return Some(RouteBlock {
                        declaration,
                        comment: strip_comment_body(&self.source[body_start..body_end]),
                    });
                }
                None => {
                    debug!("Skipping unterminated comment after: {}", declaration.trim());
                    self.cursor = start.end();
                }
            }
        }
    }
}

/// Drops the `--` written before the closing bracket (`--]]`).
fn strip_comment_body(body: &str) -> &str {
    let trimmed = body.trim_end();
    trimmed.strip_suffix("--").unwrap_or(trimmed)
}

/// Locates and parses every route block of `source`.
///
/// Each item is the parsed declaration plus its annotation. A malformed
/// declaration is yielded as an error; callers collecting with `?` abort on
/// the first one.
pub fn parse_routes<'a>(
    source: &'a str,
    config: &'a GeneratorConfig,
) -> impl Iterator<Item = Result<(RouteSignature, AnnotationBody)>> + 'a {
    RouteBlocks::new(source).map(move |block| -> Result<(RouteSignature, AnnotationBody)> {
        let signature = parse_signature(block.declaration)?;
        let annotation = parse_annotation(block.comment, config);
        Ok((signature, annotation))
    })
}
