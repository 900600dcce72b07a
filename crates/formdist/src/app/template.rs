//! Flat `{{name}}` placeholder substitution.
//!
//! Substitution runs in two passes: the template is tokenized once into
//! literal and placeholder segments, then each placeholder is looked up in
//! the value mapping. Substituted values are emitted verbatim and never
//! re-scanned, so bundled content containing `{{` sequences cannot trigger
//! further substitution.

use std::collections::BTreeMap;

use crate::domain::errors::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Verbatim template text.
    Literal(&'a str),
    /// A `{{name}}` token. `name` is trimmed of surrounding whitespace;
    /// `offset` is the byte position of the opening braces.
    Placeholder { name: &'a str, offset: usize },
}

/// Tokenize a template into literal and placeholder segments.
pub fn parse(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = template;
    let mut consumed = 0usize;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            segments.push(Segment::Literal(&rest[..start]));
        }
        let offset = consumed + start;
        let inner = &rest[start + OPEN.len()..];
        let Some(inner_len) = inner.find(CLOSE) else {
            return Err(TemplateError::Unterminated { offset });
        };
        let name = inner[..inner_len].trim();
        if name.is_empty() {
            return Err(TemplateError::Empty { offset });
        }
        segments.push(Segment::Placeholder { name, offset });

        let advanced = start + OPEN.len() + inner_len + CLOSE.len();
        consumed += advanced;
        rest = &rest[advanced..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

/// Render a template against a value mapping.
///
/// Every occurrence of a placeholder is substituted with its mapped value,
/// in document order. A placeholder missing from the mapping fails with
/// [`TemplateError::Unresolved`]; unused mapping entries are not an error.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> Result<String, TemplateError> {
    let segments = parse(template)?;
    let mut out = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder { name, .. } => match values.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    return Err(TemplateError::Unresolved {
                        name: name.to_owned(),
                    });
                }
            },
        }
    }
    Ok(out)
}
