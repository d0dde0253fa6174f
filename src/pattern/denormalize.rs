use crate::enums::FieldType;
use crate::types::FieldTypes;
use hashbrown::HashMap as FastHashMap;
use std::sync::Arc;

use super::store::PatternSource;
use super::token::{TokenSpan, parse_reference, scan_tokens};
use super::{DenormalizedPattern, PatternError, PatternResult};

/// Expands every `%{SYNTAX[:alias[:type]]}` reference in `input` with the
/// patterns found in `sources`, searched in order.
#[tracing::instrument(level = "trace", skip(sources), fields(sources=sources.len() as u64))]
pub fn denormalize(
    input: &str,
    sources: &[&dyn PatternSource],
) -> PatternResult<DenormalizedPattern> {
    let mut field_types = FieldTypes::default();
    let mut expanded = String::with_capacity(input.len());
    let mut fragments: FastHashMap<&str, String> = FastHashMap::new();
    let mut cursor = 0usize;

    for span in scan_tokens(input) {
        expanded.push_str(&input[cursor..span.start]);
        cursor = span.end;

        // identical token text always expands to the same fragment
        if let Some(fragment) = fragments.get(span.text) {
            expanded.push_str(fragment);
            continue;
        }

        let fragment = expand_reference(&span, sources, &mut field_types)?;
        expanded.push_str(&fragment);
        fragments.insert(span.text, fragment);
    }

    expanded.push_str(&input[cursor..]);

    Ok(DenormalizedPattern::new(input, expanded, field_types))
}

pub(crate) fn lookup<'s>(
    name: &str,
    sources: &[&'s dyn PatternSource],
) -> Option<&'s Arc<DenormalizedPattern>> {
    sources.iter().find_map(|&source| source.get_pattern(name))
}

fn expand_reference(
    span: &TokenSpan<'_>,
    sources: &[&dyn PatternSource],
    field_types: &mut FieldTypes,
) -> PatternResult<String> {
    let reference = parse_reference(span.body)?;
    let capture = reference.capture_name();

    let declared = match reference.type_tag {
        Some(tag) => Some(
            FieldType::from_tag(tag).ok_or_else(|| PatternError::InvalidType {
                token: span.body.to_string(),
                tag: tag.to_string(),
            })?,
        ),
        None => None,
    };

    let target =
        lookup(reference.syntax, sources).ok_or_else(|| PatternError::UnresolvedReference {
            name: reference.syntax.to_string(),
        })?;

    for (key, field_type) in target.field_types() {
        field_types.entry(key.clone()).or_insert(*field_type);
    }
    if let (Some(name), Some(field_type)) = (capture.as_ref(), declared) {
        field_types.insert(name.clone(), field_type);
    }

    let body = target.expanded();
    let fragment = match capture {
        Some(name) => {
            let mut out = String::with_capacity(body.len() + name.len() + 6);
            out.push_str("(?P<");
            out.push_str(&name);
            out.push('>');
            out.push_str(body);
            out.push(')');
            out
        }
        None => {
            let mut out = String::with_capacity(body.len() + 2);
            out.push('(');
            out.push_str(body);
            out.push(')');
            out
        }
    };

    Ok(fragment)
}
