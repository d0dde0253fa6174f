use crate::pattern::{DenormalizedPattern, PatternSource, denormalize};
use crate::value::Value;
use regex::{Captures, Regex};
use std::sync::Arc;

use super::captures::{CaptureIndex, rename_duplicate_groups};
use super::{MatcherError, MatcherOptions, MatcherResult};

#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Arc<DenormalizedPattern>,
    regex: Regex,
    captures: CaptureIndex,
}

impl Matcher {
    pub fn compile(pattern: Arc<DenormalizedPattern>) -> MatcherResult<Self> {
        Self::compile_with(pattern, &MatcherOptions::default())
    }

    #[tracing::instrument(level = "trace", skip_all, fields(pattern=%pattern.original()))]
    pub fn compile_with(
        pattern: Arc<DenormalizedPattern>,
        options: &MatcherOptions,
    ) -> MatcherResult<Self> {
        let (expression, renames) = rename_duplicate_groups(pattern.expanded());
        let regex = options.builder_for(&expression).build()?;
        let captures = CaptureIndex::from_renamed_regex(&regex, &renames);

        tracing::event!(
            tracing::Level::TRACE,
            operation = "compile",
            groups = captures.group_count() as u64,
            named = captures.len() as u64,
        );

        Ok(Self {
            pattern,
            regex,
            captures,
        })
    }

    pub fn from_query(query: &str, sources: &[&dyn PatternSource]) -> MatcherResult<Self> {
        let pattern = denormalize(query, sources)?;
        Self::compile(Arc::new(pattern))
    }

    pub fn pattern(&self) -> &Arc<DenormalizedPattern> {
        &self.pattern
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn names(&self) -> &[String] {
        self.captures.names()
    }

    pub fn has_field_types(&self) -> bool {
        self.pattern.has_field_types()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Runs the leftmost match and returns one string per capture name. Groups
    /// that did not take part in the match yield an empty string.
    pub fn match_text(&self, text: &str, trim: bool) -> MatcherResult<Vec<String>> {
        let caps = self.captures_of(text)?;

        let values = self
            .captures
            .iter()
            .map(|(_, group)| {
                caps.get(group)
                    .map(|m| if trim { m.as_str().trim() } else { m.as_str() })
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();

        Ok(values)
    }

    /// Like [`Matcher::match_text`], converting typed fields. A value that does
    /// not convert is replaced by its type's zero value.
    pub fn match_typed(&self, text: &str, trim: bool) -> MatcherResult<Vec<Value>> {
        let raw = self.match_text(text, trim)?;

        let values = self
            .names()
            .iter()
            .zip(raw)
            .map(|(name, raw)| match self.pattern.field_type(name) {
                Some(field_type) => field_type.coerce_or_zero(&raw),
                None => Value::String(raw),
            })
            .collect();

        Ok(values)
    }

    /// Like [`Matcher::match_typed`], but the first value that does not convert
    /// is reported as [`MatcherError::Coerce`].
    pub fn match_typed_strict(&self, text: &str, trim: bool) -> MatcherResult<Vec<Value>> {
        let raw = self.match_text(text, trim)?;

        self.names()
            .iter()
            .zip(raw)
            .map(|(name, raw)| match self.pattern.field_type(name) {
                Some(field_type) => {
                    field_type
                        .coerce(&raw)
                        .map_err(|source| MatcherError::Coerce {
                            name: name.clone(),
                            source,
                        })
                }
                None => Ok(Value::String(raw)),
            })
            .collect()
    }

    /// Looks `name` up in a result of [`Matcher::match_text`]. `None` when the
    /// name is unknown or `values` does not have one slot per capture name.
    pub fn value_by_name<'v>(&self, name: &str, values: &'v [String]) -> Option<&'v str> {
        self.slot(name, values.len())
            .map(|slot| values[slot].as_str())
    }

    pub fn typed_value_by_name(&self, name: &str, values: &[String]) -> Option<Value> {
        let raw = self.value_by_name(name, values)?;
        Some(match self.pattern.field_type(name) {
            Some(field_type) => field_type.coerce_or_zero(raw),
            None => Value::String(raw.to_string()),
        })
    }

    pub fn value_of<'v>(&self, name: &str, values: &'v [Value]) -> Option<&'v Value> {
        self.slot(name, values.len()).map(|slot| &values[slot])
    }

    fn slot(&self, name: &str, len: usize) -> Option<usize> {
        if len != self.captures.len() {
            return None;
        }
        self.captures.position(name)
    }

    fn captures_of<'t>(&self, text: &'t str) -> MatcherResult<Captures<'t>> {
        let caps = self.regex.captures(text).ok_or(MatcherError::NoMatch)?;

        if caps.len() != self.captures.group_count() {
            return Err(MatcherError::Mismatch {
                expected: self.captures.group_count(),
                found: caps.len(),
            });
        }

        Ok(caps)
    }
}
