use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherOptions {
    pub size_limit: Option<usize>,
    pub dfa_size_limit: Option<usize>,
}

impl MatcherOptions {
    pub(crate) fn builder_for(&self, expression: &str) -> RegexBuilder {
        let mut builder = RegexBuilder::new(expression);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        if let Some(limit) = self.dfa_size_limit {
            builder.dfa_size_limit(limit);
        }
        builder
    }
}
