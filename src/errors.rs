use crate::grok::GrokOptionsError;
use crate::matcher::MatcherError;
use crate::pattern::PatternError;
use crate::resolver::ResolveError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GrokError {
    #[error("failed to resolve built-in patterns: {}", .failures.join("; "))]
    DefaultPatterns { failures: Vec<String> },
    #[error("pattern '{name}' could not be added: {source}")]
    AddPattern {
        name: String,
        #[source]
        source: PatternError,
    },
    #[error(transparent)]
    Options(#[from] GrokOptionsError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

pub type GrokResult<T> = Result<T, GrokError>;
