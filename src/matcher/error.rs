use crate::pattern::PatternError;
use crate::value::CoerceError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MatcherError {
    #[error("expanded pattern is not a valid regular expression: {0}")]
    Compile(#[from] regex::Error),
    #[error("text does not match pattern")]
    NoMatch,
    #[error("capture group count mismatch: compiled {expected}, matched {found}")]
    Mismatch { expected: usize, found: usize },
    #[error("field '{name}': {source}")]
    Coerce {
        name: String,
        #[source]
        source: CoerceError,
    },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type MatcherResult<T> = Result<T, MatcherError>;
