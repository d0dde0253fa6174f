use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid pattern `%{{{token}}}`")]
    InvalidToken { token: String },
    #[error("pattern `%{{{token}}}`: invalid field type `{tag}`")]
    InvalidType { token: String, tag: String },
    #[error("no pattern found for %{{{name}}}")]
    UnresolvedReference { name: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
