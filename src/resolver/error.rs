use crate::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("circular dependency: pattern {}", .path.join(" -> "))]
    CircularDependency { path: Vec<String> },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl ResolveError {
    pub fn is_cycle(&self) -> bool {
        matches!(self, ResolveError::CircularDependency { .. })
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
