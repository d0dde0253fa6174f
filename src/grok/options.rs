use crate::matcher::MatcherOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrokOptions {
    pub with_defaults: bool,
    pub cache_matchers: bool,
    pub cache_capacity: usize,
    pub trim_space: bool,
    pub size_limit: Option<usize>,
    pub dfa_size_limit: Option<usize>,
    pub debug: bool,
}

impl Default for GrokOptions {
    fn default() -> Self {
        Self {
            with_defaults: true,
            cache_matchers: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            trim_space: false,
            size_limit: None,
            dfa_size_limit: None,
            debug: false,
        }
    }
}

impl GrokOptions {
    pub fn builder() -> GrokOptionsBuilder {
        GrokOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), GrokOptionsError> {
        if self.cache_matchers && self.cache_capacity == 0 {
            return Err(GrokOptionsError::CacheCapacityInvalid {
                provided: self.cache_capacity,
            });
        }
        if self.size_limit == Some(0) {
            return Err(GrokOptionsError::SizeLimitInvalid {
                option: "size_limit",
            });
        }
        if self.dfa_size_limit == Some(0) {
            return Err(GrokOptionsError::SizeLimitInvalid {
                option: "dfa_size_limit",
            });
        }
        Ok(())
    }

    pub fn matcher_options(&self) -> MatcherOptions {
        MatcherOptions {
            size_limit: self.size_limit,
            dfa_size_limit: self.dfa_size_limit,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct GrokOptionsBuilder {
    options: GrokOptions,
}

impl GrokOptionsBuilder {
    pub fn with_defaults(mut self, value: bool) -> Self {
        self.options.with_defaults = value;
        self
    }

    pub fn cache_matchers(mut self, value: bool) -> Self {
        self.options.cache_matchers = value;
        self
    }

    pub fn cache_capacity(mut self, value: usize) -> Self {
        self.options.cache_capacity = value;
        self
    }

    pub fn trim_space(mut self, value: bool) -> Self {
        self.options.trim_space = value;
        self
    }

    pub fn size_limit(mut self, value: usize) -> Self {
        self.options.size_limit = Some(value);
        self
    }

    pub fn dfa_size_limit(mut self, value: usize) -> Self {
        self.options.dfa_size_limit = Some(value);
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<GrokOptions, GrokOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrokOptionsError {
    #[error("cache_capacity must be at least 1 when caching is enabled (got {provided})")]
    CacheCapacityInvalid { provided: usize },
    #[error("{option} must be greater than zero")]
    SizeLimitInvalid { option: &'static str },
}
