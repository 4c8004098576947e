//! Rule-matching utilities shared by both transformers.

mod loader;
mod style;

pub use loader::{find_fallback_index, LoaderRole, ASSET_RESOURCE_TYPE, FILE_LOADER};
pub use style::{find_style_rule, rule_claims, SASS_FILE, SASS_MODULE_FILE};

use crate::config::RulePattern;
use regex::Regex;

/// Errors that can occur while evaluating rule predicates.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Invalid rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Compile a serialized rule pattern.
pub(crate) fn compile(pattern: &RulePattern) -> Result<Regex, MatchError> {
    Regex::new(pattern.as_str()).map_err(|source| MatchError::InvalidPattern {
        pattern: pattern.as_str().to_string(),
        source,
    })
}
