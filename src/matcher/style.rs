//! Locating style sub-rules by what they match.

use super::MatchError;
use crate::config::SubRule;

/// Representative filename claimed by the plain Sass rule.
pub const SASS_FILE: &str = "file.scss";

/// Representative filename claimed by the Sass CSS Modules rule.
pub const SASS_MODULE_FILE: &str = "file.module.scss";

/// Whether a sub-rule's predicate claims the given file path.
///
/// A rule claims a path when its `test` pattern matches and its `exclude`
/// pattern, if any, does not. Rules without a `test` never claim anything.
pub fn rule_claims(rule: &SubRule, path: &str) -> Result<bool, MatchError> {
    let Some(test) = &rule.test else {
        return Ok(false);
    };
    if !super::compile(test)?.is_match(path) {
        return Ok(false);
    }
    if let Some(exclude) = &rule.exclude {
        if super::compile(exclude)?.is_match(path) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Find the first sub-rule carrying a loader chain whose predicate claims
/// the sample filename.
///
/// Matching against a representative filename mirrors how the bundler
/// itself dispatches files through a `oneOf` list, so the search keeps
/// working when the host reorders or renames its style rules.
pub fn find_style_rule<'a>(
    rules: &'a [SubRule],
    sample: &str,
) -> Result<Option<&'a SubRule>, MatchError> {
    for rule in rules {
        if rule.use_chain.is_some() && rule_claims(rule, sample)? {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}
