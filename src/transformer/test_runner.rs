//! Test-runner-config transformer.
//!
//! Widens the CSS Modules pattern in the module-name mapping and the
//! transform-ignore list so both also match the Less extension.

use super::TransformError;
use crate::config::TestRunnerConfig;
use crate::context::TransformContext;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Recognizes the serialized CSS Modules pattern shape
/// (`\.module\.(..css..)`) inside a pattern string.
static CSS_MODULES_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\.module\\\.\(.*?css.*?\)").unwrap());

/// Widen a CSS Modules pattern so it also matches the Less extension.
///
/// This is deliberately a limited textual transformation: the first
/// literal `css` occurrence becomes `css|less`. It assumes the pattern's
/// textual shape and does not generalize to dialects whose extension
/// shares characters with `css`.
fn widen_pattern(pattern: &str) -> String {
    pattern.replacen("css", "css|less", 1)
}

/// Add Less support to a test-runner configuration.
///
/// The matched module-name-mapping key is replaced (not duplicated) by
/// its widened form carrying the original target value; the matched
/// ignore-list entry is widened in place. Every other entry is left
/// untouched.
pub fn transform_test_config(
    ctx: &TransformContext,
    mut config: TestRunnerConfig,
) -> Result<TestRunnerConfig, TransformError> {
    let env = ctx.env;

    let mapper = &mut config.module_name_mapper;
    let (css_modules_key, target) = mapper
        .iter()
        .find(|(key, _)| CSS_MODULES_SHAPE.is_match(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .ok_or(TransformError::MissingModuleMapperPattern { env })?;

    let widened_key = widen_pattern(&css_modules_key);
    debug!(%env, old = %css_modules_key, new = %widened_key, "widening module-name mapping");
    mapper.insert(widened_key, target);
    mapper.shift_remove(&css_modules_key);

    let patterns = &mut config.transform_ignore_patterns;
    let index = patterns
        .iter()
        .position(|pattern| CSS_MODULES_SHAPE.is_match(pattern))
        .ok_or(TransformError::MissingIgnorePattern { env })?;
    let widened = widen_pattern(&patterns[index]);
    debug!(%env, index, to = %widened, "widening transform-ignore pattern");
    patterns[index] = widened;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Env;
    use serde_json::json;

    const CSS_MODULES_PATTERN: &str = "^.+\\.module\\.(css|sass|scss)$";
    const WIDENED_PATTERN: &str = "^.+\\.module\\.(css|less|sass|scss)$";

    fn fixture() -> TestRunnerConfig {
        serde_json::from_value(json!({
            "moduleNameMapper": {
                "^react-native$": "react-native-web",
                CSS_MODULES_PATTERN: "identity-obj-proxy"
            },
            "transformIgnorePatterns": [
                "[/\\\\]node_modules[/\\\\].+\\.(js|jsx|mjs|cjs|ts|tsx)$",
                CSS_MODULES_PATTERN
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_widen_pattern_first_occurrence_only() {
        assert_eq!(widen_pattern(CSS_MODULES_PATTERN), WIDENED_PATTERN);
        assert_eq!(
            widen_pattern("^.+\\.module\\.(css)$"),
            "^.+\\.module\\.(css|less)$"
        );
    }

    #[test]
    fn test_shape_detection() {
        assert!(CSS_MODULES_SHAPE.is_match(CSS_MODULES_PATTERN));
        assert!(CSS_MODULES_SHAPE.is_match("^.+\\.module\\.(css)$"));
        assert!(!CSS_MODULES_SHAPE.is_match("^.+\\.(css|sass|scss)$"));
        assert!(!CSS_MODULES_SHAPE.is_match("^react-native$"));
    }

    #[test]
    fn test_mapper_key_is_replaced_not_duplicated() {
        let ctx = TransformContext::new(Env::Test);
        let config = transform_test_config(&ctx, fixture()).unwrap();

        let mapper = &config.module_name_mapper;
        assert!(mapper.get(CSS_MODULES_PATTERN).is_none());
        assert_eq!(mapper[WIDENED_PATTERN], "identity-obj-proxy");
        // Unrelated entries stay put, in front of the widened key.
        let keys: Vec<_> = mapper.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["^react-native$", WIDENED_PATTERN]);
    }

    #[test]
    fn test_ignore_pattern_is_widened_in_place() {
        let ctx = TransformContext::new(Env::Test);
        let config = transform_test_config(&ctx, fixture()).unwrap();

        assert_eq!(
            config.transform_ignore_patterns,
            vec![
                "[/\\\\]node_modules[/\\\\].+\\.(js|jsx|mjs|cjs|ts|tsx)$".to_string(),
                WIDENED_PATTERN.to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_mapper_pattern_fails() {
        let mut config = fixture();
        config.module_name_mapper.shift_remove(CSS_MODULES_PATTERN);

        let ctx = TransformContext::new(Env::Test);
        let err = transform_test_config(&ctx, config).unwrap_err();
        assert!(err.to_string().starts_with(
            "Can't find CSS Modules pattern under moduleNameMapper in the test test runner config!"
        ));
    }

    #[test]
    fn test_missing_ignore_pattern_fails() {
        let mut config = fixture();
        config.transform_ignore_patterns.pop();

        let ctx = TransformContext::new(Env::Test);
        let err = transform_test_config(&ctx, config).unwrap_err();
        assert!(err
            .to_string()
            .contains("transformIgnorePatterns in the test test runner config"));
    }
}
