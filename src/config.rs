//! Typed views of the host build tool's configuration objects.
//!
//! Only the fields this plugin reads or writes are modeled explicitly;
//! everything else the host put in its configuration is carried through a
//! flattened map so the object round-trips untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Arbitrary host-owned key/value configuration.
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// Bundler configuration handed over by the host's plugin runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Module section holding the ordered rule list.
    pub module: ModuleSection,
    /// Everything else the host configured (entry, output, plugins, ...).
    #[serde(flatten)]
    pub rest: JsonMap,
}

/// The `module` section of a bundler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleSection {
    /// Ordered list of top-level module rules.
    pub rules: Vec<ModuleRule>,
    #[serde(flatten)]
    pub rest: JsonMap,
}

/// A top-level module rule.
///
/// Exactly one of these is expected to fan out into a `oneOf` list of
/// mutually exclusive sub-rules, evaluated in order with first match wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleRule {
    /// Nested mutually exclusive sub-rules, if this is the fan-out rule.
    #[serde(
        default,
        rename = "oneOf",
        skip_serializing_if = "Option::is_none"
    )]
    pub one_of: Option<Vec<SubRule>>,
    #[serde(flatten)]
    pub rest: JsonMap,
}

/// One entry of a `oneOf` sub-rule list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubRule {
    /// File-path predicate selecting this rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<RulePattern>,
    /// Paths matched by `test` that this rule must still not claim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<RulePattern>,
    /// Ordered loader chain applied to matching files.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_chain: Option<Vec<LoaderStep>>,
    /// Single-loader shorthand used by older host versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
    /// Built-in rule type tag (e.g. `asset/resource`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(flatten)]
    pub rest: JsonMap,
}

/// A file-path match predicate stored as a serialized regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulePattern(String);

impl RulePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The serialized pattern text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RulePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RulePattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

/// One stage of a loader chain.
///
/// Hosts write either the bare loader identifier or the full object form;
/// [`LoaderStep::to_entry`] normalizes to the latter before processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderStep {
    /// Bare identifier shorthand.
    Name(String),
    /// Identifier plus an options mapping.
    Full(LoaderEntry),
}

/// The normalized object form of a loader step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderEntry {
    /// Loader identifier, usually a resolved path into the host's
    /// loader packages.
    pub loader: String,
    /// Options passed through to the loader.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub options: JsonMap,
}

impl LoaderEntry {
    pub fn new(loader: impl Into<String>, options: JsonMap) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }
}

impl LoaderStep {
    /// Normalize to the object form, with empty options for the bare
    /// identifier shorthand.
    pub fn to_entry(&self) -> LoaderEntry {
        match self {
            LoaderStep::Name(loader) => LoaderEntry {
                loader: loader.clone(),
                options: JsonMap::new(),
            },
            LoaderStep::Full(entry) => entry.clone(),
        }
    }
}

impl From<LoaderEntry> for LoaderStep {
    fn from(entry: LoaderEntry) -> Self {
        LoaderStep::Full(entry)
    }
}

/// Test-runner configuration handed over by the host's plugin runner.
///
/// Field names serialize in the external test runner's camelCase format.
/// The mapping is order-preserving: patterns are consulted in insertion
/// order at resolution time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunnerConfig {
    /// Pattern-string to replacement-target mapping used to redirect
    /// certain file extensions during module resolution.
    pub module_name_mapper: JsonMap,
    /// Ordered pattern list excluding matching paths from transformation.
    pub transform_ignore_patterns: Vec<String>,
    #[serde(flatten)]
    pub rest: JsonMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_step_forms_parse() {
        let bare: LoaderStep = serde_json::from_str("\"/app/style-loader/index.js\"").unwrap();
        let entry = bare.to_entry();
        assert_eq!(entry.loader, "/app/style-loader/index.js");
        assert!(entry.options.is_empty());

        let full: LoaderStep = serde_json::from_value(serde_json::json!({
            "loader": "/app/css-loader/index.js",
            "options": { "importLoaders": 3 }
        }))
        .unwrap();
        let entry = full.to_entry();
        assert_eq!(entry.loader, "/app/css-loader/index.js");
        assert_eq!(entry.options["importLoaders"], 3);
    }

    #[test]
    fn test_sub_rule_passthrough_round_trip() {
        let raw = serde_json::json!({
            "test": "\\.(scss|sass)$",
            "exclude": "\\.module\\.(scss|sass)$",
            "use": ["/app/style-loader/index.js"],
            "sideEffects": true
        });
        let rule: SubRule = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(rule.test.as_ref().unwrap().as_str(), "\\.(scss|sass)$");
        assert_eq!(rule.rest["sideEffects"], true);

        let back = serde_json::to_value(&rule).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_one_of_rule_parses() {
        let rule: ModuleRule = serde_json::from_value(serde_json::json!({
            "oneOf": [ { "type": "asset/resource" } ]
        }))
        .unwrap();
        let sub_rules = rule.one_of.as_deref().unwrap();
        assert_eq!(sub_rules.len(), 1);
        assert_eq!(sub_rules[0].rule_type.as_deref(), Some("asset/resource"));
    }

    #[test]
    fn test_test_runner_config_field_names() {
        let config: TestRunnerConfig = serde_json::from_value(serde_json::json!({
            "moduleNameMapper": {
                "^.+\\.module\\.(css|sass|scss)$": "identity-obj-proxy"
            },
            "transformIgnorePatterns": ["^.+\\.module\\.(css|sass|scss)$"],
            "rootDir": "/app"
        }))
        .unwrap();
        assert_eq!(config.module_name_mapper.len(), 1);
        assert_eq!(config.transform_ignore_patterns.len(), 1);
        assert_eq!(config.rest["rootDir"], "/app");

        let back = serde_json::to_value(&config).unwrap();
        assert!(back.get("moduleNameMapper").is_some());
        assert!(back.get("transformIgnorePatterns").is_some());
    }

    #[test]
    fn test_mapper_preserves_key_order() {
        let config: TestRunnerConfig = serde_json::from_value(serde_json::json!({
            "moduleNameMapper": {
                "^react-native$": "react-native-web",
                "^.+\\.module\\.(css|sass|scss)$": "identity-obj-proxy"
            },
            "transformIgnorePatterns": []
        }))
        .unwrap();
        let keys: Vec<_> = config.module_name_mapper.keys().collect();
        assert_eq!(
            keys,
            vec!["^react-native$", "^.+\\.module\\.(css|sass|scss)$"]
        );
    }
}
