//! Plugin surface invoked by the host build tool's plugin runner.

use crate::config::{BundlerConfig, TestRunnerConfig};
use crate::context::TransformContext;
use crate::options::PluginOptions;
use crate::transformer::{transform_bundler_config, transform_test_config, TransformError};
use tracing::{debug, info};

/// The Less transform plugin.
///
/// Holds the options once and exposes the two hooks the host calls: one
/// per bundler configuration and one per test-runner configuration. Each
/// call is independent; the plugin keeps no state between invocations.
#[derive(Debug, Clone, Default)]
pub struct LessPlugin {
    options: PluginOptions,
}

impl LessPlugin {
    /// Create a plugin with the given options.
    pub fn new(options: PluginOptions) -> Self {
        debug!(?options, "Less transform initialized");
        Self { options }
    }

    /// Create a plugin from a YAML options document.
    pub fn from_yaml(yaml: &str) -> Result<Self, PluginError> {
        let options: PluginOptions = serde_yaml::from_str(yaml)?;
        Ok(Self::new(options))
    }

    /// Create a plugin from a JSON options document.
    pub fn from_json(json: &str) -> Result<Self, PluginError> {
        let options: PluginOptions = serde_json::from_str(json)?;
        Ok(Self::new(options))
    }

    /// The options this plugin was built with.
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Host hook: add Less rules to a bundler configuration.
    pub fn override_bundler_config(
        &self,
        ctx: &TransformContext,
        config: BundlerConfig,
    ) -> Result<BundlerConfig, TransformError> {
        info!(env = %ctx.env, "adding Less rules to the bundler config");
        transform_bundler_config(ctx, config, &self.options)
    }

    /// Host hook: widen the CSS Modules patterns in a test-runner
    /// configuration.
    pub fn override_test_config(
        &self,
        ctx: &TransformContext,
        config: TestRunnerConfig,
    ) -> Result<TestRunnerConfig, TransformError> {
        info!(env = %ctx.env, "widening CSS Modules patterns in the test runner config");
        transform_test_config(ctx, config)
    }
}

/// Errors surfaced by the plugin layer.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Failed to parse plugin options as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse plugin options as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml() {
        let plugin = LessPlugin::from_yaml(
            r#"
less_loader_options:
  javascriptEnabled: true
"#,
        )
        .unwrap();
        assert_eq!(
            plugin.options().less_loader_options["javascriptEnabled"],
            true
        );
    }

    #[test]
    fn test_from_json() {
        let plugin =
            LessPlugin::from_json(r#"{ "css_loader_options": { "modules": true } }"#).unwrap();
        assert_eq!(plugin.options().css_loader_options["modules"], true);
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        assert!(LessPlugin::from_yaml(": not yaml : [").is_err());
    }
}
