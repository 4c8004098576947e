//! Options recognized by the plugin.

use crate::config::{JsonMap, SubRule};
use crate::context::TransformContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Post-processing hook applied to an assembled Less rule before it is
/// spliced into the configuration.
pub type RuleHook = Arc<dyn Fn(SubRule, &TransformContext) -> SubRule + Send + Sync>;

/// Options for the Less transform. All fields are optional; absent option
/// maps mean "no override" and absent hooks mean identity.
///
/// The per-loader maps are shallow-merged over the options cloned from
/// the matching Sass loader step, with the override winning on key
/// collision. The two hooks receive the fully assembled rule and the
/// transform context and must return the rule to use in its place; they
/// are code-only and ignored when options are loaded from a file.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    /// Overrides for the style-injection loader step (development/test).
    pub style_loader_options: JsonMap,
    /// Overrides for the CSS-transform loader step.
    pub css_loader_options: JsonMap,
    /// Overrides for the PostCSS loader step.
    pub postcss_loader_options: JsonMap,
    /// Overrides for the URL-resolution loader step.
    pub resolve_url_loader_options: JsonMap,
    /// Options for the Less compiler step that replaces the Sass one.
    pub less_loader_options: JsonMap,
    /// Overrides for the extract-to-file loader step (production only).
    pub mini_css_extract_options: JsonMap,
    /// Hook over the plain `.less` rule.
    #[serde(skip)]
    pub modify_less_rule: Option<RuleHook>,
    /// Hook over the `.module.less` rule.
    #[serde(skip)]
    pub modify_less_module_rule: Option<RuleHook>,
}

impl PluginOptions {
    /// Attach a hook over the plain `.less` rule.
    pub fn with_modify_less_rule<F>(mut self, hook: F) -> Self
    where
        F: Fn(SubRule, &TransformContext) -> SubRule + Send + Sync + 'static,
    {
        self.modify_less_rule = Some(Arc::new(hook));
        self
    }

    /// Attach a hook over the `.module.less` rule.
    pub fn with_modify_less_module_rule<F>(mut self, hook: F) -> Self
    where
        F: Fn(SubRule, &TransformContext) -> SubRule + Send + Sync + 'static,
    {
        self.modify_less_module_rule = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginOptions")
            .field("style_loader_options", &self.style_loader_options)
            .field("css_loader_options", &self.css_loader_options)
            .field("postcss_loader_options", &self.postcss_loader_options)
            .field(
                "resolve_url_loader_options",
                &self.resolve_url_loader_options,
            )
            .field("less_loader_options", &self.less_loader_options)
            .field("mini_css_extract_options", &self.mini_css_extract_options)
            .field("modify_less_rule", &self.modify_less_rule.is_some())
            .field(
                "modify_less_module_rule",
                &self.modify_less_module_rule.is_some(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_empty() {
        let options = PluginOptions::default();
        assert!(options.less_loader_options.is_empty());
        assert!(options.modify_less_rule.is_none());
    }

    #[test]
    fn test_options_parse_from_yaml() {
        let yaml = r##"
less_loader_options:
  javascriptEnabled: true
  modifyVars:
    "@less-variable": "#fff"
css_loader_options:
  modules: true
"##;
        let options: PluginOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.less_loader_options["javascriptEnabled"], true);
        assert_eq!(
            options.less_loader_options["modifyVars"]["@less-variable"],
            "#fff"
        );
        assert_eq!(options.css_loader_options["modules"], true);
        assert!(options.style_loader_options.is_empty());
    }

    #[test]
    fn test_debug_reports_hook_presence() {
        let options = PluginOptions::default()
            .with_modify_less_rule(|rule, _ctx: &TransformContext| rule);
        let debug = format!("{options:?}");
        assert!(debug.contains("modify_less_rule: true"));
        assert!(debug.contains("modify_less_module_rule: false"));
    }
}
