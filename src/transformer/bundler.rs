//! Bundler-config transformer.
//!
//! Clones the existing Sass sub-rule pair into a Less pair and splices
//! the clones into the `oneOf` list just before the generic asset
//! fallback rule, so Less files are claimed before the fallback can
//! swallow them.

use super::{merge_options, TransformError};
use crate::config::{BundlerConfig, LoaderEntry, LoaderStep, RulePattern, SubRule};
use crate::context::TransformContext;
use crate::matcher::{
    find_fallback_index, find_style_rule, LoaderRole, SASS_FILE, SASS_MODULE_FILE,
};
use crate::options::PluginOptions;
use tracing::debug;

/// Pattern matched by the plain Less rule.
pub const LESS_TEST: &str = r"\.less$";

/// Pattern matched by the Less CSS Modules rule.
pub const LESS_MODULE_TEST: &str = r"\.module\.less$";

/// Identifier of the Less compiler loader swapped in for the Sass one.
pub const LESS_LOADER: &str = "less-loader";

/// Which of the two Less rules is being assembled.
#[derive(Debug, Clone, Copy)]
enum RuleVariant {
    Plain,
    Module,
}

/// Add Less support to a bundler configuration.
///
/// On success the returned configuration carries two additional
/// sub-rules, positioned immediately before the asset fallback rule:
/// the plain `.less` rule first, then the `.module.less` rule. The
/// source Sass rules are left untouched. On failure the configuration
/// is dropped with the error; a partially transformed object is never
/// observable.
pub fn transform_bundler_config(
    ctx: &TransformContext,
    mut config: BundlerConfig,
    options: &PluginOptions,
) -> Result<BundlerConfig, TransformError> {
    let env = ctx.env;

    let sub_rules = config
        .module
        .rules
        .iter_mut()
        .find_map(|rule| rule.one_of.as_mut())
        .ok_or(TransformError::MissingOneOfRule { env })?;

    let sass_rule =
        find_style_rule(sub_rules, SASS_FILE)?.ok_or(TransformError::MissingSassRule { env })?;
    let mut less_rule = create_less_rule(ctx, sass_rule, options, RuleVariant::Plain)?;
    if let Some(hook) = &options.modify_less_rule {
        less_rule = hook(less_rule, ctx);
    }

    let sass_module_rule = find_style_rule(sub_rules, SASS_MODULE_FILE)?
        .ok_or(TransformError::MissingSassModuleRule { env })?;
    let mut less_module_rule =
        create_less_rule(ctx, sass_module_rule, options, RuleVariant::Module)?;
    if let Some(hook) = &options.modify_less_module_rule {
        less_module_rule = hook(less_module_rule, ctx);
    }

    let fallback_index =
        find_fallback_index(sub_rules).ok_or(TransformError::MissingFileLoader { env })?;

    debug!(
        %env,
        index = fallback_index,
        "splicing Less rules before the asset fallback rule"
    );
    sub_rules.splice(fallback_index..fallback_index, [less_rule, less_module_rule]);

    Ok(config)
}

/// Clone a Sass sub-rule into its Less counterpart.
///
/// The clone keeps every host-owned field of the base rule, retargets
/// the match predicate, and rebuilds the loader chain step by step: each
/// recognized loader role is carried over with its options merged under
/// the caller's overrides, and the Sass compiler step is replaced by the
/// Less one. An identifier encoding no recognized role aborts the whole
/// transform; unknown loaders are never skipped.
fn create_less_rule(
    ctx: &TransformContext,
    base: &SubRule,
    options: &PluginOptions,
    variant: RuleVariant,
) -> Result<SubRule, TransformError> {
    let mut rule = base.clone();
    match variant {
        RuleVariant::Plain => {
            rule.test = Some(RulePattern::new(LESS_TEST));
            rule.exclude = Some(RulePattern::new(LESS_MODULE_TEST));
        }
        RuleVariant::Module => {
            rule.test = Some(RulePattern::new(LESS_MODULE_TEST));
        }
    }

    let mut chain = Vec::new();
    for step in base.use_chain.as_deref().unwrap_or_default() {
        let entry = step.to_entry();
        let rebuilt = match LoaderRole::classify(&entry.loader, ctx.env) {
            Some(LoaderRole::StyleInjection) => LoaderEntry::new(
                entry.loader,
                merge_options(&entry.options, &options.style_loader_options),
            ),
            Some(LoaderRole::CssTransform) => LoaderEntry::new(
                entry.loader,
                merge_options(&entry.options, &options.css_loader_options),
            ),
            Some(LoaderRole::PostcssTransform) => LoaderEntry::new(
                entry.loader,
                merge_options(&entry.options, &options.postcss_loader_options),
            ),
            Some(LoaderRole::ResolveUrl) => LoaderEntry::new(
                entry.loader,
                merge_options(&entry.options, &options.resolve_url_loader_options),
            ),
            Some(LoaderRole::ExtractToFile) => LoaderEntry::new(
                entry.loader,
                merge_options(&entry.options, &options.mini_css_extract_options),
            ),
            Some(LoaderRole::DialectCompiler) => LoaderEntry::new(
                LESS_LOADER,
                merge_options(&entry.options, &options.less_loader_options),
            ),
            None => {
                return Err(TransformError::UnhandledLoader {
                    env: ctx.env,
                    loader: entry.loader,
                })
            }
        };
        chain.push(LoaderStep::Full(rebuilt));
    }
    rule.use_chain = Some(chain);

    Ok(rule)
}
