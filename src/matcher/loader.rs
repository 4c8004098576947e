//! Loader-role classification and the asset fallback search.

use crate::config::SubRule;
use crate::context::Env;
use std::path::MAIN_SEPARATOR;

/// Rule type tag the bundler uses for its generic binary-asset fallback.
pub const ASSET_RESOURCE_TYPE: &str = "asset/resource";

/// Loader identifier of the legacy asset fallback used by older hosts.
pub const FILE_LOADER: &str = "file-loader";

/// The recognized loader roles in a style sub-rule's chain.
///
/// Classification is a closed set evaluated in a fixed priority order; an
/// identifier encoding none of these roles is a configuration mismatch the
/// caller must fail on, never silently drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderRole {
    /// Injects compiled styles into the page (development/test only).
    StyleInjection,
    /// Resolves CSS imports and CSS Modules.
    CssTransform,
    /// Runs the PostCSS pipeline.
    PostcssTransform,
    /// Rewrites relative `url()` references.
    ResolveUrl,
    /// Extracts compiled styles to a file (production only).
    ExtractToFile,
    /// Compiles the source dialect down to CSS.
    DialectCompiler,
}

impl LoaderRole {
    /// Classify a loader identifier under the given environment.
    ///
    /// Identifiers are resolved paths into the host's loader packages, so
    /// a role matches only when the loader's package name appears
    /// delimited by path separators (`postcss-loader` must not satisfy a
    /// `css-loader` probe). The style-injection and extract-to-file roles
    /// are only recognized in the environments that use them; everywhere
    /// else those identifiers fall through to `None`.
    pub fn classify(ident: &str, env: Env) -> Option<Self> {
        if env.injects_styles() && names_loader(ident, "style-loader") {
            Some(Self::StyleInjection)
        } else if names_loader(ident, "css-loader") {
            Some(Self::CssTransform)
        } else if names_loader(ident, "postcss-loader") {
            Some(Self::PostcssTransform)
        } else if names_loader(ident, "resolve-url-loader") {
            Some(Self::ResolveUrl)
        } else if env.is_production() && names_loader(ident, "mini-css-extract-plugin") {
            Some(Self::ExtractToFile)
        } else if names_loader(ident, "sass-loader") {
            Some(Self::DialectCompiler)
        } else {
            None
        }
    }
}

/// Whether an identifier names the given loader package, delimited by
/// path separators.
fn names_loader(ident: &str, name: &str) -> bool {
    ident.contains(&format!("{MAIN_SEPARATOR}{name}{MAIN_SEPARATOR}"))
}

/// Position of the generic binary-asset fallback rule.
///
/// Matched first by the `asset/resource` type tag, falling back to the
/// legacy `file-loader` identifier used by older host versions.
pub fn find_fallback_index(rules: &[SubRule]) -> Option<usize> {
    let by_type = rules
        .iter()
        .position(|rule| rule.rule_type.as_deref() == Some(ASSET_RESOURCE_TYPE));
    if by_type.is_some() {
        return by_type;
    }

    rules.iter().position(|rule| {
        rule.loader
            .as_deref()
            .is_some_and(|loader| loader.contains(FILE_LOADER))
    })
}
