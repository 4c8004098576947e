//! Less support for an existing bundler and test-runner configuration.
//!
//! This crate is a configuration-transformation plugin: it locates the
//! Sass/SCSS rules already present in a host build tool's configuration,
//! clones them, swaps the compiler step for the Less one, and splices
//! the clones in before the generic asset fallback rule. A parallel
//! transform widens the CSS Modules patterns in the test runner's
//! module-name mapping and transform-ignore list.
//!
//! - Structural pattern matching against loosely specified rule lists
//! - Deep clones; the source Sass rules are never touched
//! - Per-loader option overrides and rule post-processing hooks
//! - Hard failure with an actionable message on any unrecognized shape
//!
//! ## Options Example
//!
//! ```yaml
//! less_loader_options:
//!   javascriptEnabled: true
//!   modifyVars:
//!     "@primary-color": "#1890ff"
//! css_loader_options:
//!   modules: true
//! ```

pub mod config;
pub mod context;
pub mod matcher;
pub mod options;
pub mod plugin;
pub mod transformer;

pub use config::{BundlerConfig, TestRunnerConfig};
pub use context::{Env, TransformContext};
pub use options::PluginOptions;
pub use plugin::{LessPlugin, PluginError};
pub use transformer::{transform_bundler_config, transform_test_config, TransformError};
