//! Less transform CLI entry point.
//!
//! Applies the Less transform to a bundler or test-runner configuration
//! file, for inspecting the result outside the host build tool.

use anyhow::{bail, Context, Result};
use clap::Parser;
use less_transform::{Env, LessPlugin, PluginOptions, TransformContext};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "less-transform")]
#[command(
    author,
    version,
    about = "Add Less support to a bundler or test-runner configuration"
)]
struct Args {
    /// Bundler configuration file to transform (JSON)
    #[arg(short, long, conflicts_with = "test_config")]
    config: Option<PathBuf>,

    /// Test-runner configuration file to transform (JSON)
    #[arg(long)]
    test_config: Option<PathBuf>,

    /// Build environment (development, test, production)
    #[arg(short, long, default_value = "development")]
    env: String,

    /// Plugin options file (YAML or JSON, by extension)
    #[arg(short = 'O', long)]
    options: Option<PathBuf>,

    /// Write the transformed configuration here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print example plugin options and exit.
    #[arg(long)]
    example_options: bool,

    /// Validate the options file and exit.
    #[arg(long)]
    validate: bool,
}

fn print_example_options() {
    let example = r##"# Less transform options example
#
# Every field is optional. The per-loader maps are shallow-merged over
# the options cloned from the matching Sass loader step.

less_loader_options:
  javascriptEnabled: true
  modifyVars:
    "@primary-color": "#1890ff"

css_loader_options:
  modules: true

style_loader_options: {}
postcss_loader_options: {}
resolve_url_loader_options: {}

# Production only: the extract-to-file loader step
mini_css_extract_options: {}
"##;
    println!("{}", example);
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging. Logs go to stderr so the transformed
    // configuration on stdout stays parseable.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if args.example_options {
        print_example_options();
        return Ok(());
    }

    let env = match args.env.as_str() {
        "development" => Env::Development,
        "test" => Env::Test,
        "production" => Env::Production,
        other => bail!("Unknown environment `{other}` (expected development, test, or production)"),
    };

    // Load plugin options
    let options = if let Some(options_path) = &args.options {
        let content = std::fs::read_to_string(options_path).with_context(|| {
            format!("Failed to read options file: {}", options_path.display())
        })?;
        if options_path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        }
    } else {
        PluginOptions::default()
    };

    if args.validate {
        let _plugin = LessPlugin::new(options);
        info!("Options are valid");
        return Ok(());
    }

    let plugin = LessPlugin::new(options);
    let ctx = TransformContext::new(env);

    let transformed = if let Some(path) = &args.test_config {
        let config = serde_json::from_str(&read(path)?)
            .with_context(|| format!("Failed to parse test-runner config: {}", path.display()))?;
        let config = plugin.override_test_config(&ctx, config)?;
        serde_json::to_string_pretty(&config)?
    } else if let Some(path) = &args.config {
        let config = serde_json::from_str(&read(path)?)
            .with_context(|| format!("Failed to parse bundler config: {}", path.display()))?;
        let config = plugin.override_bundler_config(&ctx, config)?;
        serde_json::to_string_pretty(&config)?
    } else {
        bail!("Nothing to transform: pass --config or --test-config");
    };

    match &args.output {
        Some(path) => std::fs::write(path, transformed + "\n")
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => println!("{}", transformed),
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
}
