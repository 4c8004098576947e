//! The two configuration transformers.

mod bundler;
mod test_runner;

pub use bundler::{transform_bundler_config, LESS_LOADER, LESS_MODULE_TEST, LESS_TEST};
pub use test_runner::transform_test_config;

use crate::config::JsonMap;
use crate::context::Env;
use crate::matcher::MatchError;

/// Remediation footer appended to every configuration-shape error.
///
/// The configuration objects come from a third-party build tool whose
/// internal layout can change between versions without notice.
fn upgrade_hint(issue_query: &str) -> String {
    format!(
        "This error probably occurred because your build tool changed its \
         configuration layout.\n\
         Please try updating less-transform to the latest version:\n\n\
            $ cargo update -p less-transform\n\n\
         If that doesn't work, less-transform needs to be fixed to support \
         the latest version.\n\
         Please check to see if there's already an issue in the \
         stylebound/less-transform repo:\n\n\
            * https://github.com/stylebound/less-transform/issues?q={issue_query}\n\n\
         If not, please open an issue and we'll take a look. (Or you can send a PR!)"
    )
}

/// Errors raised when an expected configuration structure is missing or
/// unrecognized. All of these abort the transform; there is no partial
/// insertion and no fallback guessing.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(
        "Can't find a 'oneOf' rule under module.rules in the {env} bundler config!\n\n{}",
        upgrade_hint("is%3Aissue+bundler+rules+oneOf")
    )]
    MissingOneOfRule { env: Env },

    #[error(
        "Can't find the rule to match scss/sass files in the {env} bundler config!\n\n{}",
        upgrade_hint("is%3Aissue+bundler+rules+scss+sass")
    )]
    MissingSassRule { env: Env },

    #[error(
        "Can't find the rule to match scss/sass module files in the {env} bundler config!\n\n{}",
        upgrade_hint("is%3Aissue+bundler+rules+scss+sass")
    )]
    MissingSassModuleRule { env: Env },

    #[error(
        "Found an unhandled loader in the {env} bundler config: {loader}\n\n{}",
        upgrade_hint("is%3Aissue+bundler+unknown+rule")
    )]
    UnhandledLoader { env: Env, loader: String },

    #[error(
        "Can't find the file-loader fallback rule in the {env} bundler config!\n\n{}",
        upgrade_hint("is%3Aissue+bundler+file+loader")
    )]
    MissingFileLoader { env: Env },

    #[error(
        "Can't find CSS Modules pattern under moduleNameMapper in the {env} test runner config!\n\n{}",
        upgrade_hint("is%3Aissue+test+moduleNameMapper+css")
    )]
    MissingModuleMapperPattern { env: Env },

    #[error(
        "Can't find CSS Modules pattern under transformIgnorePatterns in the {env} test runner config!\n\n{}",
        upgrade_hint("is%3Aissue+test+transformIgnorePatterns+css")
    )]
    MissingIgnorePattern { env: Env },

    #[error(transparent)]
    Pattern(#[from] MatchError),
}

/// Shallow merge of loader options; override values win on key collision.
pub(crate) fn merge_options(base: &JsonMap, overrides: &JsonMap) -> JsonMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> JsonMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_merge_options_override_wins() {
        let base = map(json!({ "sourceMap": true, "importLoaders": 3 }));
        let overrides = map(json!({ "sourceMap": false, "modules": true }));

        let merged = merge_options(&base, &overrides);
        assert_eq!(merged["sourceMap"], false);
        assert_eq!(merged["importLoaders"], 3);
        assert_eq!(merged["modules"], true);
    }

    #[test]
    fn test_merge_options_is_shallow() {
        let base = map(json!({ "modifyVars": { "@a": 1, "@b": 2 } }));
        let overrides = map(json!({ "modifyVars": { "@a": 3 } }));

        let merged = merge_options(&base, &overrides);
        // Nested maps are replaced wholesale, not merged.
        assert_eq!(merged["modifyVars"], json!({ "@a": 3 }));
    }

    #[test]
    fn test_errors_name_the_environment() {
        let err = TransformError::MissingOneOfRule {
            env: Env::Production,
        };
        let message = err.to_string();
        assert!(message.starts_with(
            "Can't find a 'oneOf' rule under module.rules in the production bundler config!"
        ));
        assert!(message.contains("cargo update -p less-transform"));
        assert!(message.contains("issues?q=is%3Aissue+bundler+rules+oneOf"));
    }

    #[test]
    fn test_unhandled_loader_echoes_the_identifier() {
        let err = TransformError::UnhandledLoader {
            env: Env::Test,
            loader: "/path/to/unknown-loader/index.js".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with(
            "Found an unhandled loader in the test bundler config: \
             /path/to/unknown-loader/index.js"
        ));
    }
}
