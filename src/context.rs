//! Execution context passed by the host build tool.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build environment the host is currently configuring.
///
/// The environment decides which loader steps are legal in a style rule
/// (style injection in development/test, extraction to a file in
/// production) and is quoted in every configuration-shape error so a
/// failure can be correlated with the build mode that exposed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Development,
    Test,
    Production,
}

impl Env {
    /// The lowercase tag used in config files and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Env::Development => "development",
            Env::Test => "test",
            Env::Production => "production",
        }
    }

    /// True in the environments that inject styles into the page at
    /// runtime instead of extracting them to a file.
    pub fn injects_styles(self) -> bool {
        matches!(self, Env::Development | Env::Test)
    }

    pub fn is_production(self) -> bool {
        matches!(self, Env::Production)
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context available during a single transform invocation.
///
/// Constructed by the host's plugin runner and handed to each transformer
/// call; nothing is shared between invocations.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// Active build environment.
    pub env: Env,
}

impl TransformContext {
    /// Create a context for the given environment.
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl From<Env> for TransformContext {
    fn from(env: Env) -> Self {
        Self::new(env)
    }
}
