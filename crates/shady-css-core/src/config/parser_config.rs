//! Configuration types for shady-css

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::ShadyCssError;

/// Default bound on `{ ... }` nesting before a block is discarded
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Parser behaviour knobs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    /// Deepest allowed block nesting; deeper rules become discarded fragments
    #[schemars(description = "Maximum nesting depth of { } blocks (must be at least 1)")]
    pub max_nesting_depth: usize,

    /// Keep a fragment cut off by end of input as a discarded node
    #[schemars(
        description = "Emit an unterminated trailing fragment as a discarded node instead of dropping it"
    )]
    pub recover_trailing_fragment: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            recover_trailing_fragment: true,
        }
    }
}

impl ParserConfig {
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_recover_trailing_fragment(mut self, recover: bool) -> Self {
        self.recover_trailing_fragment = recover;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(ShadyCssError::config_error(
                "parser.maxNestingDepth must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadyCssConfig {
    /// JSON schema reference, ignored by the loader
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Parser configuration
    #[schemars(description = "Parser behaviour")]
    pub parser: ParserConfig,
}

impl ShadyCssConfig {
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()
    }

    /// JSON schema describing the configuration file
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(ShadyCssConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
