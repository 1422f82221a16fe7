use std::path::PathBuf;

use checkheaders_core::RuleError;
use thiserror::Error;

/// Errors raised while loading configuration or turning it into a rule set.
///
/// Any of these prevents the filter from being attached to a request pipeline.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported configuration file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration incorrect, both 'value' and 'values' set for header {0}")]
    AmbiguousValues(String),

    #[error("configuration incorrect, missing match type configuration for header {0}")]
    MissingMatchType(String),

    #[error("configuration incorrect, unknown match type '{match_type}' for header {header}")]
    UnknownMatchType { header: String, match_type: String },

    #[error("configuration incorrect for header {0}, 'contains' and 'regex' cannot both be enabled")]
    ConflictingMatchModes(String),

    #[error(transparent)]
    Rule(#[from] RuleError),
}
