//! Configuration support for the checkheaders request filter.
//!
//! A [`Config`] is an ordered list of [`HeaderRule`] entries, loaded from
//! YAML or JSON and converted into a validated
//! [`RuleSet`](checkheaders_core::RuleSet):
//!
//! ```
//! use checkheaders_configuration::Config;
//!
//! let config = Config::from_yaml(
//!     r#"
//! headers:
//!   - name: test1
//!     values: ["testvalue1"]
//!     matchtype: one
//!   - name: test4
//!     values: ["ue4"]
//!     matchtype: one
//!     contains: true
//! "#,
//! )?;
//!
//! let rules = config.into_rule_set()?;
//! assert_eq!(rules.len(), 2);
//! # Ok::<(), checkheaders_configuration::ConfigError>(())
//! ```

use std::path::Path;

use checkheaders_core::RuleSet;
use serde::{Deserialize, Serialize};

mod error;
pub mod header;

pub use error::ConfigError;
pub use header::{HeaderRule, MatchType};

/// Filter configuration: the header rules, in evaluation order.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default, alias = "Headers")]
    pub headers: Vec<HeaderRule>,
}

impl Config {
    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(input)?)
    }

    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads configuration from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        let parse = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&content)
    }

    /// Converts the configuration into a validated rule set.
    ///
    /// Entries are resolved in order and the first error aborts conversion.
    pub fn into_rule_set(self) -> Result<RuleSet, ConfigError> {
        let rules = self
            .headers
            .into_iter()
            .map(HeaderRule::into_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet::new(rules)?)
    }
}

impl TryFrom<Config> for RuleSet {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.into_rule_set()
    }
}
