//! Per-header rule configuration.
//!
//! Supports both the multi-value form and the legacy single-value form:
//! ```yaml
//! # Multi-value form
//! - name: X-Forwarded-Tls-Client-Cert-Info
//!   values: ["CN=common-name", "SAN=\"host.example\""]
//!   matchtype: all
//!   contains: true
//!   urldecode: true
//!
//! # Legacy single-value form, match type defaults to "one"
//! - name: X-Api-Version
//!   value: "2"
//! ```

use checkheaders_core::{
    Decoding, Diagnostics, MatchMode, Quorum, Requirement, Rule, RuleError,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Match type declaration: how many configured values must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    All,
    One,
}

impl MatchType {
    /// Parses a `matchtype` declaration; blank input is `Ok(None)`.
    pub fn parse(header: &str, raw: &str) -> Result<Option<Self>, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else if trimmed.eq_ignore_ascii_case("all") {
            Ok(Some(MatchType::All))
        } else if trimmed.eq_ignore_ascii_case("one") {
            Ok(Some(MatchType::One))
        } else {
            Err(ConfigError::UnknownMatchType {
                header: header.to_string(),
                match_type: trimmed.to_string(),
            })
        }
    }
}

impl From<MatchType> for Quorum {
    fn from(match_type: MatchType) -> Self {
        match match_type {
            MatchType::All => Quorum::All,
            MatchType::One => Quorum::One,
        }
    }
}

/// One header rule as written in configuration.
///
/// Flags are optional here and resolved once, in [`HeaderRule::into_rule`],
/// into the explicit policies of [`Rule`]. `required` defaults to `true`,
/// every other flag to `false`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Legacy single-value form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        default,
        rename = "matchtype",
        alias = "matchType",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<bool>,
    #[serde(
        default,
        rename = "urldecode",
        alias = "urlDecode",
        skip_serializing_if = "Option::is_none"
    )]
    pub url_decode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl HeaderRule {
    /// Resolves this configuration entry into a core [`Rule`].
    ///
    /// A blank name is reported before anything else. Past that, checks here
    /// cover what only the configuration shape can express; the structural
    /// invariants (values, quorum legality) are enforced by
    /// [`RuleSet::new`](checkheaders_core::RuleSet::new).
    pub fn into_rule(self) -> Result<Rule, ConfigError> {
        let header = self.name.trim().to_string();
        if header.is_empty() {
            return Err(RuleError::MissingName.into());
        }

        let (values, legacy) = match (self.value, self.values) {
            (Some(_), Some(_)) => return Err(ConfigError::AmbiguousValues(header)),
            (Some(value), None) => (vec![value], true),
            (None, Some(values)) => (values, false),
            (None, None) => (Vec::new(), false),
        };

        let mode = match (self.contains.unwrap_or(false), self.regex.unwrap_or(false)) {
            (true, true) => return Err(ConfigError::ConflictingMatchModes(header)),
            (true, false) => MatchMode::Contains,
            (false, true) => MatchMode::Regex,
            (false, false) => MatchMode::Exact,
        };

        let declared = match self.match_type.as_deref() {
            Some(raw) => MatchType::parse(&header, raw)?,
            None => None,
        };
        let match_type = match declared {
            Some(match_type) => match_type,
            None if legacy => MatchType::One,
            None => return Err(ConfigError::MissingMatchType(header)),
        };

        let requirement = if self.required.unwrap_or(true) {
            Requirement::Required
        } else {
            Requirement::Optional
        };
        let decoding = if self.url_decode.unwrap_or(false) {
            Decoding::Url
        } else {
            Decoding::Raw
        };
        let diagnostics = if self.debug.unwrap_or(false) {
            Diagnostics::Verbose
        } else {
            Diagnostics::Silent
        };

        Ok(Rule::new(self.name, mode, values)
            .quorum(match_type.into())
            .requirement(requirement)
            .decoding(decoding)
            .diagnostics(diagnostics))
    }
}
