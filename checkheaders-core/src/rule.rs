//! Header rule definitions.
//!
//! A [`Rule`] describes one header constraint: which header to read, which
//! values to compare against, and how. Rules are plain data until they are
//! collected into a [`RuleSet`](crate::RuleSet), which validates them and
//! precompiles any regular expressions.

/// Strategy used to compare a present header value against the configured values.
///
/// # Variants
///
/// - [`Exact`](Self::Exact): the value must equal one of the configured values
/// - [`Contains`](Self::Contains): configured values are searched as substrings
/// - [`Regex`](Self::Regex): configured values are regular expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Byte-for-byte equality with any configured value.
    #[default]
    Exact,
    /// Case-sensitive substring search.
    Contains,
    /// Unanchored regular expression search.
    Regex,
}

/// How many configured values must match for a rule to pass.
///
/// Only [`MatchMode::Contains`] and [`MatchMode::Regex`] accept
/// [`Quorum::All`]; an exact rule always behaves as [`Quorum::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quorum {
    /// Every configured value must match.
    All,
    /// At least one configured value must match.
    #[default]
    One,
}

/// Whether a missing header fails the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    /// An absent or empty header fails the rule.
    #[default]
    Required,
    /// An absent or empty header satisfies the rule.
    Optional,
}

/// Preprocessing applied to the raw header value before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoding {
    /// Match against the value as received.
    #[default]
    Raw,
    /// Percent-decode the value first (query unescape semantics).
    Url,
}

/// Whether evaluating the rule emits a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
    /// No per-rule diagnostics.
    #[default]
    Silent,
    /// Emit a `checkheaders::diagnostics` event for every evaluation of this rule.
    Verbose,
}

/// A single header constraint.
///
/// # Examples
///
/// ```
/// use checkheaders_core::{Quorum, Rule};
///
/// let rule = Rule::contains("X-Client-Cert", ["CN=common-name", "O=Organization"])
///     .quorum(Quorum::All)
///     .url_decode();
/// # let _ = rule;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
    pub(crate) mode: MatchMode,
    pub(crate) quorum: Quorum,
    pub(crate) requirement: Requirement,
    pub(crate) decoding: Decoding,
    pub(crate) diagnostics: Diagnostics,
}

impl Rule {
    /// Creates a rule with an explicit match mode and default policies.
    pub fn new<N, I, V>(name: N, mode: MatchMode, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Rule {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            mode,
            quorum: Quorum::default(),
            requirement: Requirement::default(),
            decoding: Decoding::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Rule passing when the header equals one of `values`.
    pub fn exact<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(name, MatchMode::Exact, values)
    }

    /// Rule passing when the header contains `values` as substrings.
    pub fn contains<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(name, MatchMode::Contains, values)
    }

    /// Rule passing when the header matches `patterns`.
    pub fn regex<N, I, V>(name: N, patterns: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(name, MatchMode::Regex, patterns)
    }

    pub fn quorum(self, quorum: Quorum) -> Self {
        Rule { quorum, ..self }
    }

    pub fn requirement(self, requirement: Requirement) -> Self {
        Rule {
            requirement,
            ..self
        }
    }

    pub fn decoding(self, decoding: Decoding) -> Self {
        Rule { decoding, ..self }
    }

    pub fn diagnostics(self, diagnostics: Diagnostics) -> Self {
        Rule {
            diagnostics,
            ..self
        }
    }

    /// Shorthand for `requirement(Requirement::Optional)`.
    pub fn optional(self) -> Self {
        self.requirement(Requirement::Optional)
    }

    /// Shorthand for `decoding(Decoding::Url)`.
    pub fn url_decode(self) -> Self {
        self.decoding(Decoding::Url)
    }

    /// Shorthand for `diagnostics(Diagnostics::Verbose)`.
    pub fn verbose(self) -> Self {
        self.diagnostics(Diagnostics::Verbose)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn quorum_policy(&self) -> Quorum {
        self.quorum
    }

    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }

    pub fn is_url_decode(&self) -> bool {
        self.decoding == Decoding::Url
    }

    pub fn is_verbose(&self) -> bool {
        self.diagnostics == Diagnostics::Verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_required_raw_silent_one() {
        let rule = Rule::exact("x-test", ["value"]);
        assert_eq!(rule.mode(), MatchMode::Exact);
        assert_eq!(rule.quorum_policy(), Quorum::One);
        assert!(rule.is_required());
        assert!(!rule.is_url_decode());
        assert!(!rule.is_verbose());
    }

    #[test]
    fn setters_override_defaults() {
        let rule = Rule::regex("x-test", [r"\d+"])
            .quorum(Quorum::All)
            .optional()
            .url_decode()
            .verbose();
        assert_eq!(rule.mode(), MatchMode::Regex);
        assert_eq!(rule.quorum_policy(), Quorum::All);
        assert!(!rule.is_required());
        assert!(rule.is_url_decode());
        assert!(rule.is_verbose());
        assert_eq!(rule.values(), &[r"\d+".to_string()]);
    }
}
