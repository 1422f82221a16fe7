//! Validated, immutable rule collections.

use http::HeaderName;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::RuleError;
use crate::headers::HasHeaders;
use crate::matcher;
use crate::rule::{MatchMode, Quorum, Rule};
use crate::verdict::Verdict;

/// A configured regular expression and the result of compiling it.
///
/// Compilation failures are kept rather than rejected: an invalid pattern
/// never matches, but the remaining patterns of the rule still apply.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    fn compile(source: &str) -> Self {
        Pattern {
            source: source.to_string(),
            compiled: Regex::new(source),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled.as_ref()
    }
}

/// A [`Rule`] that passed validation, with its header name parsed and its
/// patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    header: HeaderName,
    patterns: Vec<Pattern>,
}

impl CompiledRule {
    fn compile(rule: Rule) -> Result<Self, RuleError> {
        let name = rule.name.trim();
        if name.is_empty() {
            return Err(RuleError::MissingName);
        }
        let header = HeaderName::try_from(name).map_err(|source| RuleError::InvalidName {
            name: name.to_string(),
            source,
        })?;

        if rule.values.is_empty() {
            return Err(RuleError::MissingValues(name.to_string()));
        }
        if rule.values.iter().any(|value| value.trim().is_empty()) {
            return Err(RuleError::EmptyValue(name.to_string()));
        }
        if rule.mode == MatchMode::Exact && rule.quorum == Quorum::All {
            return Err(RuleError::QuorumAllWithExact(name.to_string()));
        }

        let patterns = match rule.mode {
            MatchMode::Regex => rule
                .values
                .iter()
                .map(|value| Pattern::compile(value))
                .collect(),
            MatchMode::Exact | MatchMode::Contains => Vec::new(),
        };
        for pattern in &patterns {
            if let Err(error) = pattern.regex() {
                warn!(
                    header = %header,
                    pattern = pattern.source(),
                    %error,
                    "regex pattern does not compile and will never match"
                );
            }
        }

        Ok(CompiledRule {
            rule,
            header,
            patterns,
        })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Header name, normalized to lowercase.
    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Compiled patterns; empty unless the rule is in [`MatchMode::Regex`].
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Evaluates this rule alone against `subject`.
    pub fn check<S>(&self, subject: &S) -> bool
    where
        S: HasHeaders + ?Sized,
    {
        matcher::check_rule(self, subject)
    }
}

/// The validated collection of rules a filter instance evaluates.
///
/// A `RuleSet` is immutable once built and holds no per-request state, so a
/// single instance can be shared (typically behind an `Arc`) by any number of
/// concurrent evaluations.
///
/// # Examples
///
/// ```
/// use checkheaders_core::{Rule, RuleSet, Verdict};
/// use http::Request;
///
/// let rules = RuleSet::new(vec![
///     Rule::exact("test1", ["testvalue1"]),
///     Rule::contains("test4", ["ue4"]),
/// ])
/// .unwrap();
///
/// let request = Request::builder()
///     .header("test1", "testvalue1")
///     .header("test4", "value4")
///     .body(())
///     .unwrap();
///
/// assert_eq!(rules.evaluate(&request), Verdict::Allow);
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Validates `rules` and builds the rule set.
    ///
    /// Rules are checked in order; within a rule the name is checked first,
    /// then the values, then the quorum. The first defect aborts construction.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when the list is empty, a name is blank or not a
    /// valid header name, a value list is empty or holds a blank value, or an
    /// exact rule uses [`Quorum::All`].
    pub fn new<I>(rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        if rules.is_empty() {
            return Err(RuleError::MissingHeaders);
        }
        debug!(
            rules = rules.len(),
            headers = ?rules.iter().map(|rule| rule.header().as_str()).collect::<Vec<_>>(),
            "header rule set constructed"
        );
        Ok(RuleSet { rules })
    }

    /// Evaluates every rule in order, stopping at the first failure.
    pub fn evaluate<S>(&self, subject: &S) -> Verdict
    where
        S: HasHeaders + ?Sized,
    {
        matcher::evaluate(self, subject)
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
