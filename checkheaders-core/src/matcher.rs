//! Match strategies and the short-circuit decision loop.
//!
//! For every rule the header value is read (and optionally URL-decoded), then
//! exactly one strategy decides the rule:
//!
//! | Observed value | Mode | Strategy |
//! |----------------|------|----------|
//! | empty / absent | any | [`required_match`] |
//! | present | [`Exact`](MatchMode::Exact) | [`exact_match`] |
//! | present | [`Contains`](MatchMode::Contains) | [`contains_match`] |
//! | present | [`Regex`](MatchMode::Regex) | [`regex_match`] |
//!
//! Rules are combined with AND; the first failing rule ends evaluation.

use tracing::{info, warn};

use crate::decode::url_decode_or_raw;
use crate::headers::HasHeaders;
use crate::rule::{MatchMode, Quorum};
use crate::rule_set::{CompiledRule, RuleSet};
use crate::verdict::Verdict;

/// Tracing target of per-rule diagnostic events.
pub const DIAGNOSTICS_TARGET: &str = "checkheaders::diagnostics";

/// Evaluates `rule_set` against `subject`.
pub fn evaluate<S>(rule_set: &RuleSet, subject: &S) -> Verdict
where
    S: HasHeaders + ?Sized,
{
    for rule in rule_set.rules() {
        if !check_rule(rule, subject) {
            return Verdict::Deny;
        }
    }
    Verdict::Allow
}

pub(crate) fn check_rule<S>(rule: &CompiledRule, subject: &S) -> bool
where
    S: HasHeaders + ?Sized,
{
    let raw = subject.header_value(rule.header());
    let decoded;
    let value: &str = if rule.rule().is_url_decode() {
        decoded = url_decode_or_raw(&raw);
        &decoded
    } else {
        &raw
    };

    let matched = if value.is_empty() {
        required_match(value, rule)
    } else {
        match rule.rule().mode() {
            MatchMode::Exact => exact_match(value, rule),
            MatchMode::Contains => contains_match(value, rule),
            MatchMode::Regex => regex_match(value, rule),
        }
    };

    if rule.rule().is_verbose() {
        info!(
            target: DIAGNOSTICS_TARGET,
            header = %rule.header(),
            matched,
            value = %value,
            configured = ?rule.rule().values(),
            "header rule evaluated"
        );
    }

    matched
}

/// Passes when at least one configured value equals `value` exactly.
pub fn exact_match(value: &str, rule: &CompiledRule) -> bool {
    rule.rule().values().iter().any(|configured| configured == value)
}

/// Counts configured values occurring as substrings of `value`.
///
/// Fails with no match at all, or with [`Quorum::All`] and a partial match.
pub fn contains_match(value: &str, rule: &CompiledRule) -> bool {
    let match_count = rule
        .rule()
        .values()
        .iter()
        .filter(|configured| value.contains(configured.as_str()))
        .count();
    quorum_met(match_count, rule)
}

/// Counts compiled patterns matching anywhere in `value`.
///
/// A pattern that failed to compile counts as a non-match. Quorum semantics
/// are the same as [`contains_match`].
pub fn regex_match(value: &str, rule: &CompiledRule) -> bool {
    let match_count = rule
        .patterns()
        .iter()
        .filter(|pattern| match pattern.regex() {
            Ok(regex) => regex.is_match(value),
            Err(error) => {
                if rule.rule().is_verbose() {
                    warn!(
                        target: DIAGNOSTICS_TARGET,
                        header = %rule.header(),
                        pattern = pattern.source(),
                        %error,
                        "error matching regex"
                    );
                }
                false
            }
        })
        .count();
    quorum_met(match_count, rule)
}

/// Decides a rule whose observed value is empty.
///
/// Configured values equal to `value` count as matches (construction forbids
/// blank values, so normally none do); an optional rule additionally counts
/// the empty value itself. Substring and regex logic are never consulted.
pub fn required_match(value: &str, rule: &CompiledRule) -> bool {
    let mut match_count = rule
        .rule()
        .values()
        .iter()
        .filter(|configured| configured.as_str() == value)
        .count();
    if !rule.rule().is_required() && value.is_empty() {
        match_count += 1;
    }
    match_count > 0
}

fn quorum_met(match_count: usize, rule: &CompiledRule) -> bool {
    if match_count == 0 {
        return false;
    }
    match rule.rule().quorum_policy() {
        Quorum::All => match_count == rule.rule().values().len(),
        Quorum::One => true,
    }
}
