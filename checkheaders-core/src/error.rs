//! Rule set construction errors.

use http::header::InvalidHeaderName;
use thiserror::Error;

/// Error returned when a [`RuleSet`](crate::RuleSet) cannot be constructed.
///
/// Construction is all-or-nothing: the first defect found aborts the build
/// and no partial rule set is produced.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule list was empty.
    #[error("configuration incorrect, missing headers")]
    MissingHeaders,

    /// A rule had an empty or blank header name.
    #[error("configuration incorrect, missing header name")]
    MissingName,

    /// A rule's header name is not a valid HTTP header name.
    #[error("configuration incorrect, invalid header name '{name}'")]
    InvalidName {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    /// A rule had no values to compare against.
    #[error("configuration incorrect, missing header values for header {0}")]
    MissingValues(String),

    /// A rule contained an empty or blank value.
    #[error("configuration incorrect, empty value found for header {0}")]
    EmptyValue(String),

    /// An exact rule asked for every value to match.
    #[error(
        "configuration incorrect for header {0}, matchall can only be used in combination with 'contains' or 'regex'"
    )]
    QuorumAllWithExact(String),
}
