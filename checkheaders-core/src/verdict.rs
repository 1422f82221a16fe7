/// Outcome of evaluating a [`RuleSet`](crate::RuleSet) against a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every rule passed; forward the request.
    Allow,
    /// A rule failed; reject the request.
    Deny,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        self == Verdict::Allow
    }
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed { Verdict::Allow } else { Verdict::Deny }
    }
}
