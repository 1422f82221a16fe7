use std::sync::Arc;

use checkheaders_configuration::{Config, ConfigError};
use checkheaders_core::{Rule, RuleError, RuleSet};
use tower::Layer;

use crate::service::HeaderMatchService;

/// Instance name used when none is configured.
pub const DEFAULT_NAME: &str = "checkheaders";

/// Tower [`Layer`] that admits requests only when every header rule passes.
#[derive(Clone, Debug)]
pub struct HeaderMatch {
    rules: Arc<RuleSet>,
    name: Arc<str>,
}

impl HeaderMatch {
    /// Creates the layer from an already validated rule set.
    pub fn new(rules: RuleSet) -> Self {
        HeaderMatch {
            rules: Arc::new(rules),
            name: Arc::from(DEFAULT_NAME),
        }
    }

    /// Builds the layer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration does not describe a
    /// valid rule set; the layer is never constructed in that case.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        Ok(Self::new(RuleSet::try_from(config)?))
    }

    /// Starts building a layer rule by rule.
    pub fn builder() -> HeaderMatchBuilder {
        HeaderMatchBuilder::default()
    }

    /// Sets the instance name used in logs and metrics labels.
    pub fn with_name(self, name: impl Into<Arc<str>>) -> Self {
        HeaderMatch {
            name: name.into(),
            ..self
        }
    }

    /// Rules shared by every service this layer produces.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S> Layer<S> for HeaderMatch {
    type Service = HeaderMatchService<S>;

    fn layer(&self, upstream: S) -> Self::Service {
        HeaderMatchService::new(upstream, Arc::clone(&self.rules), Arc::clone(&self.name))
    }
}

/// Fluent builder for [`HeaderMatch`].
#[derive(Debug, Default)]
pub struct HeaderMatchBuilder {
    rules: Vec<Rule>,
    name: Option<String>,
}

impl HeaderMatchBuilder {
    /// Appends a rule; rules are evaluated in insertion order.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends several rules.
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the instance name.
    pub fn name(self, name: impl Into<String>) -> Self {
        HeaderMatchBuilder {
            name: Some(name.into()),
            ..self
        }
    }

    /// Validates the collected rules and builds the layer.
    pub fn build(self) -> Result<HeaderMatch, RuleError> {
        let layer = HeaderMatch::new(RuleSet::new(self.rules)?);
        Ok(match self.name {
            Some(name) => layer.with_name(name),
            None => layer,
        })
    }
}
