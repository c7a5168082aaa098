use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifier wrapper for configured rules. Stable for the lifetime of the rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

static RULE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_rule_id() -> RuleId {
    let id = RULE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RuleId(format!("rule-{id:06}"))
}

/// Typed value attached to a rule parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParameterValue {
    Integer(i64),
    Decimal(f64),
    /// Stored as a fraction, so `0.85` renders as `85%`.
    Percent(f64),
    Flag(bool),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(value) => write!(f, "{value}"),
            ParameterValue::Decimal(value) => write!(f, "{value:.2}"),
            ParameterValue::Percent(value) => write!(f, "{:.1}%", value * 100.0),
            ParameterValue::Flag(true) => f.write_str("yes"),
            ParameterValue::Flag(false) => f.write_str("no"),
            ParameterValue::Text(value) => f.write_str(value),
        }
    }
}

/// A single configurable loan or business-logic parameter entry.
///
/// The rule's position is never stored here; it is whatever place the rule
/// occupies in its [`OrderedRuleCollection`](super::OrderedRuleCollection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub label: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
}

impl Rule {
    pub fn new(id: impl Into<RuleId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: ParameterValue) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// Payload submitted by the add-rule form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    #[serde(default)]
    pub id: Option<RuleId>,
    pub label: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
}

impl RuleDraft {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RuleId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: ParameterValue) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Turn the draft into a rule, generating an identifier when none was supplied.
    pub(crate) fn into_rule(self) -> Result<Rule, InvalidRule> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(InvalidRule::EmptyLabel);
        }
        let id = match self.id {
            Some(id) if id.0.trim().is_empty() => return Err(InvalidRule::EmptyIdentifier),
            Some(id) => id,
            None => next_rule_id(),
        };

        Ok(Rule {
            id,
            label: label.to_string(),
            parameters: self.parameters,
        })
    }
}

/// Reasons a draft cannot become a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRule {
    #[error("rule label must not be empty")]
    EmptyLabel,
    #[error("rule identifier must not be empty")]
    EmptyIdentifier,
}

/// A rule paired with its current position, produced for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedRule {
    pub position: usize,
    #[serde(flatten)]
    pub rule: Rule,
}
