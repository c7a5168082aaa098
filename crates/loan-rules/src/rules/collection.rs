use std::collections::HashMap;

use super::domain::{PositionedRule, Rule, RuleId};

/// Ordered sequence of rule identifiers plus the rules they name.
///
/// Invariant: `order` holds every key of `rules` exactly once and nothing else.
#[derive(Debug, Clone, Default)]
pub struct OrderedRuleCollection {
    order: Vec<RuleId>,
    rules: HashMap<RuleId, Rule>,
}

/// Result of [`OrderedRuleCollection::move_to_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: usize,
    pub to: usize,
}

impl MoveOutcome {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("rule {0} already exists")]
    DuplicateIdentifier(RuleId),
    #[error("rule {0} not found")]
    NotFound(RuleId),
}

impl OrderedRuleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules<I>(rules: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut collection = Self::new();
        for rule in rules {
            collection.insert(rule)?;
        }
        Ok(collection)
    }

    /// Append a rule at the end of the sequence.
    pub fn insert(&mut self, rule: Rule) -> Result<usize, CollectionError> {
        if self.rules.contains_key(&rule.id) {
            return Err(CollectionError::DuplicateIdentifier(rule.id));
        }
        self.order.push(rule.id.clone());
        self.rules.insert(rule.id.clone(), rule);
        Ok(self.order.len() - 1)
    }

    /// Remove a rule; the items after it shift up by one and nothing else moves.
    pub fn remove(&mut self, id: &RuleId) -> Result<Rule, CollectionError> {
        let index = self
            .position_of(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;
        self.order.remove(index);
        self.rules
            .remove(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))
    }

    /// Move a rule to `target_index`, clamped to the valid range.
    pub fn move_to_index(
        &mut self,
        id: &RuleId,
        target_index: usize,
    ) -> Result<MoveOutcome, CollectionError> {
        let from = self
            .position_of(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;
        let to = target_index.min(self.order.len() - 1);

        if from != to {
            let moved = self.order.remove(from);
            self.order.insert(to, moved);
        }

        Ok(MoveOutcome { from, to })
    }

    pub fn position_of(&self, id: &RuleId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn contains(&self, id: &RuleId) -> bool {
        self.rules.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[RuleId] {
        &self.order
    }

    /// Rules in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.order.iter().filter_map(|id| self.rules.get(id))
    }

    pub fn positioned(&self) -> Vec<PositionedRule> {
        self.iter()
            .enumerate()
            .map(|(position, rule)| PositionedRule {
                position,
                rule: rule.clone(),
            })
            .collect()
    }
}
