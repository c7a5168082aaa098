use serde::Serialize;
use tracing::{debug, info};

use super::collection::{CollectionError, OrderedRuleCollection};
use super::domain::RuleId;
use super::session::DragSession;

/// What a drop did to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommitOutcome {
    Moved {
        rule_id: RuleId,
        from: usize,
        to: usize,
    },
    Unchanged {
        rule_id: RuleId,
    },
    /// The hovered rule was deleted before the drop landed.
    TargetVanished {
        rule_id: RuleId,
        target: RuleId,
    },
}

impl CommitOutcome {
    pub fn changed_order(&self) -> bool {
        matches!(self, CommitOutcome::Moved { .. })
    }
}

/// Writes a finished drag back into the collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderCommitter;

impl ReorderCommitter {
    /// Resolve the hovered rule's position as of now and move the source there.
    ///
    /// The target index is looked up at commit time so that rules added or
    /// deleted while the gesture was in flight are accounted for.
    pub fn commit(
        &self,
        collection: &mut OrderedRuleCollection,
        session: &DragSession,
    ) -> Result<CommitOutcome, CollectionError> {
        if !collection.contains(&session.source) {
            return Err(CollectionError::NotFound(session.source.clone()));
        }

        let Some(target_index) = collection.position_of(&session.target) else {
            debug!(source = %session.source, target = %session.target, "drop target no longer present");
            return Ok(CommitOutcome::TargetVanished {
                rule_id: session.source.clone(),
                target: session.target.clone(),
            });
        };

        let outcome = collection.move_to_index(&session.source, target_index)?;
        if outcome.is_noop() {
            return Ok(CommitOutcome::Unchanged {
                rule_id: session.source.clone(),
            });
        }

        info!(
            rule_id = %session.source,
            from = outcome.from,
            to = outcome.to,
            "rule reorder committed"
        );
        Ok(CommitOutcome::Moved {
            rule_id: session.source.clone(),
            from: outcome.from,
            to: outcome.to,
        })
    }
}
