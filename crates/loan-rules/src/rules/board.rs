use tracing::{debug, info, warn};

use super::collection::{CollectionError, OrderedRuleCollection};
use super::commit::{CommitOutcome, ReorderCommitter};
use super::domain::{InvalidRule, PositionedRule, Rule, RuleDraft, RuleId};
use super::session::{DragSession, DragSessionTracker, SessionError};

/// Callback the host UI registers to redraw after the order changes.
pub type RenderHook = Box<dyn FnMut(&[RuleId]) + Send>;

/// Interaction controller owning one rule collection and its drag tracker.
///
/// All gesture events for a board go through here, so at most one drag can be
/// in flight and the render hook sees every committed order.
pub struct RuleBoard {
    collection: OrderedRuleCollection,
    tracker: DragSessionTracker,
    committer: ReorderCommitter,
    render: Option<RenderHook>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    InvalidRule(#[from] InvalidRule),
}

impl Default for RuleBoard {
    fn default() -> Self {
        Self::new(OrderedRuleCollection::new())
    }
}

impl RuleBoard {
    pub fn new(collection: OrderedRuleCollection) -> Self {
        Self {
            collection,
            tracker: DragSessionTracker::new(),
            committer: ReorderCommitter,
            render: None,
        }
    }

    pub fn from_rules<I>(rules: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Rule>,
    {
        Ok(Self::new(OrderedRuleCollection::from_rules(rules)?))
    }

    /// Register the redraw callback, replacing any previous one.
    pub fn on_render<F>(&mut self, hook: F)
    where
        F: FnMut(&[RuleId]) + Send + 'static,
    {
        self.render = Some(Box::new(hook));
    }

    pub fn add_rule(&mut self, draft: RuleDraft) -> Result<PositionedRule, BoardError> {
        let rule = draft.into_rule()?;
        let position = self.collection.insert(rule.clone())?;
        info!(rule_id = %rule.id, position, "rule added");
        self.redraw();
        Ok(PositionedRule { position, rule })
    }

    /// Delete a rule. An in-flight drag is left alone; the drop resolves against whatever remains.
    pub fn delete_rule(&mut self, id: &RuleId) -> Result<Rule, BoardError> {
        let removed = self.collection.remove(id)?;
        info!(rule_id = %id, "rule deleted");
        self.redraw();
        Ok(removed)
    }

    pub fn start_drag(&mut self, id: &RuleId) -> Result<&DragSession, BoardError> {
        if !self.collection.contains(id) {
            return Err(CollectionError::NotFound(id.clone()).into());
        }
        match self.tracker.start_drag(id.clone()) {
            Ok(session) => {
                debug!(rule_id = %session.source, "drag started");
                Ok(session)
            }
            Err(err) => {
                warn!(rule_id = %id, error = %err, "drag start rejected");
                Err(err.into())
            }
        }
    }

    pub fn hover(&mut self, target: &RuleId) -> Result<&DragSession, BoardError> {
        if !self.tracker.is_dragging() {
            return Err(SessionError::NoActiveSession.into());
        }
        if !self.collection.contains(target) {
            return Err(CollectionError::NotFound(target.clone()).into());
        }
        let session = self.tracker.hover(target.clone())?;
        debug!(source = %session.source, target = %session.target, "drag hover");
        Ok(session)
    }

    /// Finish the gesture and commit it. The session ends even when the commit fails.
    pub fn drop_dragged(&mut self) -> Result<CommitOutcome, BoardError> {
        let session = self.tracker.drop()?;
        let outcome = self.committer.commit(&mut self.collection, &session)?;
        if outcome.changed_order() {
            self.redraw();
        }
        Ok(outcome)
    }

    /// Abandon the gesture without touching the order. Safe to call repeatedly.
    pub fn cancel_drag(&mut self) -> Option<DragSession> {
        let cancelled = self.tracker.cancel();
        if let Some(session) = &cancelled {
            debug!(rule_id = %session.source, "drag cancelled");
        }
        cancelled
    }

    pub fn active_session(&self) -> Option<&DragSession> {
        self.tracker.active()
    }

    pub fn collection(&self) -> &OrderedRuleCollection {
        &self.collection
    }

    pub fn order(&self) -> &[RuleId] {
        self.collection.order()
    }

    pub fn rules(&self) -> Vec<PositionedRule> {
        self.collection.positioned()
    }

    fn redraw(&mut self) {
        if let Some(render) = self.render.as_mut() {
            render(self.collection.order());
        }
    }
}
