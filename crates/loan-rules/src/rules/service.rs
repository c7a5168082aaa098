use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::board::{BoardError, RuleBoard};
use super::commit::CommitOutcome;
use super::domain::{PositionedRule, RuleDraft, RuleId};
use super::session::DragSession;

/// Why the published order changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    Added,
    Deleted,
    Reordered,
}

/// Order published to listeners after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSnapshot {
    pub order: Vec<RuleId>,
    pub revision: u64,
    pub reason: ChangeReason,
    pub recorded_at: DateTime<Utc>,
}

/// Outbound hook notified with each new order (UI push channels, audit sinks).
pub trait OrderListener: Send + Sync {
    fn order_changed(&self, snapshot: OrderSnapshot) -> Result<(), ListenerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("order listener unavailable: {0}")]
    Unavailable(String),
}

/// Serialized view of the board returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct RuleBoardView {
    pub revision: u64,
    pub rules: Vec<PositionedRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<DragSession>,
}

struct BoardState {
    board: RuleBoard,
    revision: u64,
}

/// Thread-safe facade so HTTP handlers can share one board.
///
/// Every operation runs under one lock, which is what makes the single
/// active drag guarantee hold across concurrent requests.
pub struct RuleBoardService<L> {
    state: Mutex<BoardState>,
    listener: Arc<L>,
}

impl<L> RuleBoardService<L>
where
    L: OrderListener + 'static,
{
    pub fn new(board: RuleBoard, listener: Arc<L>) -> Self {
        Self {
            state: Mutex::new(BoardState { board, revision: 0 }),
            listener,
        }
    }

    pub fn view(&self) -> RuleBoardView {
        let state = self.lock();
        Self::view_of(&state)
    }

    pub fn list(&self) -> Vec<PositionedRule> {
        self.lock().board.rules()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    pub fn session(&self) -> Option<DragSession> {
        self.lock().board.active_session().cloned()
    }

    pub fn add(&self, draft: RuleDraft) -> Result<RuleBoardView, RuleServiceError> {
        let mut state = self.lock();
        state.board.add_rule(draft)?;
        self.publish(&mut state, ChangeReason::Added)?;
        Ok(Self::view_of(&state))
    }

    pub fn delete(&self, id: &RuleId) -> Result<RuleBoardView, RuleServiceError> {
        let mut state = self.lock();
        state.board.delete_rule(id)?;
        self.publish(&mut state, ChangeReason::Deleted)?;
        Ok(Self::view_of(&state))
    }

    pub fn start_drag(&self, id: &RuleId) -> Result<DragSession, RuleServiceError> {
        let mut state = self.lock();
        Ok(state.board.start_drag(id)?.clone())
    }

    pub fn hover(&self, target: &RuleId) -> Result<DragSession, RuleServiceError> {
        let mut state = self.lock();
        Ok(state.board.hover(target)?.clone())
    }

    pub fn drop_dragged(&self) -> Result<(CommitOutcome, RuleBoardView), RuleServiceError> {
        let mut state = self.lock();
        let outcome = state.board.drop_dragged()?;
        if outcome.changed_order() {
            self.publish(&mut state, ChangeReason::Reordered)?;
        }
        Ok((outcome, Self::view_of(&state)))
    }

    pub fn cancel_drag(&self) -> RuleBoardView {
        let mut state = self.lock();
        state.board.cancel_drag();
        Self::view_of(&state)
    }

    fn publish(
        &self,
        state: &mut BoardState,
        reason: ChangeReason,
    ) -> Result<(), RuleServiceError> {
        state.revision += 1;
        self.listener.order_changed(OrderSnapshot {
            order: state.board.order().to_vec(),
            revision: state.revision,
            reason,
            recorded_at: Utc::now(),
        })?;
        Ok(())
    }

    fn view_of(state: &BoardState) -> RuleBoardView {
        RuleBoardView {
            revision: state.revision,
            rules: state.board.rules(),
            session: state.board.active_session().cloned(),
        }
    }

    // Collection mutations never stop halfway, so a poisoned board is still valid.
    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Error raised by the rule board service.
#[derive(Debug, thiserror::Error)]
pub enum RuleServiceError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Listener(#[from] ListenerError),
}
