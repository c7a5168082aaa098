use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::RuleId;

/// One reorder gesture, from pointer-down until drop or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragSession {
    pub source: RuleId,
    pub target: RuleId,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Tracks the single drag gesture a board may have in flight.
#[derive(Debug, Clone, Default)]
pub struct DragSessionTracker {
    state: DragState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a drag of rule {active} is already in progress")]
    SessionAlreadyActive { active: RuleId },
    #[error("no drag is in progress")]
    NoActiveSession,
}

impl DragSessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_drag(&mut self, id: RuleId) -> Result<&DragSession, SessionError> {
        if let DragState::Dragging(active) = &self.state {
            return Err(SessionError::SessionAlreadyActive {
                active: active.source.clone(),
            });
        }

        self.state = DragState::Dragging(DragSession {
            target: id.clone(),
            source: id,
            started_at: Utc::now(),
        });
        match &self.state {
            DragState::Dragging(session) => Ok(session),
            DragState::Idle => Err(SessionError::NoActiveSession),
        }
    }

    /// Point the active session at a new candidate target. Last write wins.
    pub fn hover(&mut self, target: RuleId) -> Result<&DragSession, SessionError> {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.target = target;
                Ok(session)
            }
            DragState::Idle => Err(SessionError::NoActiveSession),
        }
    }

    /// End the gesture and hand the final (source, target) pair to the caller.
    pub fn drop(&mut self) -> Result<DragSession, SessionError> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Ok(session),
            DragState::Idle => Err(SessionError::NoActiveSession),
        }
    }

    /// Discard the active session, if any. Calling this while idle is fine.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn active(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active().is_some()
    }
}
