//! Ordered loan-parameter rules and the drag-and-drop reordering engine.
//!
//! [`OrderedRuleCollection`] holds the rules, [`DragSessionTracker`] follows a
//! single reorder gesture, and [`ReorderCommitter`] writes the finished gesture
//! back. [`RuleBoard`] ties the three together for one host UI, and
//! [`RuleBoardService`] shares a board across HTTP handlers.

mod blueprint;
pub mod board;
pub mod collection;
pub mod commit;
pub mod density;
pub mod domain;
pub mod import;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use blueprint::AutoLoanRuleBlueprint;
pub use board::{BoardError, RenderHook, RuleBoard};
pub use collection::{CollectionError, MoveOutcome, OrderedRuleCollection};
pub use commit::{CommitOutcome, ReorderCommitter};
pub use density::{render_row, row_layout, Density, RowLayout, UnknownDensity};
pub use domain::{InvalidRule, ParameterValue, PositionedRule, Rule, RuleDraft, RuleId};
pub use import::{RuleSheetImportError, RuleSheetImporter};
pub use router::rule_router;
pub use service::{
    ChangeReason, ListenerError, OrderListener, OrderSnapshot, RuleBoardService, RuleBoardView,
    RuleServiceError,
};
pub use session::{DragSession, DragSessionTracker, SessionError};
