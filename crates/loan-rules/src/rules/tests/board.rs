use super::common::*;
use crate::rules::{
    BoardError, CollectionError, CommitOutcome, ParameterValue, RuleDraft, SessionError,
};
use std::sync::{Arc, Mutex};

#[test]
fn drag_first_onto_last_moves_it_to_the_end() {
    let mut board = abc_board();
    board.start_drag(&rid("A")).expect("A present");
    board.hover(&rid("C")).expect("dragging");
    let outcome = board.drop_dragged().expect("commit succeeds");

    assert_eq!(
        outcome,
        CommitOutcome::Moved {
            rule_id: rid("A"),
            from: 0,
            to: 2
        }
    );
    assert_eq!(order_of(&board), ["B", "C", "A"]);
    assert!(board.active_session().is_none());
}

#[test]
fn hovering_over_itself_leaves_order_unchanged() {
    let mut board = abc_board();
    board.start_drag(&rid("B")).expect("B present");
    board.hover(&rid("B")).expect("dragging");
    let outcome = board.drop_dragged().expect("commit succeeds");

    assert_eq!(outcome, CommitOutcome::Unchanged { rule_id: rid("B") });
    assert_eq!(order_of(&board), ["A", "B", "C"]);
}

#[test]
fn commit_uses_position_after_concurrent_delete() {
    let mut board = abc_board();
    board.start_drag(&rid("A")).expect("A present");
    board.delete_rule(&rid("C")).expect("C present");
    board.hover(&rid("B")).expect("dragging");
    board.drop_dragged().expect("commit succeeds");

    assert_eq!(order_of(&board), ["B", "A"]);
}

#[test]
fn cancel_never_mutates_regardless_of_hovers() {
    let mut board = abc_board();
    board.start_drag(&rid("C")).expect("C present");
    for target in ["A", "B", "A", "C", "A"] {
        board.hover(&rid(target)).expect("dragging");
    }
    let cancelled = board.cancel_drag().expect("session was active");

    assert_eq!(cancelled.target, rid("A"));
    assert_eq!(order_of(&board), ["A", "B", "C"]);
    assert!(board.cancel_drag().is_none());
    assert_eq!(
        board.drop_dragged(),
        Err(BoardError::Session(SessionError::NoActiveSession))
    );
}

#[test]
fn second_drag_is_rejected_while_one_is_active() {
    let mut board = abc_board();
    board.start_drag(&rid("A")).expect("A present");

    assert_eq!(
        board.start_drag(&rid("B")).map(|_| ()),
        Err(BoardError::Session(SessionError::SessionAlreadyActive {
            active: rid("A")
        }))
    );
    assert_eq!(
        board.active_session().map(|session| session.source.clone()),
        Some(rid("A"))
    );
}

#[test]
fn drag_and_hover_require_existing_rules() {
    let mut board = abc_board();
    assert_eq!(
        board.start_drag(&rid("Z")).map(|_| ()),
        Err(BoardError::Collection(CollectionError::NotFound(rid("Z"))))
    );
    assert_eq!(
        board.hover(&rid("A")).map(|_| ()),
        Err(BoardError::Session(SessionError::NoActiveSession))
    );

    board.start_drag(&rid("A")).expect("A present");
    board.hover(&rid("C")).expect("dragging");
    assert_eq!(
        board.hover(&rid("Z")).map(|_| ()),
        Err(BoardError::Collection(CollectionError::NotFound(rid("Z"))))
    );
    assert_eq!(
        board.active_session().map(|session| session.target.clone()),
        Some(rid("C"))
    );
}

#[test]
fn dragged_rule_deleted_mid_gesture_ends_the_session() {
    let mut board = abc_board();
    board.start_drag(&rid("B")).expect("B present");
    board.hover(&rid("C")).expect("dragging");
    board.delete_rule(&rid("B")).expect("B present");

    assert_eq!(
        board.drop_dragged(),
        Err(BoardError::Collection(CollectionError::NotFound(rid("B"))))
    );
    assert!(board.active_session().is_none());
    assert_eq!(order_of(&board), ["A", "C"]);
}

#[test]
fn add_rule_appends_and_rejects_duplicates() {
    let mut board = abc_board();
    let added = board
        .add_rule(
            RuleDraft::new("Vehicle age limit")
                .with_id("D")
                .with_parameter("max_age_years", ParameterValue::Integer(10)),
        )
        .expect("unique id");
    assert_eq!(added.position, 3);

    assert_eq!(
        board.add_rule(RuleDraft::new("Again").with_id("A")).map(|_| ()),
        Err(BoardError::Collection(CollectionError::DuplicateIdentifier(
            rid("A")
        )))
    );
    assert_eq!(order_of(&board), ["A", "B", "C", "D"]);
}

#[test]
fn render_hook_fires_on_every_change_but_not_on_cancel() {
    let renders: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let mut board = abc_board();
    let sink = renders.clone();
    board.on_render(move |order| {
        sink.lock()
            .expect("render mutex poisoned")
            .push(ids(order));
    });

    board.start_drag(&rid("A")).expect("A present");
    board.hover(&rid("B")).expect("dragging");
    board.cancel_drag();

    board.start_drag(&rid("A")).expect("A present");
    board.hover(&rid("A")).expect("dragging");
    board.drop_dragged().expect("no-op commit");

    board.start_drag(&rid("C")).expect("C present");
    board.hover(&rid("A")).expect("dragging");
    board.drop_dragged().expect("commit succeeds");
    board.delete_rule(&rid("B")).expect("B present");

    let renders = renders.lock().expect("render mutex poisoned");
    assert_eq!(
        *renders,
        vec![
            vec!["C".to_string(), "A".to_string(), "B".to_string()],
            vec!["C".to_string(), "A".to_string()],
        ]
    );
}
