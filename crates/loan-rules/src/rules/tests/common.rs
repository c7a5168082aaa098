use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::rules::{
    ListenerError, OrderListener, OrderSnapshot, Rule, RuleBoard, RuleBoardService, RuleId,
};

pub(super) fn abc_board() -> RuleBoard {
    RuleBoard::from_rules(["A", "B", "C"].map(|id| Rule::new(id, format!("Rule {id}"))))
        .expect("unique ids")
}

pub(super) fn order_of(board: &RuleBoard) -> Vec<String> {
    ids(board.order())
}

pub(super) fn ids(order: &[RuleId]) -> Vec<String> {
    order.iter().map(|id| id.0.clone()).collect()
}

pub(super) fn rid(id: &str) -> RuleId {
    RuleId::from(id)
}

#[derive(Default, Clone)]
pub(super) struct MemoryListener {
    snapshots: Arc<Mutex<Vec<OrderSnapshot>>>,
}

impl MemoryListener {
    pub(super) fn snapshots(&self) -> Vec<OrderSnapshot> {
        self.snapshots
            .lock()
            .expect("listener mutex poisoned")
            .clone()
    }
}

impl OrderListener for MemoryListener {
    fn order_changed(&self, snapshot: OrderSnapshot) -> Result<(), ListenerError> {
        self.snapshots
            .lock()
            .expect("listener mutex poisoned")
            .push(snapshot);
        Ok(())
    }
}

pub(super) struct OfflineListener;

impl OrderListener for OfflineListener {
    fn order_changed(&self, _snapshot: OrderSnapshot) -> Result<(), ListenerError> {
        Err(ListenerError::Unavailable("push channel closed".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<RuleBoardService<MemoryListener>>, MemoryListener) {
    let listener = MemoryListener::default();
    let service = RuleBoardService::new(abc_board(), Arc::new(listener.clone()));
    (Arc::new(service), listener)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn rule_ids_in(payload: &Value) -> Vec<String> {
    payload
        .get("rules")
        .and_then(Value::as_array)
        .expect("rules array")
        .iter()
        .filter_map(|rule| rule.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}
