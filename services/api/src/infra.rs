use loan_rules::config::BoardConfig;
use loan_rules::error::AppError;
use loan_rules::rules::{
    AutoLoanRuleBlueprint, Density, ListenerError, OrderListener, OrderSnapshot, RuleBoard,
    RuleSheetImporter,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Logs each published order and keeps the most recent ones for inspection.
#[derive(Default, Clone)]
pub(crate) struct TracingOrderListener {
    history: Arc<Mutex<VecDeque<OrderSnapshot>>>,
}

const HISTORY_LIMIT: usize = 64;

impl OrderListener for TracingOrderListener {
    fn order_changed(&self, snapshot: OrderSnapshot) -> Result<(), ListenerError> {
        info!(
            revision = snapshot.revision,
            reason = ?snapshot.reason,
            rules = snapshot.order.len(),
            "rule order published"
        );
        let mut guard = self
            .history
            .lock()
            .map_err(|_| ListenerError::Unavailable("history mutex poisoned".to_string()))?;
        if guard.len() == HISTORY_LIMIT {
            guard.pop_front();
        }
        guard.push_back(snapshot);
        Ok(())
    }
}

impl TracingOrderListener {
    #[cfg(test)]
    pub(crate) fn history(&self) -> Vec<OrderSnapshot> {
        let guard = self.history.lock().expect("history mutex poisoned");
        guard.iter().cloned().collect()
    }
}

/// Board seeded from a parameter sheet when one is given, else the standard blueprint.
pub(crate) fn seed_board(csv: Option<&Path>) -> Result<RuleBoard, AppError> {
    match csv {
        Some(path) => {
            let collection = RuleSheetImporter::from_path(path)?;
            info!(path = %path.display(), rules = collection.len(), "rule board seeded from sheet");
            Ok(RuleBoard::new(collection))
        }
        None => Ok(RuleBoard::from_rules(
            AutoLoanRuleBlueprint::standard().into_rules(),
        )?),
    }
}

pub(crate) fn board_from_config(config: &BoardConfig) -> Result<RuleBoard, AppError> {
    seed_board(config.seed_csv.as_deref())
}

pub(crate) fn parse_density(raw: &str) -> Result<Density, String> {
    raw.parse::<Density>().map_err(|err| err.to_string())
}
