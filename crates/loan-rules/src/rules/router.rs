use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::board::BoardError;
use super::collection::CollectionError;
use super::domain::{RuleDraft, RuleId};
use super::service::{OrderListener, RuleBoardService, RuleServiceError};
use super::session::SessionError;

/// Body for drag start and hover events.
#[derive(Debug, Clone, Deserialize)]
pub struct DragTargetRequest {
    pub rule_id: RuleId,
}

/// Router builder exposing the rule board and its drag gestures.
pub fn rule_router<L>(service: Arc<RuleBoardService<L>>) -> Router
where
    L: OrderListener + 'static,
{
    Router::new()
        .route(
            "/api/v1/rules",
            get(list_handler::<L>).post(add_handler::<L>),
        )
        .route("/api/v1/rules/:rule_id", delete(delete_handler::<L>))
        .route("/api/v1/rules/drag", get(session_handler::<L>))
        .route("/api/v1/rules/drag/start", post(start_handler::<L>))
        .route("/api/v1/rules/drag/hover", post(hover_handler::<L>))
        .route("/api/v1/rules/drag/drop", post(drop_handler::<L>))
        .route("/api/v1/rules/drag/cancel", post(cancel_handler::<L>))
        .with_state(service)
}

pub(crate) async fn list_handler<L>(State(service): State<Arc<RuleBoardService<L>>>) -> Response
where
    L: OrderListener + 'static,
{
    (StatusCode::OK, axum::Json(service.view())).into_response()
}

pub(crate) async fn add_handler<L>(
    State(service): State<Arc<RuleBoardService<L>>>,
    axum::Json(draft): axum::Json<RuleDraft>,
) -> Response
where
    L: OrderListener + 'static,
{
    match service.add(draft) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<L>(
    State(service): State<Arc<RuleBoardService<L>>>,
    Path(rule_id): Path<String>,
) -> Response
where
    L: OrderListener + 'static,
{
    match service.delete(&RuleId(rule_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<L>(
    State(service): State<Arc<RuleBoardService<L>>>,
) -> Response
where
    L: OrderListener + 'static,
{
    let payload = json!({ "session": service.session() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn start_handler<L>(
    State(service): State<Arc<RuleBoardService<L>>>,
    axum::Json(request): axum::Json<DragTargetRequest>,
) -> Response
where
    L: OrderListener + 'static,
{
    match service.start_drag(&request.rule_id) {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn hover_handler<L>(
    State(service): State<Arc<RuleBoardService<L>>>,
    axum::Json(request): axum::Json<DragTargetRequest>,
) -> Response
where
    L: OrderListener + 'static,
{
    match service.hover(&request.rule_id) {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn drop_handler<L>(State(service): State<Arc<RuleBoardService<L>>>) -> Response
where
    L: OrderListener + 'static,
{
    match service.drop_dragged() {
        Ok((outcome, board)) => {
            let payload = json!({
                "outcome": outcome,
                "board": board,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn cancel_handler<L>(
    State(service): State<Arc<RuleBoardService<L>>>,
) -> Response
where
    L: OrderListener + 'static,
{
    (StatusCode::OK, axum::Json(service.cancel_drag())).into_response()
}

fn error_response(err: RuleServiceError) -> Response {
    let status = match &err {
        RuleServiceError::Board(BoardError::Collection(CollectionError::DuplicateIdentifier(
            _,
        )))
        | RuleServiceError::Board(BoardError::Session(SessionError::SessionAlreadyActive {
            ..
        })) => StatusCode::CONFLICT,
        RuleServiceError::Board(BoardError::Collection(CollectionError::NotFound(_))) => {
            StatusCode::NOT_FOUND
        }
        RuleServiceError::Board(BoardError::Session(SessionError::NoActiveSession))
        | RuleServiceError::Board(BoardError::InvalidRule(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        RuleServiceError::Listener(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
