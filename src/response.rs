//! Method-sensitive response strategies: translate a deferred action result
//! into the HTTP response appropriate to the request method's semantics.

use crate::error::ActionError;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Completion rule for a successful deferred action result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseStrategy {
    /// POST: 201 with the created entity.
    Created,
    /// GET: 200 with the entity, 404 when absent.
    OkOrNotFound,
    /// PUT: 201 with the entity when the put created it, 204 when it updated in place.
    CreatedOrNoContent,
    /// DELETE: 204, no body.
    NoContent,
}

/// Strategy for an inbound method. Anything outside the CRUD set has no
/// strategy; routing such a method at a deferred action is a configuration
/// error the caller must guard against.
pub fn strategy_for(method: &Method) -> Option<ResponseStrategy> {
    match *method {
        Method::POST => Some(ResponseStrategy::Created),
        Method::GET => Some(ResponseStrategy::OkOrNotFound),
        Method::PUT => Some(ResponseStrategy::CreatedOrNoContent),
        Method::DELETE => Some(ResponseStrategy::NoContent),
        _ => None,
    }
}

impl ResponseStrategy {
    /// Build the HTTP response for a settled deferred result.
    pub fn complete(self, result: Option<Value>) -> Response {
        match self {
            ResponseStrategy::Created => match result {
                Some(entity) => (StatusCode::CREATED, Json(entity)).into_response(),
                None => StatusCode::CREATED.into_response(),
            },
            ResponseStrategy::OkOrNotFound => match result {
                Some(entity) => (StatusCode::OK, Json(entity)).into_response(),
                None => ActionError::not_found("record").into_response(),
            },
            ResponseStrategy::CreatedOrNoContent => match result {
                Some(entity) => (StatusCode::CREATED, Json(entity)).into_response(),
                None => StatusCode::NO_CONTENT.into_response(),
            },
            ResponseStrategy::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
