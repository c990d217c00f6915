//! Actions and the dispatch wrapper that adapts a raw action function into a
//! uniform handler whose deferred result is completed by the method's
//! response strategy.

use crate::error::ActionError;
use crate::response::strategy_for;
use axum::{
    body::Bytes,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The request view handed to action functions: method, target, matched path
/// parameters and the raw body.
#[derive(Debug)]
pub struct ActionRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub params: HashMap<String, String>,
    pub body: Bytes,
}

impl ActionRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parse the body as JSON. Empty or malformed bodies are a 400.
    pub fn json(&self) -> Result<Value, ActionError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ActionError::bad_request(format!("invalid JSON body: {e}")))
    }
}

/// Future for a deferred action result. `Some(entity)` carries a payload for
/// the response strategy; `None` means "absent" or "no body" depending on the
/// method (see `ResponseStrategy`).
pub type DeferredResult =
    Pin<Box<dyn Future<Output = Result<Option<Value>, ActionError>> + Send>>;

/// What an action did with the request. A tagged result instead of runtime
/// shape-sniffing: an action either responds, defers, or violates the
/// contract, and each case is explicit.
pub enum ActionOutcome {
    /// The action produced the complete response itself.
    Response(Response),
    /// The action yielded a deferred result; the inbound method's response
    /// strategy completes it, failures go to the generic error responder.
    Deferred(DeferredResult),
    /// The action produced nothing. Contract violation: logged, answered
    /// with a 500 so the request never hangs unresponded.
    None,
}

impl ActionOutcome {
    /// Shortcut for actions that defer a ready value.
    pub fn deferred<F>(fut: F) -> Self
    where
        F: Future<Output = Result<Option<Value>, ActionError>> + Send + 'static,
    {
        ActionOutcome::Deferred(Box::pin(fut))
    }
}

/// A raw action function, as authored in a controller or synthesized by a
/// blueprint.
pub type ActionFn = Arc<dyn Fn(ActionRequest) -> ActionOutcome + Send + Sync>;

/// A dispatch-ready handler: always settles the request with a response.
pub type DispatchFn =
    Arc<dyn Fn(ActionRequest) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Handler attached to an action. The variant doubles as the wrapped marker:
/// `Dispatch` is already dispatch-safe and `wrap` passes it through.
#[derive(Clone)]
pub enum Handler {
    Action(ActionFn),
    Dispatch(DispatchFn),
}

impl Handler {
    pub fn action<F>(f: F) -> Self
    where
        F: Fn(ActionRequest) -> ActionOutcome + Send + Sync + 'static,
    {
        Handler::Action(Arc::new(f))
    }

    /// Dispatch-ready form of this handler; wraps raw actions, returns
    /// already-wrapped handlers as they are.
    pub(crate) fn dispatch_fn(&self) -> DispatchFn {
        match self {
            Handler::Dispatch(f) => f.clone(),
            Handler::Action(f) => dispatched(f.clone()),
        }
    }
}

/// Adapt a raw action into a dispatch-safe handler. Idempotent: wrapping a
/// wrapped handler returns it unchanged.
pub fn wrap(handler: Handler) -> Handler {
    match handler {
        Handler::Dispatch(_) => handler,
        Handler::Action(f) => Handler::Dispatch(dispatched(f)),
    }
}

fn dispatched(action: ActionFn) -> DispatchFn {
    Arc::new(move |req: ActionRequest| {
        let action = action.clone();
        Box::pin(async move {
            let method = req.method.clone();
            let uri = req.uri.clone();
            match action(req) {
                ActionOutcome::Response(response) => response,
                ActionOutcome::Deferred(deferred) => match strategy_for(&method) {
                    Some(strategy) => match deferred.await {
                        Ok(result) => strategy.complete(result),
                        Err(err) => err.into_response(),
                    },
                    None => {
                        tracing::error!(
                            method = %method,
                            uri = %uri,
                            "no response strategy for method; deferred result dropped"
                        );
                        ActionError::internal("no response strategy for method").into_response()
                    }
                },
                ActionOutcome::None => {
                    tracing::error!(
                        method = %method,
                        uri = %uri,
                        "action produced no outcome; actions must respond or return a deferred result"
                    );
                    ActionError::internal("action produced no outcome").into_response()
                }
            }
        })
    })
}

/// One routable action: logical name, HTTP methods and URL route, plus the
/// handler invoked on dispatch. Identity is the name, scoped to one resource.
#[derive(Clone)]
pub struct Action {
    pub name: String,
    pub methods: Vec<Method>,
    pub route: String,
    pub handler: Handler,
}
