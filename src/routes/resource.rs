//! Resource router: mounts every resource's merged actions on one axum
//! router, applies the authorization policy before dispatch, and answers
//! unmatched requests with the typed not-found error.

use crate::action::{Action, ActionRequest, DispatchFn};
use crate::error::ActionError;
use crate::policy::Policy;
use crate::table::RoutingTable;
use axum::{
    body::to_bytes,
    extract::{RawPathParams, Request},
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter},
    Router,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the aggregate router from an assembled routing table. Primary
/// actions mount first; replaced blueprint actions mount as secondary routes
/// unless their method and route are already occupied (an override that kept
/// the blueprint route).
pub fn build_router(table: RoutingTable) -> Router {
    let (resources, policy) = table.into_parts();
    let mut occupied: HashSet<(Method, String)> = HashSet::new();
    let mut router = Router::new();

    for resource in &resources {
        for action in &resource.actions {
            for method in &action.methods {
                occupied.insert((method.clone(), action.route.clone()));
            }
            router = mount(router, &resource.name, action, &action.methods, policy.clone());
        }
    }

    for resource in &resources {
        for action in &resource.replaced {
            let methods: Vec<Method> = action
                .methods
                .iter()
                .filter(|m| !occupied.contains(&((*m).clone(), action.route.clone())))
                .cloned()
                .collect();
            if methods.is_empty() {
                tracing::debug!(
                    resource = %resource.name,
                    action = %action.name,
                    route = %action.route,
                    "secondary route occupied by its override; not mounted"
                );
                continue;
            }
            for method in &methods {
                occupied.insert((method.clone(), action.route.clone()));
            }
            router = mount(router, &resource.name, action, &methods, policy.clone());
        }
    }

    router
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

fn mount(
    router: Router,
    resource: &str,
    action: &Action,
    methods: &[Method],
    policy: Arc<dyn Policy>,
) -> Router {
    let mut method_router = MethodRouter::new();
    for method in methods {
        let Ok(filter) = MethodFilter::try_from(method.clone()) else {
            tracing::error!(%method, route = %action.route, "method not routable; skipped");
            continue;
        };
        let dispatch = action.handler.dispatch_fn();
        let policy = policy.clone();
        let resource = resource.to_string();
        let name = action.name.clone();
        let handler = move |params: RawPathParams, req: Request| {
            let dispatch = dispatch.clone();
            let policy = policy.clone();
            let resource = resource.clone();
            let name = name.clone();
            let mut path_params = HashMap::new();
            for (key, value) in &params {
                path_params.insert(key.to_string(), value.to_string());
            }
            async move { dispatch_request(resource, name, dispatch, policy, path_params, req).await }
        };
        method_router = method_router.on(filter, handler);
    }
    router.route(&action.route, method_router)
}

async fn dispatch_request(
    resource: String,
    action: String,
    dispatch: DispatchFn,
    policy: Arc<dyn Policy>,
    params: HashMap<String, String>,
    req: Request,
) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ActionError::bad_request(format!("failed to read request body: {e}"))
                .into_response()
        }
    };
    let action_req = ActionRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        params,
        body: bytes,
    };
    if let Err(err) = policy.authorize(&resource, &action, &action_req).await {
        return err.into_response();
    }
    dispatch(action_req).await
}

async fn not_found(uri: Uri) -> Response {
    ActionError::not_found(uri.path().to_string()).into_response()
}
