//! Controller authoring and the controller/blueprint merge.
//!
//! Explicit actions win outright; blueprint actions fill the gaps; a
//! blueprint action overridden by name is preserved in the replaced list so
//! its original route stays reachable as a secondary route.

use crate::action::{wrap, Action, ActionOutcome, ActionRequest, Handler};
use crate::blueprint::{blueprint_route, default_actions};
use crate::case::to_route_segment;
use crate::config::types::ControllerSettings;
use crate::config::validator::parse_method;
use crate::error::ConfigError;
use crate::model::DataModel;
use axum::http::Method;
use std::collections::HashSet;
use std::sync::Arc;

/// An explicitly authored controller: named raw actions in authoring order.
/// Insertion order is the merge and mount order, so routing is deterministic.
#[derive(Clone, Default)]
pub struct Controller {
    actions: Vec<(String, Handler)>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ActionRequest) -> ActionOutcome + Send + Sync + 'static,
    {
        self.actions.push((name.into(), Handler::action(f)));
        self
    }

    pub fn handler(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.actions.push((name.into(), handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|(name, _)| name.as_str())
    }
}

/// Merged action sets for one resource: the primary set exposed on its
/// routes, and the replaced blueprint actions kept routable under their
/// original blueprint routes.
pub struct MergedActions {
    pub actions: Vec<Action>,
    pub replaced: Vec<Action>,
}

/// Merge an explicitly authored controller with the blueprint defaults for
/// one resource. Either side may be absent: a controller without a model
/// simply gets no blueprint actions, a model without a controller gets the
/// full default set.
pub fn merge_resource(
    name: &str,
    controller: Option<&Controller>,
    model: Option<&Arc<dyn DataModel>>,
    settings: &ControllerSettings,
) -> Result<MergedActions, ConfigError> {
    let mut actions = Vec::new();
    let mut replaced = Vec::new();

    let explicit_names: HashSet<&str> = controller
        .map(|c| c.action_names().collect())
        .unwrap_or_default();

    if let Some(controller) = controller {
        for (action_name, handler) in &controller.actions {
            let action_settings = settings.action(action_name);
            let route = match action_settings.route {
                Some(route) => route,
                None => blueprint_route(action_name, name)
                    .unwrap_or_else(|| format!("/{}", to_route_segment(action_name))),
            };
            let methods = match &action_settings.methods {
                Some(methods) => methods
                    .iter()
                    .map(|m| parse_method(name, action_name, m))
                    .collect::<Result<Vec<Method>, ConfigError>>()?,
                None => vec![Method::GET],
            };
            actions.push(Action {
                name: action_name.clone(),
                methods,
                route,
                handler: wrap(handler.clone()),
            });
        }
    }

    if let Some(model) = model {
        for blueprint in default_actions(model, name) {
            let wrapped = Action {
                handler: wrap(blueprint.handler.clone()),
                ..blueprint
            };
            if explicit_names.contains(wrapped.name.as_str()) {
                // Overridden by name: keep the original blueprint action so
                // its route stays reachable next to the override.
                replaced.push(wrapped);
            } else {
                actions.push(wrapped);
            }
        }
    }

    tracing::debug!(resource = name, actions = actions.len(), "controller initialized");
    Ok(MergedActions { actions, replaced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::BLUEPRINT_ACTIONS;
    use crate::config::from_value;
    use crate::model::MemoryModel;
    use serde_json::json;

    fn memory_model() -> Arc<dyn DataModel> {
        Arc::new(MemoryModel::new())
    }

    #[test]
    fn model_without_controller_gets_exactly_the_blueprint_set() {
        let model = memory_model();
        let merged =
            merge_resource("products", None, Some(&model), &ControllerSettings::default())
                .unwrap();

        let names: Vec<&str> = merged.actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, BLUEPRINT_ACTIONS);
        assert!(merged.replaced.is_empty());

        let find = merged.actions.iter().find(|a| a.name == "find").unwrap();
        assert_eq!(find.route, "/products");
        let find_one = merged.actions.iter().find(|a| a.name == "findOne").unwrap();
        assert_eq!(find_one.route, "/products/:id");
    }

    #[test]
    fn override_wins_and_original_blueprint_action_is_preserved() {
        let model = memory_model();
        let controller =
            Controller::new().action("findOne", |_req| ActionOutcome::deferred(async { Ok(None) }));
        let config = from_value(json!({
            "users": { "findOne": { "route": "/users/custom/:id" } }
        }))
        .unwrap();

        let merged = merge_resource(
            "users",
            Some(&controller),
            Some(&model),
            &config.controller("users"),
        )
        .unwrap();

        // Exactly one primary action per logical name.
        let find_ones: Vec<&Action> =
            merged.actions.iter().filter(|a| a.name == "findOne").collect();
        assert_eq!(find_ones.len(), 1);
        assert_eq!(find_ones[0].route, "/users/custom/:id");
        assert_eq!(find_ones[0].methods, vec![Method::GET]);

        // The blueprint original survives under its own route.
        assert_eq!(merged.replaced.len(), 1);
        assert_eq!(merged.replaced[0].name, "findOne");
        assert_eq!(merged.replaced[0].route, "/users/:id");
        assert_eq!(merged.replaced[0].methods, vec![Method::GET]);
    }

    #[test]
    fn explicit_action_without_settings_defaults_to_get_and_kebab_route() {
        let controller =
            Controller::new().action("uploadAvatar", |_req| ActionOutcome::None);
        let merged =
            merge_resource("users", Some(&controller), None, &ControllerSettings::default())
                .unwrap();

        assert_eq!(merged.actions.len(), 1);
        assert_eq!(merged.actions[0].route, "/upload-avatar");
        assert_eq!(merged.actions[0].methods, vec![Method::GET]);
        assert!(merged.replaced.is_empty());
    }

    #[test]
    fn explicit_action_with_blueprint_name_falls_back_to_blueprint_route() {
        let model = memory_model();
        let controller =
            Controller::new().action("update", |_req| ActionOutcome::deferred(async { Ok(None) }));
        let config = from_value(json!({
            "orders": { "update": { "methods": ["PUT"] } }
        }))
        .unwrap();

        let merged = merge_resource(
            "orders",
            Some(&controller),
            Some(&model),
            &config.controller("orders"),
        )
        .unwrap();

        let update = merged.actions.iter().find(|a| a.name == "update").unwrap();
        assert_eq!(update.route, "/orders/:id");
        assert_eq!(update.methods, vec![Method::PUT]);
        assert_eq!(merged.replaced.len(), 1);
    }

    #[test]
    fn configured_methods_are_validated() {
        let controller = Controller::new().action("ping", |_req| ActionOutcome::None);
        let config = from_value(json!({
            "status": { "ping": { "methods": ["fetch"] } }
        }))
        .unwrap();

        let result = merge_resource("status", Some(&controller), None, &config.controller("status"));
        assert!(matches!(result, Err(ConfigError::UnsupportedMethod { .. })));
    }
}
