//! Blueprint actions: the default CRUD set synthesized for every registered
//! data model when no explicit controller action overrides it.

use crate::action::{Action, ActionOutcome, ActionRequest, Handler};
use crate::error::ActionError;
use crate::model::DataModel;
use axum::http::Method;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Blueprint action names, in mount order.
pub const BLUEPRINT_ACTIONS: [&str; 5] = ["find", "findOne", "create", "update", "destroy"];

fn collection_route(model_name: &str) -> String {
    format!("/{model_name}")
}

fn singular_route(model_name: &str) -> String {
    format!("/{model_name}/:id")
}

/// Default route for a blueprint action name, consulted by the merger as the
/// fallback for explicit actions that share a blueprint name but configure
/// no route of their own.
pub fn blueprint_route(action: &str, model_name: &str) -> Option<String> {
    match action {
        "find" | "create" => Some(collection_route(model_name)),
        "findOne" | "update" | "destroy" => Some(singular_route(model_name)),
        _ => None,
    }
}

/// The five default actions for a model: list, fetch-one, create, update,
/// delete. Handlers defer to the model's data access and let the method's
/// response strategy shape the reply.
pub fn default_actions(model: &Arc<dyn DataModel>, model_name: &str) -> Vec<Action> {
    vec![
        Action {
            name: "find".into(),
            methods: vec![Method::GET],
            route: collection_route(model_name),
            handler: find(model.clone()),
        },
        Action {
            name: "findOne".into(),
            methods: vec![Method::GET],
            route: singular_route(model_name),
            handler: find_one(model.clone()),
        },
        Action {
            name: "create".into(),
            methods: vec![Method::POST],
            route: collection_route(model_name),
            handler: create(model.clone()),
        },
        Action {
            name: "update".into(),
            methods: vec![Method::PUT],
            route: singular_route(model_name),
            handler: update(model.clone()),
        },
        Action {
            name: "destroy".into(),
            methods: vec![Method::DELETE],
            route: singular_route(model_name),
            handler: destroy(model.clone()),
        },
    ]
}

fn required_id(req: &ActionRequest) -> Result<String, ActionError> {
    req.param("id")
        .map(str::to_string)
        .ok_or_else(|| ActionError::bad_request("missing id parameter"))
}

fn body_attrs(req: &ActionRequest) -> Result<Map<String, Value>, ActionError> {
    match req.json()? {
        Value::Object(attrs) => Ok(attrs),
        _ => Err(ActionError::bad_request("body must be a JSON object")),
    }
}

fn find(model: Arc<dyn DataModel>) -> Handler {
    Handler::action(move |_req| {
        let model = model.clone();
        ActionOutcome::deferred(async move {
            let rows = model.find_all().await?;
            Ok(Some(Value::Array(rows)))
        })
    })
}

fn find_one(model: Arc<dyn DataModel>) -> Handler {
    Handler::action(move |req| {
        let model = model.clone();
        ActionOutcome::deferred(async move {
            let id = required_id(&req)?;
            model.find_by_id(&id).await
        })
    })
}

fn create(model: Arc<dyn DataModel>) -> Handler {
    Handler::action(move |req| {
        let model = model.clone();
        ActionOutcome::deferred(async move {
            let attrs = body_attrs(&req)?;
            let row = model.create(attrs).await?;
            Ok(Some(row))
        })
    })
}

fn update(model: Arc<dyn DataModel>) -> Handler {
    Handler::action(move |req| {
        let model = model.clone();
        ActionOutcome::deferred(async move {
            let id = required_id(&req)?;
            let attrs = body_attrs(&req)?;
            model.update_by_id(&id, attrs).await
        })
    })
}

fn destroy(model: Arc<dyn DataModel>) -> Handler {
    Handler::action(move |req| {
        let model = model.clone();
        ActionOutcome::deferred(async move {
            let id = required_id(&req)?;
            model.delete_by_id(&id).await?;
            Ok(None)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemoryModel;

    #[test]
    fn default_set_has_the_five_crud_actions_with_expected_routes() {
        let model: Arc<dyn DataModel> = Arc::new(MemoryModel::new());
        let actions = default_actions(&model, "products");

        let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, BLUEPRINT_ACTIONS);

        let by_name = |name: &str| actions.iter().find(|a| a.name == name).unwrap();
        assert_eq!(by_name("find").route, "/products");
        assert_eq!(by_name("find").methods, vec![Method::GET]);
        assert_eq!(by_name("findOne").route, "/products/:id");
        assert_eq!(by_name("create").route, "/products");
        assert_eq!(by_name("create").methods, vec![Method::POST]);
        assert_eq!(by_name("update").route, "/products/:id");
        assert_eq!(by_name("update").methods, vec![Method::PUT]);
        assert_eq!(by_name("destroy").route, "/products/:id");
        assert_eq!(by_name("destroy").methods, vec![Method::DELETE]);
    }

    #[test]
    fn blueprint_route_is_defined_only_for_blueprint_names() {
        assert_eq!(blueprint_route("find", "users"), Some("/users".into()));
        assert_eq!(blueprint_route("findOne", "users"), Some("/users/:id".into()));
        assert_eq!(blueprint_route("uploadAvatar", "users"), None);
    }
}
