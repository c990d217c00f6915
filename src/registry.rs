//! Startup registry of data models and controllers, keyed by resource name.
//! Registration order is mount order, so the routing table is reproducible.

use crate::controllers::Controller;
use crate::model::DataModel;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Default)]
pub struct ResourceRegistry {
    models: Vec<(String, Arc<dyn DataModel>)>,
    controllers: Vec<(String, Controller)>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, name: impl Into<String>, model: impl DataModel + 'static) -> Self {
        self.models.push((name.into(), Arc::new(model)));
        self
    }

    pub fn model_arc(mut self, name: impl Into<String>, model: Arc<dyn DataModel>) -> Self {
        self.models.push((name.into(), model));
        self
    }

    pub fn controller(mut self, name: impl Into<String>, controller: Controller) -> Self {
        self.controllers.push((name.into(), controller));
        self
    }

    /// Union of model and controller names, first-registration order. A
    /// model-only or controller-only name is still a valid resource with an
    /// empty counterpart.
    pub(crate) fn resource_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for name in self
            .models
            .iter()
            .map(|(name, _)| name)
            .chain(self.controllers.iter().map(|(name, _)| name))
        {
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
        names
    }

    pub(crate) fn model_for(&self, name: &str) -> Option<&Arc<dyn DataModel>> {
        self.models
            .iter()
            .find(|(model_name, _)| model_name == name)
            .map(|(_, model)| model)
    }

    pub(crate) fn controller_for(&self, name: &str) -> Option<&Controller> {
        self.controllers
            .iter()
            .find(|(controller_name, _)| controller_name == name)
            .map(|(_, controller)| controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionOutcome;
    use crate::model::MemoryModel;

    #[test]
    fn resource_names_are_the_ordered_union_of_both_registries() {
        let registry = ResourceRegistry::new()
            .model("products", MemoryModel::new())
            .model("users", MemoryModel::new())
            .controller("users", Controller::new())
            .controller("status", Controller::new().action("ping", |_req| ActionOutcome::None));

        assert_eq!(registry.resource_names(), vec!["products", "users", "status"]);
        assert!(registry.model_for("status").is_none());
        assert!(registry.controller_for("products").is_none());
        assert!(registry.controller_for("users").is_some());
    }
}
