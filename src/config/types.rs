//! Raw config types matching the controllers JSON shape:
//! `{ "<resource>": { "<action>": { "route": "...", "methods": ["..."] } } }`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-action overrides. A missing or empty entry keeps the defaults
/// (route derived from blueprint or action name, methods `["get"]`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionSettings {
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub methods: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ControllerSettings {
    #[serde(flatten)]
    pub actions: HashMap<String, ActionSettings>,
}

impl ControllerSettings {
    pub fn action(&self, name: &str) -> ActionSettings {
        self.actions.get(name).cloned().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(flatten)]
    pub controllers: HashMap<String, ControllerSettings>,
}

impl RoutesConfig {
    /// Settings for one controller; absent entries default to `{}`.
    pub fn controller(&self, name: &str) -> ControllerSettings {
        self.controllers.get(name).cloned().unwrap_or_default()
    }
}
