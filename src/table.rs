//! The routing table: one resource per registered name, assembled once at
//! startup and immutable afterwards.

use crate::action::Action;
use crate::config::types::RoutesConfig;
use crate::config::validator::validate;
use crate::controllers::merge_resource;
use crate::error::ConfigError;
use crate::policy::Policy;
use crate::registry::ResourceRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// One routing unit: a resource's merged primary actions plus the blueprint
/// actions its controller replaced, kept routable as secondary routes.
pub struct Resource {
    pub name: String,
    pub actions: Vec<Action>,
    pub replaced: Vec<Action>,
}

impl Resource {
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn replaced_action(&self, name: &str) -> Option<&Action> {
        self.replaced.iter().find(|a| a.name == name)
    }
}

pub struct RoutingTable {
    resources: Vec<Resource>,
    policy: Arc<dyn Policy>,
}

impl RoutingTable {
    /// Merge every registered resource and verify that no two primary
    /// actions claim the same method and route. Collisions are a startup
    /// error, never a silently shadowed route.
    pub fn assemble(
        registry: &ResourceRegistry,
        config: &RoutesConfig,
        policy: Arc<dyn Policy>,
    ) -> Result<RoutingTable, ConfigError> {
        validate(config)?;

        let mut resources = Vec::new();
        for name in registry.resource_names() {
            let merged = merge_resource(
                &name,
                registry.controller_for(&name),
                registry.model_for(&name),
                &config.controller(&name),
            )?;
            resources.push(Resource {
                name,
                actions: merged.actions,
                replaced: merged.replaced,
            });
        }

        let mut claimed: HashMap<(String, String), String> = HashMap::new();
        for resource in &resources {
            for action in &resource.actions {
                let owner = format!("{}.{}", resource.name, action.name);
                for method in &action.methods {
                    let key = (method.to_string(), action.route.clone());
                    if let Some(first) = claimed.insert(key, owner.clone()) {
                        return Err(ConfigError::RouteCollision {
                            method: method.to_string(),
                            route: action.route.clone(),
                            first,
                            second: owner,
                        });
                    }
                }
            }
        }

        Ok(RoutingTable { resources, policy })
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// ReplacedActionRegistry lookup: the original blueprint action for a
    /// resource/action pair whose name was overridden by the controller.
    pub fn replaced(&self, resource: &str, action: &str) -> Option<&Action> {
        self.resource(resource)?.replaced_action(action)
    }

    pub fn policy(&self) -> Arc<dyn Policy> {
        self.policy.clone()
    }

    pub(crate) fn into_parts(self) -> (Vec<Resource>, Arc<dyn Policy>) {
        (self.resources, self.policy)
    }
}
