//! Load controllers config from a JSON value or file.

use crate::config::types::RoutesConfig;
use crate::error::ConfigError;
use std::path::Path;

/// Build config from an in-memory JSON value.
pub fn from_value(value: serde_json::Value) -> Result<RoutesConfig, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Load config from a JSON file. A missing file is an empty config, so apps
/// without per-action overrides need no config file at all.
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<RoutesConfig, ConfigError> {
    let path = path.as_ref();
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no controllers config file; using defaults");
            return Ok(RoutesConfig::default());
        }
        Err(e) => return Err(ConfigError::Load(format!("{}: {e}", path.display()))),
    };
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_controller_and_action_settings() {
        let config = from_value(json!({
            "users": {
                "findOne": { "route": "/users/custom/:id" },
                "uploadAvatar": { "methods": ["POST"] }
            }
        }))
        .unwrap();

        let users = config.controller("users");
        assert_eq!(
            users.action("findOne").route.as_deref(),
            Some("/users/custom/:id")
        );
        assert_eq!(users.action("uploadAvatar").methods, Some(vec!["POST".into()]));
        // Unknown entries fall back to empty defaults.
        assert!(users.action("find").route.is_none());
        assert!(config.controller("products").actions.is_empty());
    }

    #[tokio::test]
    async fn missing_config_file_yields_empty_config() {
        let config = load_from_path("/nonexistent/controllers.json").await.unwrap();
        assert!(config.controllers.is_empty());
    }
}
