//! Config validation: route shape and method names, rejected up front so a
//! bad entry never reaches the router.

use crate::config::types::RoutesConfig;
use crate::error::ConfigError;
use axum::http::Method;
use regex::Regex;
use std::sync::OnceLock;

/// Routes are absolute slash-separated segments of url-safe characters;
/// `:name` segments are path parameters.
fn route_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(/:?[A-Za-z0-9_.~-]+)+$").expect("route pattern"))
}

/// Parse a configured method name (any case) into an HTTP method.
pub fn parse_method(controller: &str, action: &str, method: &str) -> Result<Method, ConfigError> {
    match method.to_lowercase().as_str() {
        "get" => Ok(Method::GET),
        "post" => Ok(Method::POST),
        "put" => Ok(Method::PUT),
        "delete" => Ok(Method::DELETE),
        "patch" => Ok(Method::PATCH),
        "head" => Ok(Method::HEAD),
        "options" => Ok(Method::OPTIONS),
        _ => Err(ConfigError::UnsupportedMethod {
            controller: controller.to_string(),
            action: action.to_string(),
            method: method.to_string(),
        }),
    }
}

pub fn validate(config: &RoutesConfig) -> Result<(), ConfigError> {
    for (controller, settings) in &config.controllers {
        for (action, action_settings) in &settings.actions {
            if let Some(route) = &action_settings.route {
                if !route_pattern().is_match(route) {
                    return Err(ConfigError::InvalidRoute {
                        controller: controller.clone(),
                        action: action.clone(),
                        route: route.clone(),
                        reason: "must be absolute /segment[/:param] path",
                    });
                }
            }
            if let Some(methods) = &action_settings.methods {
                for method in methods {
                    parse_method(controller, action, method)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::from_value;
    use serde_json::json;

    #[test]
    fn accepts_parameterized_routes_and_mixed_case_methods() {
        let config = from_value(json!({
            "users": {
                "findOne": { "route": "/users/custom/:id", "methods": ["GET", "Post"] }
            }
        }))
        .unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_relative_routes() {
        let config = from_value(json!({
            "users": { "findOne": { "route": "users/:id" } }
        }))
        .unwrap();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidRoute { .. })
        ));
    }

    #[test]
    fn rejects_unknown_methods() {
        let config = from_value(json!({
            "users": { "findOne": { "methods": ["fetch"] } }
        }))
        .unwrap();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::UnsupportedMethod { .. })
        ));
    }
}
