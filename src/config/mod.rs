//! Controllers configuration: per-action route and method overrides.

pub mod loader;
pub mod types;
pub mod validator;

pub use loader::{from_value, load_from_path};
pub use types::{ActionSettings, ControllerSettings, RoutesConfig};
pub use validator::validate;
