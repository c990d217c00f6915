//! Blueprint SDK: convention-driven resource routing library.
//!
//! Every registered data model gets a default CRUD action set (its
//! "blueprint"); explicitly authored controllers override or extend those
//! defaults; the merged actions assemble into one axum router, with
//! overridden blueprint actions kept reachable under their original routes.

pub mod action;
pub mod blueprint;
pub mod case;
pub mod config;
pub mod controllers;
pub mod error;
pub mod model;
pub mod policy;
pub mod registry;
pub mod response;
pub mod routes;
pub mod table;

pub use action::{wrap, Action, ActionOutcome, ActionRequest, Handler};
pub use blueprint::{blueprint_route, default_actions};
pub use case::to_route_segment;
pub use config::{from_value, load_from_path, RoutesConfig};
pub use controllers::{merge_resource, Controller, MergedActions};
pub use error::{ActionError, ConfigError};
pub use model::{DataModel, MemoryModel};
pub use policy::{AllowAll, Policy};
pub use registry::ResourceRegistry;
pub use response::{strategy_for, ResponseStrategy};
pub use routes::{build_router, common_routes};
pub use table::{Resource, RoutingTable};
