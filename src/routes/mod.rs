//! Router assembly: per-resource routing units plus common liveness routes.

pub mod common;
pub mod resource;

pub use common::common_routes;
pub use resource::build_router;
