//! Example consumer: a separate Rust project that uses blueprint-sdk as a
//! dependency.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Or from this directory: `cargo run`

use blueprint_sdk::{
    build_router, common_routes, from_value, ActionOutcome, AllowAll, Controller, MemoryModel,
    ResourceRegistry, RoutingTable,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blueprint_sdk=info")),
        )
        .init();

    // Two conventional resources plus one controller that overrides a
    // blueprint action and adds a custom action of its own.
    let users = Controller::new()
        .action("findOne", |req| {
            ActionOutcome::deferred(async move {
                let id = req.param("id").unwrap_or("unknown").to_string();
                Ok(Some(json!({ "id": id, "source": "custom findOne" })))
            })
        })
        .action("whoAmI", |_req| {
            ActionOutcome::deferred(async { Ok(Some(json!({ "user": "anonymous" }))) })
        });

    let registry = ResourceRegistry::new()
        .model("products", MemoryModel::new())
        .model("users", MemoryModel::new())
        .controller("users", users);

    let config = from_value(json!({
        "users": {
            "findOne": { "route": "/users/custom/:id" },
            "whoAmI": { "route": "/users/who-am-i" }
        }
    }))?;

    let table = RoutingTable::assemble(&registry, &config, Arc::new(AllowAll))?;
    let app = common_routes().merge(build_router(table));

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
