//! HTTP surface of the marketplace: axum router, token middleware,
//! handlers and OpenAPI document.

pub mod errors;
pub mod extract;
pub mod state;
pub mod middleware;
pub mod routes;
pub mod openapi;
pub mod startup;

pub use startup::run;
pub use state::ServerState;
