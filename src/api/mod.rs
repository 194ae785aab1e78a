//! HTTP surface of the example service.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, AppState};
pub use server::start_api_server;
