pub mod cors;
pub mod error;
pub mod gateway;
pub mod health;
pub mod logger;
pub mod rejection;
pub mod route_table;
pub mod routes;
pub mod state;
pub mod whoami;

pub use error::{Result as ServerResult, ServerError};
pub use rejection::{GatewayRejection, RejectionBody, RejectionResponse};
pub use routes::build_router;
pub use state::AppState;

#[cfg(test)]
mod tests;
