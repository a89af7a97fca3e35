use error_location::ErrorLocation;
use thiserror::Error;

/// Setup-time errors: route registration and limit configuration.
///
/// Request-time failures never surface as `GatewayError`; they become a
/// `GatewayDecision`.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid rate limit: {message} {location}")]
    InvalidRateLimit {
        message: String,
        location: ErrorLocation,
    },

    #[error("Route already registered: {route_id} {location}")]
    DuplicateRoute {
        route_id: String,
        location: ErrorLocation,
    },

    #[error("Invalid route '{route_id}': {message} {location}")]
    InvalidRoute {
        route_id: String,
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
