//! Controller REST API

/// Client configuration
pub mod config;
/// Classification of REST responses
pub mod outcome;
/// Controller REST v1 resources
pub mod paths;

pub use config::ClientConfiguration;
pub use outcome::ResponseOutcome;

pub const CONTROLLER_REST_URI: &str = "http://localhost:9091";
pub const TCP_PORT: u16 = 9091;
