//! The `transport` module is responsible for handling network communication
//! with administrators and machines over HTTP.
//!
//! It defines the JSON response bodies and the axum router that forwards
//! requests to the broker.

pub mod http;
pub mod message;

pub use http::{router, serve, start_http_server};
