//! The `utils` module collects the pieces every other module leans on:
//! the broker error type and logging setup.

pub mod error;
pub mod logging;

pub use error::{BrokerError, Result};
