//! # PullBroker
//!
//! `pullbroker` is a minimal push-pull job broker. An administrator queues
//! commands for named machines; machines poll for their work, run it, and
//! report back. Every exchange is bound to a shared secret with HMAC-SHA256
//! over a canonical JSON encoding.
//!
//! ## Core Modules
//!
//! - `auth`: canonical encoding, signing, and the admin/allow-list policy.
//! - `broker`: jobs, results, the job store, the dispatch queue, and the broker service.
//! - `client`: the machine side, signing requests and verifying received jobs.
//! - `config`: loads settings from `config/default` and the environment.
//! - `transport`: the HTTP routes that expose the broker.
//! - `utils`: the error type and logging setup.
//!
//! Everything is held in memory; a restart forgets all jobs and results.

pub mod auth;
pub mod broker;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;
