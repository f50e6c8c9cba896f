pub mod engine;
pub mod job;
pub mod message;
pub mod queue;
pub mod store;

pub use engine::Broker;
pub use job::{Job, JobId, JobResult, ParamValue, Params};
pub use queue::DispatchQueue;
pub use store::JobStore;
