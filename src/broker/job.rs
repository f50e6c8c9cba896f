use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type JobId = String;
pub type MachineId = String;

/// A job parameter value.
///
/// Parameters arrive as arbitrary JSON, so they are captured in an explicit
/// value type instead of an open map. Nested maps are `BTreeMap`s so the
/// in-memory form iterates in a fixed order; the signed form is fixed by
/// canonical encoding regardless.
///
/// Integers are tried as `i64` first, then `u64`, so every JSON integer
/// survives unchanged; only numbers with a fraction or exponent become floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Unsigned(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

pub type Params = BTreeMap<String, ParamValue>;

/// A unit of work targeted at one machine.
///
/// Jobs are immutable once created. Whether a job is still queued or already
/// claimed is tracked by the dispatch queue, not by the job itself.
///
/// # Fields
///
/// - `id` - Unique identifier generated by the broker at enqueue time.
/// - `machine_id` - The machine allowed to claim this job.
/// - `command` - Opaque command string, never interpreted by the broker.
/// - `params` - Arbitrary parameters handed to the machine.
/// - `ts` - Unix timestamp (seconds) of creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub machine_id: MachineId,
    pub command: String,
    #[serde(default)]
    pub params: Params,
    pub ts: i64,
}

impl Job {
    /// Builds a job with a fresh v4 identifier stamped with the current time.
    pub fn new(machine_id: &str, command: &str, params: Params) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            machine_id: machine_id.to_string(),
            command: command.to_string(),
            params,
            ts: chrono::Utc::now().timestamp(),
        }
    }
}

/// The outcome a machine reports after running a job.
///
/// At most one result is kept per job id; a later report replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub job_id: JobId,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
    pub took_ms: u64,
}
