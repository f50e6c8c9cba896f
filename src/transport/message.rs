use serde::{Deserialize, Serialize};

use crate::broker::job::{Job, JobResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub pending: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnqueueResponse {
    pub ok: bool,
    pub job_id: String,
    pub sig: String,
}

/// `{"job": null}` when nothing is pending, otherwise the job and its signature.
#[derive(Debug, Serialize, Deserialize)]
pub struct PollResponse {
    pub job: Option<Job>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}

/// Either the stored result or `{"found": false}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultResponse {
    Found(JobResult),
    Missing { found: bool },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
