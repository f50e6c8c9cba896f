use serde::{Deserialize, Serialize};

use crate::broker::job::{Job, JobId, JobResult, MachineId, Params};

/// An administrator's request to queue a command for a machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueRequest {
    pub machine_id: MachineId,
    pub command: String,
    #[serde(default)]
    pub params: Params,
}

/// A machine asking for its next job.
///
/// The machine signs the canonical form of this whole body, `capabilities`
/// included, even though the broker does not filter on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollRequest {
    pub machine_id: MachineId,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// A machine reporting how a job went.
///
/// Optional fields take their defaults before the body is canonicalized, so
/// the machine must sign the defaulted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckRequest {
    pub job_id: JobId,
    pub status: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub took_ms: u64,
}

impl From<AckRequest> for JobResult {
    fn from(req: AckRequest) -> Self {
        Self {
            job_id: req.job_id,
            status: req.status,
            stdout: req.stdout,
            stderr: req.stderr,
            took_ms: req.took_ms,
        }
    }
}

/// What an administrator gets back from a successful enqueue.
#[derive(Debug, Clone, PartialEq)]
pub struct EnqueueReceipt {
    pub job_id: JobId,
    pub signature: String,
}

/// A claimed job together with a signature over its canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedJob {
    pub job: Job,
    pub signature: String,
}
