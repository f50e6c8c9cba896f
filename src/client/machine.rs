use serde::Serialize;

use crate::auth::Signer;
use crate::broker::job::{Job, MachineId};
use crate::broker::message::{AckRequest, PollRequest};
use crate::utils::{BrokerError, Result};

/// A request body paired with the value for its `x-signature` header.
#[derive(Debug, Clone)]
pub struct SignedRequest<T> {
    pub body: T,
    pub signature: String,
}

impl<T: Serialize> SignedRequest<T> {
    /// The body as canonical JSON, byte-identical to what was signed.
    pub fn canonical_body(&self) -> Result<Vec<u8>> {
        crate::auth::canonical_bytes(&self.body)
    }
}

/// The machine side of the protocol.
///
/// Builds signed poll and ack bodies for one machine and checks the
/// signature on jobs the broker hands back. It does no I/O.
#[derive(Debug, Clone)]
pub struct MachineClient {
    pub machine_id: MachineId,
    signer: Signer,
}

impl MachineClient {
    pub fn new(machine_id: &str, shared_secret: &str) -> Result<Self> {
        Ok(Self {
            machine_id: machine_id.to_string(),
            signer: Signer::new(shared_secret)?,
        })
    }

    pub fn poll_request(&self, capabilities: &[&str]) -> Result<SignedRequest<PollRequest>> {
        let body = PollRequest {
            machine_id: self.machine_id.clone(),
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        };
        self.sign(body)
    }

    pub fn ack_request(
        &self,
        job_id: &str,
        status: &str,
        stdout: &str,
        stderr: &str,
        took_ms: u64,
    ) -> Result<SignedRequest<AckRequest>> {
        let body = AckRequest {
            job_id: job_id.to_string(),
            status: status.to_string(),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            took_ms,
        };
        self.sign(body)
    }

    /// Checks that a polled job came from the broker untouched and is meant
    /// for this machine.
    pub fn verify_job(&self, job: &Job, signature: &str) -> Result<()> {
        self.signer.verify_message(job, signature)?;
        if job.machine_id != self.machine_id {
            return Err(BrokerError::MachineNotAllowed(job.machine_id.clone()));
        }
        Ok(())
    }

    fn sign<T: Serialize>(&self, body: T) -> Result<SignedRequest<T>> {
        let signature = self.signer.sign_message(&body)?;
        Ok(SignedRequest { body, signature })
    }
}
