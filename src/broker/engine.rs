//! Broker engine
//!
//! This module ties the job store, the dispatch queue and the authenticator
//! together into the four broker operations:
//! - `enqueue`: an administrator queues a command for a machine
//! - `poll`: a machine claims its next job, if any
//! - `ack`: a machine reports the outcome of a job
//! - `fetch_result`: an administrator reads the latest outcome
//!
//! Concurrency and usage notes:
//! - The store and the queue sit behind one mutex, so the claim scan and the
//!   removal happen as a single step and enqueues are never lost.
//! - Signatures and credentials are checked before the lock is taken; a
//!   rejected request never touches shared state.
//! - Nothing blocks waiting for work. A poll with no match returns at once.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::auth::{AccessPolicy, Signer};
use crate::broker::job::{Job, JobResult};
use crate::broker::message::{AckRequest, EnqueueReceipt, EnqueueRequest, PollRequest, SignedJob};
use crate::broker::queue::DispatchQueue;
use crate::broker::store::JobStore;
use crate::config::AuthSettings;
use crate::utils::{BrokerError, Result};

#[derive(Debug, Default)]
struct BrokerState {
    store: JobStore,
    queue: DispatchQueue,
}

/// The job broker. Share it as `Arc<Broker>`; every method takes `&self`.
#[derive(Debug)]
pub struct Broker {
    signer: Signer,
    policy: AccessPolicy,
    state: Mutex<BrokerState>,
}

impl Broker {
    pub fn new(signer: Signer, policy: AccessPolicy) -> Self {
        Self {
            signer,
            policy,
            state: Mutex::new(BrokerState::default()),
        }
    }

    /// Builds a broker from the auth section of the settings.
    ///
    /// Fails with [`BrokerError::MissingSecret`] when no shared secret is set.
    pub fn from_settings(auth: &AuthSettings) -> Result<Self> {
        let signer = Signer::new(&auth.shared_secret)?;
        let policy = AccessPolicy::new(
            auth.admin_api_key.clone(),
            auth.allowed_machines.iter().cloned(),
        );
        Ok(Self::new(signer, policy))
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    // A poisoned lock only means another request panicked mid-call; every
    // mutation is a single map or list operation, so the state is still whole.
    fn state(&self) -> MutexGuard<'_, BrokerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues a new job for `req.machine_id` and returns its id and signature.
    pub fn enqueue(&self, admin_key: Option<&str>, req: EnqueueRequest) -> Result<EnqueueReceipt> {
        self.policy.require_admin(admin_key).inspect_err(|_| {
            warn!("Rejected enqueue: bad admin key");
        })?;
        if !self.policy.machine_allowed(&req.machine_id) {
            warn!(machine = %req.machine_id, "Rejected enqueue: machine not allowed");
            return Err(BrokerError::MachineNotAllowed(req.machine_id));
        }

        let job = Job::new(&req.machine_id, &req.command, req.params);
        let signature = self.signer.sign_message(&job)?;
        let job_id = job.id.clone();

        let (pending, issued) = {
            let mut state = self.state();
            state.store.put(job);
            state.queue.enqueue(job_id.clone());
            (state.queue.len(), state.store.job_count())
        };

        info!(job = %job_id, machine = %req.machine_id, pending, issued, "Job enqueued");
        Ok(EnqueueReceipt { job_id, signature })
    }

    /// Claims the oldest job queued for the polling machine.
    ///
    /// Machines outside the allow-list get `None`, exactly as if nothing were
    /// queued for them. `capabilities` is signed but does not affect matching.
    pub fn poll(&self, req: &PollRequest, signature: &str) -> Result<Option<SignedJob>> {
        self.signer.verify_message(req, signature).inspect_err(|_| {
            warn!(machine = %req.machine_id, "Rejected poll: bad signature");
        })?;
        if !self.policy.machine_allowed(&req.machine_id) {
            debug!(machine = %req.machine_id, "Poll from machine outside allow-list");
            return Ok(None);
        }

        let job = {
            let mut state = self.state();
            let BrokerState { store, queue } = &mut *state;
            queue
                .claim_first_for(&req.machine_id, store)
                .and_then(|id| store.get(&id).cloned())
        };

        let Some(job) = job else {
            debug!(machine = %req.machine_id, "No job pending");
            return Ok(None);
        };

        let signature = self.signer.sign_message(&job)?;
        info!(job = %job.id, machine = %req.machine_id, "Job claimed");
        Ok(Some(SignedJob { job, signature }))
    }

    /// Records a job outcome, replacing any earlier one for the same id.
    ///
    /// The job id is not checked against issued jobs.
    pub fn ack(&self, req: AckRequest, signature: &str) -> Result<()> {
        self.signer.verify_message(&req, signature).inspect_err(|_| {
            warn!(job = %req.job_id, "Rejected ack: bad signature");
        })?;

        let result = JobResult::from(req);
        info!(job = %result.job_id, status = %result.status, took_ms = result.took_ms, "Job acknowledged");
        self.state().store.put_result(result);
        Ok(())
    }

    /// Returns the latest recorded outcome for `job_id`, if any.
    pub fn fetch_result(&self, admin_key: Option<&str>, job_id: &str) -> Result<Option<JobResult>> {
        self.policy.require_admin(admin_key).inspect_err(|_| {
            warn!("Rejected result fetch: bad admin key");
        })?;
        Ok(self.state().store.get_result(job_id).cloned())
    }

    /// Number of jobs waiting to be claimed.
    pub fn pending(&self) -> usize {
        self.state().queue.len()
    }

    /// Looks up an issued job by id, claimed or not.
    #[cfg(test)]
    pub(crate) fn job(&self, job_id: &str) -> Option<Job> {
        self.state().store.get(job_id).cloned()
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self, job_id: &str) -> bool {
        self.state().queue.contains(job_id)
    }
}
