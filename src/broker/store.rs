use std::collections::HashMap;

use crate::broker::job::{Job, JobId, JobResult};

/// Holds every job the broker has issued and the latest result per job id.
///
/// Nothing is ever removed. Claimed and finished jobs stay in the store for
/// the lifetime of the process.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: HashMap<JobId, Job>,
    results: HashMap<JobId, JobResult>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a job, replacing any job with the same id.
    pub fn put(&mut self, job: Job) {
        self.jobs.insert(job.id.clone(), job);
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// Records a result, replacing any earlier result for the same job id.
    ///
    /// The job id is not checked against issued jobs.
    pub fn put_result(&mut self, result: JobResult) {
        self.results.insert(result.job_id.clone(), result);
    }

    pub fn get_result(&self, id: &str) -> Option<&JobResult> {
        self.results.get(id)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
