use std::collections::VecDeque;

use crate::broker::job::JobId;
use crate::broker::store::JobStore;

/// Ordered backlog of job ids waiting to be claimed.
///
/// One list serves every machine. Claims scan from the front for the first
/// entry targeted at the caller, so ordering is FIFO per machine and a
/// machine with nothing queued never holds up anyone else.
///
/// The queue only references jobs by id; the jobs live in the [`JobStore`].
#[derive(Debug, Default)]
pub struct DispatchQueue {
    pending: VecDeque<JobId>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a job id to the back of the backlog.
    pub fn enqueue(&mut self, id: JobId) {
        self.pending.push_back(id);
    }

    /// Removes and returns the first queued id whose job targets `machine_id`.
    ///
    /// Entries ahead of the match keep their relative order. Ids with no job
    /// in `store` are skipped and left in place.
    pub fn claim_first_for(&mut self, machine_id: &str, store: &JobStore) -> Option<JobId> {
        let position = self.pending.iter().position(|id| {
            store
                .get(id)
                .is_some_and(|job| job.machine_id == machine_id)
        })?;
        self.pending.remove(position)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pending.iter().any(|queued| queued == id)
    }
}
