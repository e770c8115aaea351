//! The `Job` record and its identity/time type aliases.

/// Simulator time, in whatever integer unit the simulator uses (ticks,
/// cycles, ...). Representative traces fit in 32 bits; this crate uses
/// `i64` purely as headroom, not as a behavioural change.
pub type Time = i64;

/// A globally unique job identifier, supplied by the simulator.
pub type JobId = i64;

/// A single pending or running job.
///
/// Invariants upheld by [`crate::Dispatcher`]: `0 <= remaining <= length`;
/// `arrival <= first_dispatch` once `first_dispatch` is set; a live job is
/// owned by exactly one of a core slot or the pending queue at any instant.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub arrival: Time,
    pub length: Time,
    pub remaining: Time,
    pub priority: i32,
    /// `None` until the job is first installed onto a core ("never
    /// dispatched" sentinel, modelled as an `Option` rather than a magic
    /// timestamp).
    pub first_dispatch: Option<Time>,
    /// Last time this job's `remaining` was known to be accurate; used by
    /// PSJF to age a running job's remaining time at preemption checks.
    pub last_observed: Time,
}

impl Job {
    pub fn new(id: JobId, arrival: Time, length: Time, priority: i32) -> Self {
        Self {
            id,
            arrival,
            length,
            remaining: length,
            priority,
            first_dispatch: None,
            last_observed: arrival,
        }
    }
}

/// Identity equality: two `Job`s are the same job iff their ids match,
/// regardless of how `remaining`/`last_observed` have since mutated. This is
/// what backs [`crate::PendingQueue::remove_value`] and must never be
/// confused with the ordering comparator.
impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Job {}
