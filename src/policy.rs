//! The six scheduling policies, modelled as a single tag that drives both
//! the OPQ comparator and the preemption predicate.
//!
//! A closed, compile-time-known variant set is better served by a `match`
//! than by a boxed trait object per policy; see `DESIGN.md`.

use std::cmp::Ordering;

use crate::job::Job;

/// The active scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// First-come, first-served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Preemptive shortest job first.
    Psjf,
    /// Static priority, non-preemptive.
    Pri,
    /// Preemptive static priority.
    Ppri,
    /// Round-robin.
    RoundRobin,
}

impl Policy {
    /// The OPQ ordering relation for this policy: `Less` means "a strictly
    /// precedes b". FCFS/RR always return `Greater`, which makes every
    /// `offer` land at the tail (pure FIFO append), mirroring the reference
    /// `FCFScomp`'s "always positive" convention.
    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            Policy::Fcfs | Policy::RoundRobin => Ordering::Greater,
            Policy::Sjf | Policy::Psjf => a.remaining.cmp(&b.remaining),
            Policy::Pri | Policy::Ppri => a.priority.cmp(&b.priority).then(a.arrival.cmp(&b.arrival)),
        }
    }

    /// Whether a running job may be preempted by an arriving one under this
    /// policy.
    pub fn preempts(self) -> bool {
        matches!(self, Policy::Psjf | Policy::Ppri)
    }

    /// Whether this policy accepts `quantum_expired` events.
    pub fn is_round_robin(self) -> bool {
        matches!(self, Policy::RoundRobin)
    }
}
