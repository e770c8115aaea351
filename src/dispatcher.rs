//! The dispatcher: translates simulator events into core/job assignments
//! and accumulates the statistics the simulator queries once a trace ends.
//!
//! Grounded on the teacher's PVF execution queue (`try_assign_next_job`,
//! `handle_job_finish`) generalised from an async worker pool driven by
//! channels to a synchronous state machine driven directly by simulator
//! callbacks, since the dispatcher is re-entered strictly one event at a
//! time (`SPEC_FULL.md` §5) and needs no concurrency machinery at all.

use crate::error::DispatcherError;
use crate::job::{Job, JobId, Time};
use crate::policy::Policy;
use crate::queue::PendingQueue;
use crate::{LOG_TARGET, NO_CHANGE};

/// Running statistics accumulators. Integer sums, divided into a float only
/// at accessor time (see `SPEC_FULL.md` §9 on the source's floating
/// accumulators).
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    completed: u64,
    waiting_sum: i64,
    turnaround_sum: i64,
    response_sum: i64,
}

impl Stats {
    fn avg(self, sum: i64) -> f64 {
        if self.completed > 0 {
            sum as f64 / self.completed as f64
        } else {
            0.0
        }
    }

    pub fn avg_waiting(self) -> f64 {
        self.avg(self.waiting_sum)
    }

    pub fn avg_turnaround(self) -> f64 {
        self.avg(self.turnaround_sum)
    }

    pub fn avg_response(self) -> f64 {
        self.avg(self.response_sum)
    }

    pub fn completed(self) -> u64 {
        self.completed
    }
}

/// The core placement/preemption engine. Owns the fixed-size vector of core
/// slots, the ordered pending queue, the active policy, and the running
/// statistics.
pub struct Dispatcher {
    cores: Vec<Option<Job>>,
    pending: PendingQueue<Job>,
    policy: Policy,
    stats: Stats,
}

impl Dispatcher {
    /// Allocates `cores` empty slots and an OPQ ordered per `policy`. Called
    /// exactly once before any event.
    pub fn start_up(cores: usize, policy: Policy) -> Result<Self, DispatcherError> {
        if cores == 0 {
            return Err(DispatcherError::NoCores);
        }
        Ok(Self {
            cores: (0..cores).map(|_| None).collect(),
            pending: PendingQueue::new(move |a: &Job, b: &Job| policy.compare(a, b)),
            policy,
            stats: Stats::default(),
        })
    }

    /// Number of core slots.
    pub fn core_count(&self) -> usize {
        self.cores.len()
    }

    /// Running statistics, queryable at any point (idempotent; meaningful
    /// once the simulator has drained all events).
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn avg_waiting(&self) -> f64 {
        self.stats.avg_waiting()
    }

    pub fn avg_turnaround(&self) -> f64 {
        self.stats.avg_turnaround()
    }

    pub fn avg_response(&self) -> f64 {
        self.stats.avg_response()
    }

    fn find_idle_core(&self) -> Option<usize> {
        self.cores.iter().position(Option::is_none)
    }

    /// Arrival event: places `job` on an idle core, preempts a running job
    /// under PSJF/PPRI, or enqueues it. Returns the core id used, or
    /// [`NO_CHANGE`].
    pub fn new_job(&mut self, id: JobId, now: Time, length: Time, priority: i32) -> i64 {
        debug_assert!(length > 0, "job length must be positive");
        let mut job = Job::new(id, now, length, priority);

        if let Some(core) = self.find_idle_core() {
            job.first_dispatch = Some(now);
            let core_id = core;
            tracing::debug!(target: LOG_TARGET, job_id = id, core_id, "placed on idle core");
            self.cores[core] = Some(job);
            return core_id as i64;
        }

        if self.policy.preempts() {
            if let Some(core) = self.try_preempt(&job, now) {
                let victim = self.cores[core].take().expect("victim slot was just selected as occupied; qed");
                self.restore_victim_sentinel_and_enqueue(victim, now);
                job.first_dispatch = Some(now);
                tracing::trace!(target: LOG_TARGET, job_id = id, core_id = core, "preempted running job");
                self.cores[core] = Some(job);
                return core as i64;
            }
        }

        tracing::debug!(target: LOG_TARGET, job_id = id, "enqueued, no core available");
        self.pending.offer(job);
        NO_CHANGE
    }

    /// If preemption is warranted, returns the victim's core index (the job
    /// is left in place; the caller evicts it).
    fn try_preempt(&mut self, incoming: &Job, now: Time) -> Option<usize> {
        match self.policy {
            Policy::Ppri => self.find_ppri_victim(incoming, now),
            Policy::Psjf => self.find_psjf_victim(incoming, now),
            _ => None,
        }
    }

    /// PPRI victim: numerically largest priority (lowest urgency) among
    /// slots not placed this very tick; ties broken by later arrival
    /// (younger). Preempts only if the victim is strictly lower priority
    /// than the incoming job.
    fn find_ppri_victim(&self, incoming: &Job, now: Time) -> Option<usize> {
        let victim = self
            .cores
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|job| (idx, job)))
            .filter(|(_, job)| job.arrival != now)
            .max_by_key(|(_, job)| (job.priority, job.arrival))?;

        let (idx, job) = victim;
        (job.priority > incoming.priority).then_some(idx)
    }

    /// PSJF victim: largest remaining time among slots not placed this very
    /// tick, ages each candidate's `remaining` first. Ties broken by slot
    /// index (first-found wins, via strict greater-than comparison).
    /// Preempts only if the victim's remaining exceeds the incoming job's.
    fn find_psjf_victim(&mut self, incoming: &Job, now: Time) -> Option<usize> {
        for slot in self.cores.iter_mut() {
            if let Some(job) = slot {
                if job.arrival != now {
                    job.remaining -= now - job.last_observed;
                    job.last_observed = now;
                }
            }
        }

        let mut victim: Option<(usize, Time)> = None;
        for (idx, slot) in self.cores.iter().enumerate() {
            if let Some(job) = slot {
                if job.arrival == now {
                    continue;
                }
                if victim.map_or(true, |(_, best)| job.remaining > best) {
                    victim = Some((idx, job.remaining));
                }
            }
        }

        let (idx, remaining) = victim?;
        (remaining > incoming.remaining).then_some(idx)
    }

    /// Shared preemption tail: if the victim was first-dispatched at `now`
    /// (placed this very tick and never truly ran), its `first_dispatch` is
    /// rolled back to the sentinel so a later re-dispatch recomputes its
    /// response time. The victim is then returned to the pending queue.
    fn restore_victim_sentinel_and_enqueue(&mut self, mut victim: Job, now: Time) {
        if victim.first_dispatch == Some(now) {
            victim.first_dispatch = None;
        }
        self.pending.offer(victim);
    }

    /// Completion event: frees the core, accumulates statistics, and installs
    /// the OPQ head (if any) onto the freed slot. Returns the installed
    /// job's id, or [`NO_CHANGE`] if the core goes idle.
    pub fn job_finished(&mut self, core_id: usize, job_id: JobId, now: Time) -> i64 {
        debug_assert!(core_id < self.cores.len(), "core_id out of range");
        let Some(slot) = self.cores.get_mut(core_id) else { return NO_CHANGE };
        debug_assert!(slot.is_some(), "job_finished called on an empty core slot");
        let Some(job) = slot.take() else { return NO_CHANGE };
        debug_assert_eq!(job.id, job_id, "completion event names a different job than the one running");

        self.stats.waiting_sum += now - job.arrival - job.length;
        self.stats.turnaround_sum += now - job.arrival;
        self.stats.response_sum +=
            job.first_dispatch.expect("job ran to completion, so it must have been dispatched; qed") - job.arrival;
        self.stats.completed += 1;

        tracing::debug!(target: LOG_TARGET, job_id, core_id, "job completed");

        match self.pending.poll() {
            Some(mut next) => {
                next.last_observed = now;
                if next.first_dispatch.is_none() {
                    next.first_dispatch = Some(now);
                }
                let next_id = next.id;
                tracing::debug!(target: LOG_TARGET, job_id = next_id, core_id, "installed from pending queue");
                *slot = Some(next);
                next_id
            }
            None => NO_CHANGE,
        }
    }

    /// Quantum-expiry event, valid only under round-robin: rotates the
    /// running job (if any) to the OPQ tail and installs the head. Returns
    /// the installed job's id, or [`NO_CHANGE`] if both the slot and the
    /// queue are empty.
    pub fn quantum_expired(&mut self, core_id: usize, now: Time) -> i64 {
        debug_assert!(self.policy.is_round_robin(), "quantum_expired is only valid under round-robin");
        debug_assert!(core_id < self.cores.len(), "core_id out of range");
        let Some(slot) = self.cores.get_mut(core_id) else { return NO_CHANGE };

        if slot.is_none() && self.pending.is_empty() {
            return NO_CHANGE;
        }

        if let Some(running) = slot.take() {
            self.pending.offer(running);
        }

        match self.pending.poll() {
            Some(mut next) => {
                if next.first_dispatch.is_none() {
                    next.first_dispatch = Some(now);
                }
                next.last_observed = now;
                let next_id = next.id;
                tracing::trace!(target: LOG_TARGET, job_id = next_id, core_id, "quantum rotation");
                *slot = Some(next);
                next_id
            }
            None => NO_CHANGE,
        }
    }

    /// Logs the current pending-queue and core occupancy. Purely
    /// observational; has no effect on scheduling state.
    pub fn show_queue(&self) {
        let pending_ids: Vec<JobId> = self.pending.iter().map(|job| job.id).collect();
        let core_ids: Vec<Option<JobId>> = self.cores.iter().map(|slot| slot.as_ref().map(|j| j.id)).collect();
        tracing::info!(target: LOG_TARGET, ?pending_ids, ?core_ids, "scheduler state");
    }

    /// Releases every still-occupied slot's job and the pending queue.
    /// After this call no operation is valid.
    pub fn clean_up(&mut self) {
        for slot in self.cores.iter_mut() {
            *slot = None;
        }
        self.pending.destroy();
    }
}
