// This file is part of multicore-sched.
//
// multicore-sched is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// multicore-sched is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with multicore-sched. If not, see <http://www.gnu.org/licenses/>.

//! The placement/preemption core of a multi-core CPU job scheduler for a
//! discrete-event simulator.
//!
//! This crate owns no time and runs no I/O: the simulator drives it strictly
//! through the [`Dispatcher`] callback surface (arrival, completion, quantum
//! expiry), and queries aggregate statistics once a trace is drained. See the
//! crate's `SPEC_FULL.md` for the full behavioural contract.

mod dispatcher;
mod error;
mod job;
mod policy;
mod queue;

pub use dispatcher::{Dispatcher, Stats};
pub use error::DispatcherError;
pub use job::{Job, JobId, Time};
pub use policy::Policy;
pub use queue::PendingQueue;

/// Stable log target used for every `tracing` event emitted by this crate.
pub(crate) const LOG_TARGET: &str = "sched::dispatcher";

/// Return value meaning "no scheduling change" / "core left idle", per the
/// external interface's return-value convention.
pub const NO_CHANGE: i64 = -1;
