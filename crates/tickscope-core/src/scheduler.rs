//! Per-tick scheduler for polling tasks.
//!
//! [`TickScheduler`] keeps its tasks in a dense slot array. Each call to
//! [`TickScheduler::run_once`] ticks every live task exactly once. Tasks that
//! finish or fault leave a hole, and the hole is filled in the same pass by
//! pulling a surviving task down from the end of the live region. No task is
//! shifted and no second buffer is allocated, so removal is O(1).
//!
//! Survivors may change position during a pass. Tasks are independent pollers
//! and carry no ordering contract between each other.
//!
//! # Example
//!
//! ```
//! use tickscope_core::{FaultResult, TickScheduler, TickStatus};
//!
//! let mut scheduler = TickScheduler::default();
//! let mut remaining = 2;
//! scheduler.register(move || -> FaultResult<TickStatus> {
//!     remaining -= 1;
//!     Ok(if remaining == 0 { TickStatus::Done } else { TickStatus::Continue })
//! });
//!
//! scheduler.run_once();
//! assert_eq!(scheduler.len(), 1);
//! scheduler.run_once();
//! assert!(scheduler.is_empty());
//! ```

use std::panic::{self, AssertUnwindSafe};

use crate::config::SchedulerConfig;
use crate::error::Fault;
use crate::profiling::profile_function;

/// What a task wants after being ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Keep the task scheduled.
    Continue,
    /// Remove the task. It will not be ticked again.
    Done,
}

/// A unit of work ticked once per scheduler pass.
///
/// Returning `Err` retires the task and reports the fault to the scheduler's
/// fault sink. A panic inside `tick` is treated the same way.
pub trait Tickable {
    fn tick(&mut self) -> Result<TickStatus, Fault>;
}

impl<F> Tickable for F
where
    F: FnMut() -> Result<TickStatus, Fault>,
{
    fn tick(&mut self) -> Result<TickStatus, Fault> {
        self()
    }
}

/// Receives every fault raised by a scheduled task.
pub type FaultSink = Box<dyn FnMut(&Fault)>;

/// Default fault sink: logs through `tracing`.
pub fn log_fault(fault: &Fault) {
    tracing::error!(%fault, "Unhandled fault in scheduled task");
}

/// Cumulative counters since the scheduler was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Number of `run_once` calls.
    pub passes: u64,
    /// Number of individual task ticks.
    pub ticks: u64,
    /// Tasks removed, whether finished or faulted.
    pub retired: u64,
    /// Tasks removed because they faulted.
    pub faults: u64,
}

/// Runs registered [`Tickable`] tasks once per host tick.
///
/// Construct one per process before any panel is built and call
/// [`run_once`](Self::run_once) exactly once per frame, after the host has
/// finished mutating state for that frame.
pub struct TickScheduler {
    slots: Vec<Option<Box<dyn Tickable>>>,
    /// Exclusive end of the region that may hold live tasks.
    tail: usize,
    live: usize,
    config: SchedulerConfig,
    fault_sink: FaultSink,
    stats: SchedulerStats,
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("live", &self.live)
            .field("tail", &self.tail)
            .field("capacity", &self.slots.len())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::with_config(SchedulerConfig::default(), Box::new(log_fault))
    }
}

impl TickScheduler {
    /// Create a scheduler with the default configuration.
    pub fn new(fault_sink: FaultSink) -> Self {
        Self::with_config(SchedulerConfig::default(), fault_sink)
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(config: SchedulerConfig, fault_sink: FaultSink) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(config.initial_capacity, || None);
        Self {
            slots,
            tail: 0,
            live: 0,
            config,
            fault_sink,
            stats: SchedulerStats::default(),
        }
    }

    /// Register a task. It is ticked starting with the next pass.
    pub fn register(&mut self, task: impl Tickable + 'static) {
        self.register_boxed(Box::new(task));
    }

    /// Register an already boxed task.
    pub fn register_boxed(&mut self, task: Box<dyn Tickable>) {
        if self.tail == self.slots.len() {
            let grown = self.slots.len().saturating_mul(2).max(1);
            tracing::trace!(from = self.slots.len(), to = grown, "Growing scheduler storage");
            self.slots.resize_with(grown, || None);
        }
        self.slots[self.tail] = Some(task);
        self.tail += 1;
        self.live += 1;
    }

    /// Tick every live task once, retiring finished and faulted tasks.
    pub fn run_once(&mut self) {
        profile_function!();
        self.stats.passes += 1;

        // Exclusive end of the region still to be scanned from the back.
        let mut back = self.tail;
        let mut i = 0;

        'forward: while i < self.slots.len() {
            if self.slots[i].is_some() {
                if self.poll(i) {
                    i += 1;
                    continue;
                }
                self.slots[i] = None;
            }

            // Slot `i` is a hole. Pull the nearest survivor down from the back.
            while i + 1 < back {
                let j = back - 1;
                back -= 1;
                if self.slots[j].is_none() {
                    continue;
                }
                if self.poll(j) {
                    self.slots[i] = self.slots[j].take();
                    i += 1;
                    continue 'forward;
                }
                self.slots[j] = None;
            }

            self.tail = i;
            break;
        }
    }

    /// Tick the task in `index`. Returns whether it stays scheduled.
    fn poll(&mut self, index: usize) -> bool {
        self.stats.ticks += 1;
        let Some(task) = self.slots[index].as_mut() else {
            return false;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.tick()))
            .unwrap_or_else(|payload| Err(Fault::from_panic(payload)));

        match outcome {
            Ok(TickStatus::Continue) => true,
            Ok(TickStatus::Done) => {
                tracing::trace!(slot = index, "Task finished");
                self.retire();
                false
            }
            Err(fault) => {
                tracing::warn!(slot = index, %fault, "Retiring faulted task");
                self.retire();
                self.stats.faults += 1;
                self.report(&fault);
                false
            }
        }
    }

    fn retire(&mut self) {
        self.live -= 1;
        self.stats.retired += 1;
    }

    fn report(&mut self, fault: &Fault) {
        let sink = &mut self.fault_sink;
        // A sink that panics loses the report; the pass carries on.
        let _ = panic::catch_unwind(AssertUnwindSafe(|| sink(fault)));
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Exclusive end of the region that may hold live tasks.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Number of allocated task slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
