//! Tickscope Core
//!
//! This crate contains the polling engine behind tickscope panels:
//!
//! - [`scheduler::TickScheduler`]: runs every registered [`scheduler::Tickable`]
//!   once per host tick and compacts retired tasks in place.
//! - [`reactive::Observable`]: re-reads an accessor every tick and pushes the
//!   value to its subscribers when it changes.
//! - [`reactive::Subscription`] and [`reactive::DisposeBag`]: release handles
//!   for subscriptions, individually or in bulk.
//!
//! Everything here is single-threaded. The scheduler is explicit state owned by
//! the host and passed by reference; there is no global instance.

pub mod alloc;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod reactive;
pub mod scheduler;

pub use config::{Config, ProfilingMode, SchedulerConfig};
pub use error::{Fault, FaultResult};
pub use reactive::{DisposeBag, Observable, Observer, SharedDisposeBag, Subscription};
pub use scheduler::{FaultSink, SchedulerStats, TickScheduler, TickStatus, Tickable};
