//! Change-detection observables driven by the tick scheduler.
//!
//! An [`Observable`] wraps an accessor. Every scheduler pass re-reads the
//! accessor and, when the value differs from the last one seen, pushes it to
//! each subscriber in registration order.
//!
//! # Invariants
//!
//! 1. The last-seen value always equals the value of the most recent
//!    notification, or the initial read if nothing has been sent yet.
//! 2. A tick whose read equals the last-seen value notifies nobody. Two
//!    NaN-like reads count as equal.
//! 3. An accessor fault, or a subscriber panicking during dispatch, notifies
//!    each current subscriber once, clears the subscriber set and retires the
//!    observable for good.
//! 4. Releasing a [`Subscription`] removes exactly one subscriber. Releasing
//!    it after the observable retired is a no-op.
//!
//! # Example
//!
//! ```
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//! use tickscope_core::{Observable, TickScheduler};
//!
//! let mut scheduler = TickScheduler::default();
//! let health = Rc::new(Cell::new(100));
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let observable = Observable::every_value_changed(&mut scheduler, &health, |h| h.get()).unwrap();
//! let sink = Rc::clone(&seen);
//! let _subscription = observable.subscribe(move |value| sink.borrow_mut().push(*value));
//!
//! scheduler.run_once();
//! health.set(75);
//! scheduler.run_once();
//! assert_eq!(*seen.borrow(), vec![75]);
//! ```

mod dispose;
mod observable;
mod subscription;

pub use dispose::{DisposeBag, SharedDisposeBag};
pub use observable::{Observable, Observer};
pub use subscription::{Subscription, SubscriptionId};
