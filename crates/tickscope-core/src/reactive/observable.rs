use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use super::subscription::{Subscription, SubscriptionId, Unsubscribe};
use crate::alloc::IndexMap;
use crate::error::Fault;
use crate::scheduler::{TickScheduler, TickStatus, Tickable};

/// Callbacks receiving an observable's notifications.
pub struct Observer<T> {
    on_next: Box<dyn FnMut(&T)>,
    on_error: Option<Box<dyn FnMut(&Fault)>>,
}

impl<T> Observer<T> {
    pub fn new(on_next: impl FnMut(&T) + 'static) -> Self {
        Self {
            on_next: Box::new(on_next),
            on_error: None,
        }
    }

    /// Called once if the accessor or a subscriber faults. No further calls
    /// follow.
    pub fn on_error(mut self, on_error: impl FnMut(&Fault) + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }
}

type SharedObserver<T> = Rc<RefCell<Observer<T>>>;

struct ObservableState<T> {
    value: T,
    observers: IndexMap<SubscriptionId, SharedObserver<T>>,
    next_id: SubscriptionId,
    /// Set once the first subscriber arrives.
    observed: bool,
    retired: bool,
}

impl<T> Unsubscribe for RefCell<ObservableState<T>> {
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.borrow_mut().observers.shift_remove(&id).is_some()
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.borrow().observers.contains_key(&id)
    }
}

/// Polls an accessor every tick and notifies subscribers when its value changes.
///
/// The handle is cheap to clone. The scheduler owns the accessor; the handle
/// only shares the last-seen value and the subscriber list.
///
/// A value that is not equal to itself, such as a float NaN, counts as
/// unchanged when the last-seen value was not equal to itself either.
pub struct Observable<T> {
    state: Rc<RefCell<ObservableState<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Observable")
            .field("value", &state.value)
            .field("subscribers", &state.observers.len())
            .field("retired", &state.retired)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Observe `selector(target)`.
    ///
    /// The target is held weakly: once it is dropped, the next read faults with
    /// [`Fault::TargetDropped`] and the observable retires.
    pub fn every_value_changed<S: 'static>(
        scheduler: &mut TickScheduler,
        target: &Rc<S>,
        selector: impl Fn(&S) -> T + 'static,
    ) -> Result<Self, Fault> {
        let target = Rc::downgrade(target);
        Self::try_from_fn(scheduler, move || {
            let target = target.upgrade().ok_or(Fault::TargetDropped)?;
            Ok(selector(&target))
        })
    }

    /// Observe an infallible getter.
    pub fn from_fn(
        scheduler: &mut TickScheduler,
        getter: impl Fn() -> T + 'static,
    ) -> Result<Self, Fault> {
        Self::try_from_fn(scheduler, move || Ok(getter()))
    }

    /// Observe a fallible accessor.
    ///
    /// The accessor is read once immediately. If that read fails the error is
    /// returned and nothing is registered.
    pub fn try_from_fn(
        scheduler: &mut TickScheduler,
        accessor: impl Fn() -> Result<T, Fault> + 'static,
    ) -> Result<Self, Fault> {
        let initial = read(&accessor)?;
        let state = Rc::new(RefCell::new(ObservableState {
            value: initial,
            observers: IndexMap::default(),
            next_id: SubscriptionId::first(),
            observed: false,
            retired: false,
        }));

        scheduler.register(ChangeDetector {
            state: Rc::clone(&state),
            accessor: Box::new(accessor),
            retire_unobserved: scheduler.config().retire_unobserved,
        });

        Ok(Self { state })
    }

    /// Subscribe to value changes.
    pub fn subscribe(&self, on_next: impl FnMut(&T) + 'static) -> Subscription {
        self.subscribe_observer(Observer::new(on_next))
    }

    /// Subscribe with a full [`Observer`].
    ///
    /// Subscribing to a retired observable returns an empty subscription; the
    /// observer will never be called.
    pub fn subscribe_observer(&self, observer: Observer<T>) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            if state.retired {
                return Subscription::empty();
            }
            let id = state.next_id;
            state.next_id = id.next();
            state.observers.insert(id, Rc::new(RefCell::new(observer)));
            state.observed = true;
            id
        };

        let weak = Rc::downgrade(&self.state);
        let source: Weak<dyn Unsubscribe> = weak;
        Subscription::new(source, id)
    }

    /// The last value seen.
    pub fn value(&self) -> T {
        self.state.borrow().value.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Whether the observable has been removed from scheduling for good.
    pub fn is_retired(&self) -> bool {
        self.state.borrow().retired
    }
}

/// `PartialEq` with NaN-like values treated as equal to each other.
fn same_value<T: PartialEq>(last: &T, next: &T) -> bool {
    #[allow(clippy::eq_op)]
    let both_unordered = last != last && next != next;
    last == next || both_unordered
}

fn read<T>(accessor: &dyn Fn() -> Result<T, Fault>) -> Result<T, Fault> {
    panic::catch_unwind(AssertUnwindSafe(accessor))
        .unwrap_or_else(|payload| Err(Fault::from_panic(payload)))
}

/// The scheduled half of an [`Observable`].
struct ChangeDetector<T> {
    state: Rc<RefCell<ObservableState<T>>>,
    accessor: Box<dyn Fn() -> Result<T, Fault>>,
    retire_unobserved: bool,
}

impl<T: Clone + PartialEq + 'static> ChangeDetector<T> {
    fn should_retire(&self) -> bool {
        let state = self.state.borrow();
        if state.retired {
            return true;
        }
        if !state.observers.is_empty() {
            return false;
        }
        // Without a handle nobody can subscribe any more.
        let unreachable = !state.observed && Rc::strong_count(&self.state) == 1;
        unreachable || (self.retire_unobserved && state.observed)
    }

    fn notify(&self, value: &T) {
        let observers: Vec<_> = self
            .state
            .borrow()
            .observers
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();

        for (id, observer) in observers {
            // Skip subscribers released by an earlier callback in this dispatch.
            if !self.state.borrow().observers.contains_key(&id) {
                continue;
            }
            let mut observer = observer.borrow_mut();
            (observer.on_next)(value);
        }
    }

    fn fail(&self, fault: &Fault) {
        let observers: Vec<_> = {
            let mut state = self.state.borrow_mut();
            state.retired = true;
            state.observers.drain(..).map(|(_, observer)| observer).collect()
        };

        for observer in observers {
            let mut observer = observer.borrow_mut();
            if let Some(on_error) = observer.on_error.as_mut() {
                on_error(fault);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Tickable for ChangeDetector<T> {
    fn tick(&mut self) -> Result<TickStatus, Fault> {
        if self.should_retire() {
            self.state.borrow_mut().retired = true;
            tracing::debug!("Retiring observable without subscribers");
            return Ok(TickStatus::Done);
        }

        let value = match read(self.accessor.as_ref()) {
            Ok(value) => value,
            Err(fault) => {
                self.fail(&fault);
                return Err(fault);
            }
        };

        let changed = {
            let mut state = self.state.borrow_mut();
            if same_value(&state.value, &value) {
                false
            } else {
                state.value = value.clone();
                true
            }
        };

        if changed {
            let dispatch = panic::catch_unwind(AssertUnwindSafe(|| self.notify(&value)));
            if let Err(payload) = dispatch {
                let fault = Fault::from_panic(payload);
                self.fail(&fault);
                return Err(fault);
            }
        }
        Ok(TickStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::scheduler::log_fault;
    use std::cell::Cell;

    fn record<T: Clone + PartialEq + 'static>(
        observable: &Observable<T>,
    ) -> (Subscription, Rc<RefCell<Vec<T>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = observable.subscribe(move |value: &T| sink.borrow_mut().push(value.clone()));
        (subscription, seen)
    }

    #[test]
    fn test_no_notification_without_change() {
        let mut scheduler = TickScheduler::default();
        let observable = Observable::from_fn(&mut scheduler, || 42).unwrap();
        let (_subscription, seen) = record(&observable);

        for _ in 0..5 {
            scheduler.run_once();
        }

        assert!(seen.borrow().is_empty());
        assert_eq!(observable.value(), 42);
    }

    #[test]
    fn test_notifies_once_per_change() {
        let mut scheduler = TickScheduler::default();
        let source = Rc::new(Cell::new(1));
        let observable = Observable::every_value_changed(&mut scheduler, &source, |s| s.get()).unwrap();
        let (_subscription, seen) = record(&observable);

        source.set(2);
        scheduler.run_once();
        scheduler.run_once();
        source.set(3);
        scheduler.run_once();
        source.set(1);
        scheduler.run_once();

        assert_eq!(*seen.borrow(), vec![2, 3, 1]);
        assert_eq!(observable.value(), 1);
    }

    #[test]
    fn test_subscribers_notified_in_registration_order() {
        let mut scheduler = TickScheduler::default();
        let source = Rc::new(Cell::new(0));
        let observable = Observable::every_value_changed(&mut scheduler, &source, |s| s.get()).unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));
        let subscriptions: Vec<_> = (0..3)
            .map(|index| {
                let order = Rc::clone(&order);
                observable.subscribe(move |_| order.borrow_mut().push(index))
            })
            .collect();

        source.set(1);
        scheduler.run_once();

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subscriptions);
    }

    #[test]
    fn test_dispose_removes_only_that_subscriber() {
        let mut scheduler = TickScheduler::default();
        let source = Rc::new(Cell::new(0));
        let observable = Observable::every_value_changed(&mut scheduler, &source, |s| s.get()).unwrap();
        let (first, first_seen) = record(&observable);
        let (_second, second_seen) = record(&observable);

        assert!(first.dispose());
        source.set(9);
        scheduler.run_once();

        assert!(first_seen.borrow().is_empty());
        assert_eq!(*second_seen.borrow(), vec![9]);
        assert_eq!(observable.subscriber_count(), 1);
    }

    #[test]
    fn test_fault_notifies_once_and_retires() {
        let mut scheduler = TickScheduler::new(Box::new(log_fault));
        let fail = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fail);
        let observable = Observable::try_from_fn(&mut scheduler, move || {
            if flag.get() {
                Err(Fault::accessor("gone"))
            } else {
                Ok(1)
            }
        })
        .unwrap();

        let errors = Rc::new(Cell::new(0));
        let error_count = Rc::clone(&errors);
        let subscription = observable.subscribe_observer(
            Observer::new(|_: &i32| {}).on_error(move |_| error_count.set(error_count.get() + 1)),
        );

        fail.set(true);
        scheduler.run_once();
        scheduler.run_once();

        assert_eq!(errors.get(), 1);
        assert!(observable.is_retired());
        assert_eq!(observable.subscriber_count(), 0);
        assert!(scheduler.is_empty());
        assert!(!subscription.is_active());
        assert!(!subscription.dispose());
    }

    #[test]
    fn test_panicking_accessor_is_a_fault() {
        let mut scheduler = TickScheduler::default();
        let armed = Rc::new(Cell::new(false));
        let trigger = Rc::clone(&armed);
        let observable = Observable::from_fn(&mut scheduler, move || {
            if trigger.get() {
                panic!("accessor blew up");
            }
            0
        })
        .unwrap();

        let received = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&received);
        let _subscription = observable.subscribe_observer(
            Observer::new(|_: &i32| {}).on_error(move |fault| *slot.borrow_mut() = Some(fault.clone())),
        );

        armed.set(true);
        scheduler.run_once();

        assert_eq!(
            *received.borrow(),
            Some(Fault::Panicked("accessor blew up".into()))
        );
        assert!(observable.is_retired());
    }

    #[test]
    fn test_dropped_target_retires() {
        let mut scheduler = TickScheduler::default();
        let target = Rc::new(Cell::new(5));
        let observable = Observable::every_value_changed(&mut scheduler, &target, |t| t.get()).unwrap();
        let _subscription = observable.subscribe(|_| {});

        drop(target);
        scheduler.run_once();

        assert!(observable.is_retired());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_failing_initial_read_registers_nothing() {
        let mut scheduler = TickScheduler::default();
        let result = Observable::<i32>::try_from_fn(&mut scheduler, || Err(Fault::accessor("nope")));
        assert_eq!(result.unwrap_err(), Fault::accessor("nope"));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_unobserved_observable_retires_eagerly() {
        let mut scheduler = TickScheduler::default();
        let observable = Observable::from_fn(&mut scheduler, || 0).unwrap();
        let subscription = observable.subscribe(|_| {});

        scheduler.run_once();
        assert_eq!(scheduler.len(), 1);

        assert!(subscription.dispose());
        scheduler.run_once();
        assert!(scheduler.is_empty());
        assert!(observable.is_retired());
    }

    #[test]
    fn test_unobserved_observable_kept_when_configured() {
        let config = SchedulerConfig {
            retire_unobserved: false,
            ..Default::default()
        };
        let mut scheduler = TickScheduler::with_config(config, Box::new(log_fault));
        let observable = Observable::from_fn(&mut scheduler, || 0).unwrap();
        drop(observable.subscribe(|_| {}));

        scheduler.run_once();
        assert_eq!(scheduler.len(), 1);
        assert!(!observable.is_retired());
    }

    #[test]
    fn test_never_subscribed_observable_stays_scheduled() {
        let mut scheduler = TickScheduler::default();
        let observable = Observable::from_fn(&mut scheduler, || 0).unwrap();

        scheduler.run_once();
        assert_eq!(scheduler.len(), 1);

        let _subscription = observable.subscribe(|_| {});
        scheduler.run_once();
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_subscriber_released_mid_dispatch_is_skipped() {
        let mut scheduler = TickScheduler::default();
        let source = Rc::new(Cell::new(0));
        let observable = Observable::every_value_changed(&mut scheduler, &source, |s| s.get()).unwrap();

        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let to_release = Rc::clone(&victim);
        let _killer = observable.subscribe(move |_| {
            to_release.borrow_mut().take();
        });
        let (victim_subscription, victim_seen) = record(&observable);
        *victim.borrow_mut() = Some(victim_subscription);

        source.set(1);
        scheduler.run_once();

        assert!(victim_seen.borrow().is_empty());
        assert_eq!(observable.subscriber_count(), 1);
    }

    #[test]
    fn test_nan_counts_as_unchanged() {
        let mut scheduler = TickScheduler::default();
        let source = Rc::new(Cell::new(f32::NAN));
        let observable = Observable::every_value_changed(&mut scheduler, &source, |s| s.get()).unwrap();
        let (_subscription, seen) = record(&observable);

        for _ in 0..5 {
            scheduler.run_once();
        }
        assert!(seen.borrow().is_empty());

        source.set(1.0);
        scheduler.run_once();
        source.set(f32::NAN);
        scheduler.run_once();
        scheduler.run_once();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], 1.0);
        assert!(seen[1].is_nan());
    }

    #[test]
    fn test_panicking_subscriber_retires_and_reports() {
        let faults = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&faults);
        let mut scheduler = TickScheduler::new(Box::new(move |fault: &Fault| sink.borrow_mut().push(fault.clone())));
        let source = Rc::new(Cell::new(0));
        let observable = Observable::every_value_changed(&mut scheduler, &source, |s| s.get()).unwrap();

        let _boom = observable.subscribe(|_| panic!("subscriber boom"));
        let errors = Rc::new(RefCell::new(Vec::new()));
        let received = Rc::clone(&errors);
        let _watcher = observable.subscribe_observer(
            Observer::new(|_: &i32| {}).on_error(move |fault| received.borrow_mut().push(fault.clone())),
        );

        source.set(1);
        scheduler.run_once();

        let expected = Fault::Panicked("subscriber boom".into());
        assert_eq!(*errors.borrow(), vec![expected.clone()]);
        assert_eq!(*faults.borrow(), vec![expected]);
        assert!(observable.is_retired());
        assert_eq!(observable.subscriber_count(), 0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_dropped_handle_without_subscribers_retires() {
        let mut scheduler = TickScheduler::with_config(
            SchedulerConfig {
                retire_unobserved: false,
                ..Default::default()
            },
            Box::new(log_fault),
        );
        drop(Observable::from_fn(&mut scheduler, || 0).unwrap());
        assert_eq!(scheduler.len(), 1);

        scheduler.run_once();
        assert!(scheduler.is_empty());
    }
}
