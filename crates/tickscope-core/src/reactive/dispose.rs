use std::cell::RefCell;
use std::rc::Rc;

use super::subscription::Subscription;

enum Disposable {
    Subscription(Subscription),
    Bag(SharedDisposeBag),
}

impl Disposable {
    fn dispose(self) -> usize {
        match self {
            Disposable::Subscription(subscription) => usize::from(subscription.dispose()),
            // A bag already being disposed further up the stack releases itself.
            Disposable::Bag(bag) => bag.try_borrow_mut().map_or(0, |mut bag| bag.dispose()),
        }
    }
}

/// A bag of release handles disposed together.
///
/// Dropping the bag disposes everything still in it.
#[derive(Default)]
pub struct DisposeBag {
    items: Vec<Disposable>,
}

/// A bag that can be shared between an owner and a detach hook.
pub type SharedDisposeBag = Rc<RefCell<DisposeBag>>;

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the bag for sharing.
    pub fn shared(self) -> SharedDisposeBag {
        Rc::new(RefCell::new(self))
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.items.push(Disposable::Subscription(subscription));
    }

    /// Nest another bag. Disposing this bag disposes the nested one too.
    pub fn add_bag(&mut self, bag: SharedDisposeBag) {
        self.items.push(Disposable::Bag(bag));
    }

    /// Number of handles held, nested bags counting as one.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dispose every handle, nested bags included.
    ///
    /// Returns how many live subscribers were actually removed. Handles that
    /// were already released elsewhere are not counted.
    pub fn dispose(&mut self) -> usize {
        let items = std::mem::take(&mut self.items);
        let released: usize = items.into_iter().map(Disposable::dispose).sum();
        if released > 0 {
            tracing::trace!("Disposed {} subscriptions", released);
        }
        released
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposeBag")
            .field("len", &self.items.len())
            .finish()
    }
}
