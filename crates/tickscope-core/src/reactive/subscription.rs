use std::num::NonZeroU64;
use std::rc::Weak;

/// Identifier of one subscriber within one observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(NonZeroU64);

impl SubscriptionId {
    pub(crate) fn first() -> Self {
        Self(NonZeroU64::MIN)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

static_assertions::assert_eq_size!(SubscriptionId, Option<SubscriptionId>);

/// Something a [`Subscription`] can detach itself from.
pub(crate) trait Unsubscribe {
    /// Remove the subscriber. Returns `false` if it was already gone.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    fn is_subscribed(&self, id: SubscriptionId) -> bool;
}

/// Release handle for one subscriber of one observable.
///
/// Call [`dispose`](Self::dispose) to detach explicitly; dropping the handle
/// detaches as well. The handle only holds a weak reference, so it never
/// keeps the observable alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    source: Option<(Weak<dyn Unsubscribe>, SubscriptionId)>,
}

impl Subscription {
    pub(crate) fn new(source: Weak<dyn Unsubscribe>, id: SubscriptionId) -> Self {
        Self {
            source: Some((source, id)),
        }
    }

    /// A subscription that is not attached to anything.
    pub fn empty() -> Self {
        Self { source: None }
    }

    /// Detach the subscriber.
    ///
    /// Returns `true` if a live subscriber was removed, `false` if the
    /// observable had already retired or dropped it.
    pub fn dispose(mut self) -> bool {
        self.release()
    }

    /// Whether the subscriber is still registered with a live observable.
    pub fn is_active(&self) -> bool {
        self.source.as_ref().is_some_and(|(source, id)| {
            source
                .upgrade()
                .is_some_and(|source| source.is_subscribed(*id))
        })
    }

    pub fn id(&self) -> Option<SubscriptionId> {
        self.source.as_ref().map(|(_, id)| *id)
    }

    fn release(&mut self) -> bool {
        match self.source.take() {
            Some((source, id)) => source
                .upgrade()
                .is_some_and(|source| source.unsubscribe(id)),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id())
            .field("active", &self.is_active())
            .finish()
    }
}
