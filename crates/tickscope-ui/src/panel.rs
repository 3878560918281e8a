//! Realized panels and the context they are built in.

use tickscope_core::{SharedDisposeBag, TickScheduler};

use crate::toolkit::{SharedToolkit, WidgetId};

/// What a builder needs to realize widgets and schedule their bindings.
pub struct BuildContext<'a> {
    toolkit: &'a SharedToolkit,
    scheduler: &'a mut TickScheduler,
}

impl<'a> BuildContext<'a> {
    pub fn new(toolkit: &'a SharedToolkit, scheduler: &'a mut TickScheduler) -> Self {
        Self { toolkit, scheduler }
    }

    pub fn toolkit(&self) -> &SharedToolkit {
        self.toolkit
    }

    pub fn scheduler(&mut self) -> &mut TickScheduler {
        &mut *self.scheduler
    }
}

/// A realized panel: the window widget plus every binding made for it.
///
/// Dropping the panel releases its bindings; their observables retire on the
/// next scheduler pass. Use [`leak`](Self::leak) to leave that to the
/// toolkit's detach hook instead.
#[must_use = "dropping a Panel releases all of its bindings"]
pub struct Panel {
    root: WidgetId,
    disposables: SharedDisposeBag,
    leaked: bool,
}

impl Panel {
    pub(crate) fn new(root: WidgetId, disposables: SharedDisposeBag) -> Self {
        Self {
            root,
            disposables,
            leaked: false,
        }
    }

    /// The window widget.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Release every binding. Returns the number of subscriptions removed.
    pub fn detach(mut self) -> usize {
        self.release()
    }

    /// Keep the bindings alive until the toolkit detaches the window.
    pub fn leak(mut self) -> WidgetId {
        self.leaked = true;
        self.root
    }

    fn release(&mut self) -> usize {
        self.disposables
            .try_borrow_mut()
            .map_or(0, |mut bag| bag.dispose())
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        if !self.leaked {
            self.release();
        }
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("root", &self.root)
            .field("leaked", &self.leaked)
            .finish()
    }
}
