//! Tickscope - live debug panels for in-memory state
//!
//! Describe a panel once with [`PanelBuilder`] and it stays in sync with
//! your state: every bound widget is re-read once per tick and updated only
//! when its value changes. Edits made by the user go straight to the setter
//! you provided.
//!
//! - **Core**: tick scheduler, change-detection observables, subscriptions
//! - **UI**: builder, widget descriptions, toolkit capability
//! - **Runtime**: [`PanelRuntime`] ties both to the host's frame loop
//!
//! # Quick Start
//!
//! ```ignore
//! use tickscope::prelude::*;
//!
//! struct Player {
//!     health: Rc<Cell<i32>>,
//! }
//!
//! impl PanelSource for Player {
//!     fn configure(&self, builder: &mut PanelBuilder) {
//!         let health = Rc::clone(&self.health);
//!         builder.add_progress_bar_int("Health", 0, 100, move || health.get());
//!     }
//! }
//!
//! let mut runtime = PanelRuntime::new(toolkit);
//! let panel = runtime.mount(&player, host)?;
//!
//! // Once per frame:
//! runtime.tick();
//! ```

pub mod runtime;

pub use tickscope_core as core;
pub use tickscope_core::{logging, math};
pub use tickscope_ui as ui;

pub use runtime::PanelRuntime;
pub use tickscope_core::{
    Config, DisposeBag, Fault, Observable, Observer, SchedulerConfig, Subscription,
    TickScheduler, TickStatus, Tickable,
};
pub use tickscope_ui::{
    BuildContext, EnumValue, FieldValue, ImageSource, Panel, PanelBuilder, PanelError,
    PanelResult, PanelSource, SharedToolkit, WidgetId, WidgetKind, WidgetToolkit, WidgetValue,
    WindowOptions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::runtime::PanelRuntime;

    pub use tickscope_core::{
        Config, DisposeBag, Fault, FaultResult, Observable, Observer, SchedulerConfig,
        Subscription, TickScheduler, TickStatus, Tickable,
    };

    // Core math types
    pub use tickscope_core::geometry::{Bounds, BoundsInt, Rect};
    pub use tickscope_core::math::{IVec2, IVec3, Vec2, Vec3, Vec4};

    pub use tickscope_ui::{
        BuildContext, EnumValue, ImageSource, Panel, PanelBuilder, PanelError, PanelSource,
        SharedToolkit, WidgetId, WidgetToolkit, WindowOptions,
    };
}
