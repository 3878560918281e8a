//! Tickscope UI - declarative, live-updating debug panels
//!
//! This crate turns a list of widget descriptions into a live widget tree:
//! - Declarative builder API
//! - Getter/setter bindings kept in sync by polling, once per tick
//! - Toolkit-agnostic: widgets are created through [`WidgetToolkit`]
//! - Nested foldout groups with their own teardown
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let mut builder = PanelBuilder::new();
//! builder
//!     .configure_window_options(|window| window.title = "Player".into())
//!     .add_field("Name", move || player.name())
//!     .add_slider_mut("Speed", 0.0, 10.0, move || speed.get(), move |v| speed.set(v));
//!
//! let mut ctx = BuildContext::new(&toolkit, &mut scheduler);
//! let panel = builder.build_with(&mut ctx, host)?;
//!
//! // Once per frame:
//! scheduler.run_once();
//! ```

pub mod builder;
mod descriptor;
pub mod error;
pub mod format;
pub mod options;
pub mod panel;
pub mod source;
pub mod toolkit;
pub mod value;

pub use builder::PanelBuilder;
pub use error::{PanelError, PanelResult};
pub use options::WindowOptions;
pub use panel::{BuildContext, Panel};
pub use source::{PanelSource, mount};
pub use toolkit::{
    ClickCallback, DetachCallback, EditCallback, SharedToolkit, WidgetId, WidgetKind,
    WidgetToolkit,
};
pub use value::{EnumChoice, EnumValue, FieldKind, FieldValue, ImageSource, WidgetValue};
