//! Test utilities for tickscope.
//!
//! This crate provides [`MockToolkit`], a recording implementation of
//! [`tickscope_ui::WidgetToolkit`] that keeps every widget in memory. Use it to
//! build panels in tests and demos without a real UI system, then inspect
//! what the panel did or simulate user input.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tickscope_core::TickScheduler;
//! use tickscope_test_utils::MockToolkit;
//! use tickscope_ui::{BuildContext, PanelBuilder, SharedToolkit};
//!
//! let mock = Rc::new(MockToolkit::new());
//! let toolkit: SharedToolkit = mock.clone();
//! let mut scheduler = TickScheduler::default();
//!
//! let mut builder = PanelBuilder::new();
//! builder.add_slider("Volume", 0.0, 10.0, || 7.5);
//! let panel = builder
//!     .build(&mut BuildContext::new(&toolkit, &mut scheduler))
//!     .unwrap();
//!
//! let slider = mock.find_by_label("Volume").unwrap();
//! assert_eq!(mock.fill(slider), Some(75.0));
//! assert_eq!(mock.text(slider).as_deref(), Some("7.50"));
//! # drop(panel);
//! ```

mod mock_toolkit;

pub use mock_toolkit::{MockToolkit, ToolkitCall};
