//! The widget toolkit capability panels render into.
//!
//! Tickscope does not draw anything itself. A host hands it a
//! [`WidgetToolkit`] that creates and updates widgets in whatever UI system
//! the host uses; panels only ever talk to widgets through [`WidgetId`]s.

use std::rc::Rc;

use crate::value::{FieldKind, WidgetValue};

/// Identifier of a widget created by a toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Creation parameters for a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Space { height: f32 },
    Label { text: String },
    Button { text: String },
    Slider {
        label: String,
        low: f32,
        high: f32,
        whole_numbers: bool,
    },
    ProgressBar { low: f32, high: f32 },
    Field { label: String, kind: FieldKind },
    EnumField { label: String, options: Vec<String> },
    Image { label: String },
    Foldout { label: String },
    Container,
    Window,
}

impl WidgetKind {
    /// The label shown next to the widget, if it has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            WidgetKind::Label { text } | WidgetKind::Button { text } => Some(text),
            WidgetKind::Slider { label, .. }
            | WidgetKind::Field { label, .. }
            | WidgetKind::EnumField { label, .. }
            | WidgetKind::Image { label }
            | WidgetKind::Foldout { label } => Some(label),
            WidgetKind::Space { .. }
            | WidgetKind::ProgressBar { .. }
            | WidgetKind::Container
            | WidgetKind::Window => None,
        }
    }
}

/// Called with the new value when the user edits a widget.
pub type EditCallback = Box<dyn FnMut(WidgetValue)>;

/// Called when the user clicks a button.
pub type ClickCallback = Box<dyn FnMut()>;

/// Called once when a widget or one of its ancestors is detached.
pub type DetachCallback = Box<dyn FnOnce()>;

/// A widget system panels can be realized into.
///
/// All methods take `&self`; implementations keep their state behind
/// interior mutability so one toolkit can be shared by every binding.
/// Implementations must not call back into panel code while holding their
/// own locks: edit, click and detach callbacks may call the toolkit again.
pub trait WidgetToolkit {
    fn create(&self, kind: WidgetKind) -> WidgetId;

    fn add_child(&self, parent: WidgetId, child: WidgetId);

    fn set_enabled(&self, id: WidgetId, enabled: bool);

    /// Set the displayed value.
    fn set_value(&self, id: WidgetId, value: WidgetValue);

    /// Set display text: label contents, window titles, slider captions.
    fn set_text(&self, id: WidgetId, text: &str);

    /// Set the filled proportion of a slider or progress bar, in percent.
    fn set_fill(&self, id: WidgetId, percent: f32);

    fn set_expanded(&self, id: WidgetId, expanded: bool);

    fn set_draggable(&self, id: WidgetId, draggable: bool);

    fn on_user_edit(&self, id: WidgetId, callback: EditCallback);

    fn on_click(&self, id: WidgetId, callback: ClickCallback);

    fn on_detach(&self, id: WidgetId, callback: DetachCallback);
}

/// A toolkit shared between a panel and its bindings.
pub type SharedToolkit = Rc<dyn WidgetToolkit>;
