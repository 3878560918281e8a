//! In-memory implementation of [`WidgetToolkit`] for testing.

use parking_lot::Mutex;
use tickscope_ui::{
    ClickCallback, DetachCallback, EditCallback, WidgetId, WidgetKind, WidgetToolkit, WidgetValue,
};

/// A recorded toolkit call (for verification in tests).
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitCall {
    Create { id: WidgetId, kind: WidgetKind },
    AddChild { parent: WidgetId, child: WidgetId },
    SetEnabled { id: WidgetId, enabled: bool },
    SetValue { id: WidgetId, value: WidgetValue },
    SetText { id: WidgetId, text: String },
    SetFill { id: WidgetId, percent: f32 },
    SetExpanded { id: WidgetId, expanded: bool },
    SetDraggable { id: WidgetId, draggable: bool },
}

struct MockWidget {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    enabled: bool,
    expanded: bool,
    draggable: bool,
    detached: bool,
    value: Option<WidgetValue>,
    text: Option<String>,
    fill: Option<f32>,
    on_edit: Option<EditCallback>,
    on_click: Option<ClickCallback>,
    on_detach: Vec<DetachCallback>,
}

impl MockWidget {
    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            enabled: true,
            expanded: true,
            draggable: false,
            detached: false,
            value: None,
            text: None,
            fill: None,
            on_edit: None,
            on_click: None,
            on_detach: Vec::new(),
        }
    }
}

/// Recording widget toolkit.
///
/// Widgets live in a flat table indexed by [`WidgetId`]. Every mutating call
/// is recorded, so tests can assert both on the current state of a widget and
/// on how often it was touched.
///
/// # Interior Mutability
///
/// [`WidgetToolkit`] methods take `&self`. State sits behind
/// `parking_lot::Mutex`; callbacks are taken out of the table and run with
/// the lock released, so they are free to call back into the toolkit.
///
/// # Example
///
/// ```rust
/// use tickscope_test_utils::MockToolkit;
/// use tickscope_ui::{WidgetKind, WidgetToolkit, WidgetValue};
///
/// let mock = MockToolkit::new();
/// let label = mock.create(WidgetKind::Label { text: "hp".into() });
/// mock.set_value(label, WidgetValue::Int(3));
///
/// assert_eq!(mock.value(label), Some(WidgetValue::Int(3)));
/// assert_eq!(mock.find_by_label("hp"), Some(label));
/// ```
#[derive(Default)]
pub struct MockToolkit {
    widgets: Mutex<Vec<MockWidget>>,
    calls: Mutex<Vec<ToolkitCall>>,
}

impl MockToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: ToolkitCall) {
        self.calls.lock().push(call);
    }

    fn with_widget<R>(&self, id: WidgetId, f: impl FnOnce(&mut MockWidget) -> R) -> Option<R> {
        let mut widgets = self.widgets.lock();
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|index| widgets.get_mut(index))
            .map(f)
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<ToolkitCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Number of `set_value` calls made for `id`.
    pub fn count_value_updates(&self, id: WidgetId) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ToolkitCall::SetValue { id: target, .. } if *target == id))
            .count()
    }

    /// Number of widgets ever created.
    pub fn widget_count(&self) -> usize {
        self.widgets.lock().len()
    }

    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.with_widget(id, |w| w.kind.clone())
    }

    pub fn value(&self, id: WidgetId) -> Option<WidgetValue> {
        self.with_widget(id, |w| w.value.clone()).flatten()
    }

    pub fn text(&self, id: WidgetId) -> Option<String> {
        self.with_widget(id, |w| w.text.clone()).flatten()
    }

    pub fn fill(&self, id: WidgetId) -> Option<f32> {
        self.with_widget(id, |w| w.fill).flatten()
    }

    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.with_widget(id, |w| w.enabled).unwrap_or(false)
    }

    pub fn is_expanded(&self, id: WidgetId) -> bool {
        self.with_widget(id, |w| w.expanded).unwrap_or(false)
    }

    pub fn is_draggable(&self, id: WidgetId) -> bool {
        self.with_widget(id, |w| w.draggable).unwrap_or(false)
    }

    pub fn is_detached(&self, id: WidgetId) -> bool {
        self.with_widget(id, |w| w.detached).unwrap_or(false)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.with_widget(id, |w| w.parent).flatten()
    }

    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.with_widget(id, |w| w.children.clone())
            .unwrap_or_default()
    }

    /// First attached widget whose label or text is `label`.
    pub fn find_by_label(&self, label: &str) -> Option<WidgetId> {
        self.widgets
            .lock()
            .iter()
            .enumerate()
            .find(|(_, w)| !w.detached && w.kind.label() == Some(label))
            .map(|(index, _)| WidgetId::from_raw(index as u64))
    }

    /// Act as if the user edited `id`. Returns `false` if nothing listens.
    pub fn simulate_edit(&self, id: WidgetId, value: WidgetValue) -> bool {
        let Some(mut callback) = self.with_widget(id, |w| w.on_edit.take()).flatten() else {
            return false;
        };
        callback(value);
        self.with_widget(id, |w| {
            if w.on_edit.is_none() {
                w.on_edit = Some(callback);
            }
        });
        true
    }

    /// Act as if the user clicked `id`. Returns `false` if nothing listens.
    pub fn simulate_click(&self, id: WidgetId) -> bool {
        let Some(mut callback) = self.with_widget(id, |w| w.on_click.take()).flatten() else {
            return false;
        };
        callback();
        self.with_widget(id, |w| {
            if w.on_click.is_none() {
                w.on_click = Some(callback);
            }
        });
        true
    }

    /// Detach `id` and its whole subtree, running every detach hook once.
    ///
    /// Hooks run parent first. Returns the number of hooks run.
    pub fn detach(&self, id: WidgetId) -> usize {
        let hooks = {
            let mut widgets = self.widgets.lock();
            let Some(root) = usize::try_from(id.as_u64())
                .ok()
                .filter(|index| *index < widgets.len())
            else {
                return 0;
            };

            if let Some(parent) = widgets[root].parent.take() {
                if let Some(siblings) = usize::try_from(parent.as_u64())
                    .ok()
                    .and_then(|index| widgets.get_mut(index))
                {
                    siblings.children.retain(|child| *child != id);
                }
            }

            let mut hooks = Vec::new();
            let mut pending = vec![root];
            while let Some(index) = pending.pop() {
                let widget = &mut widgets[index];
                if widget.detached {
                    continue;
                }
                widget.detached = true;
                hooks.append(&mut widget.on_detach);
                pending.extend(
                    widget
                        .children
                        .iter()
                        .rev()
                        .filter_map(|child| usize::try_from(child.as_u64()).ok()),
                );
            }
            hooks
        };

        let count = hooks.len();
        for hook in hooks {
            hook();
        }
        count
    }
}

impl WidgetToolkit for MockToolkit {
    fn create(&self, kind: WidgetKind) -> WidgetId {
        let id = {
            let mut widgets = self.widgets.lock();
            widgets.push(MockWidget::new(kind.clone()));
            WidgetId::from_raw((widgets.len() - 1) as u64)
        };
        self.record(ToolkitCall::Create { id, kind });
        id
    }

    fn add_child(&self, parent: WidgetId, child: WidgetId) {
        self.with_widget(parent, |w| w.children.push(child));
        self.with_widget(child, |w| w.parent = Some(parent));
        self.record(ToolkitCall::AddChild { parent, child });
    }

    fn set_enabled(&self, id: WidgetId, enabled: bool) {
        self.with_widget(id, |w| w.enabled = enabled);
        self.record(ToolkitCall::SetEnabled { id, enabled });
    }

    fn set_value(&self, id: WidgetId, value: WidgetValue) {
        self.with_widget(id, |w| w.value = Some(value.clone()));
        self.record(ToolkitCall::SetValue { id, value });
    }

    fn set_text(&self, id: WidgetId, text: &str) {
        self.with_widget(id, |w| w.text = Some(text.to_string()));
        self.record(ToolkitCall::SetText {
            id,
            text: text.to_string(),
        });
    }

    fn set_fill(&self, id: WidgetId, percent: f32) {
        self.with_widget(id, |w| w.fill = Some(percent));
        self.record(ToolkitCall::SetFill { id, percent });
    }

    fn set_expanded(&self, id: WidgetId, expanded: bool) {
        self.with_widget(id, |w| w.expanded = expanded);
        self.record(ToolkitCall::SetExpanded { id, expanded });
    }

    fn set_draggable(&self, id: WidgetId, draggable: bool) {
        self.with_widget(id, |w| w.draggable = draggable);
        self.record(ToolkitCall::SetDraggable { id, draggable });
    }

    fn on_user_edit(&self, id: WidgetId, callback: EditCallback) {
        self.with_widget(id, |w| w.on_edit = Some(callback));
    }

    fn on_click(&self, id: WidgetId, callback: ClickCallback) {
        self.with_widget(id, |w| w.on_click = Some(callback));
    }

    fn on_detach(&self, id: WidgetId, callback: DetachCallback) {
        self.with_widget(id, |w| w.on_detach.push(callback));
    }
}
