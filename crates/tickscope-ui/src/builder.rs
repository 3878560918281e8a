//! Declarative builder API for describing panels.

use std::rc::Rc;

use tickscope_core::DisposeBag;
use tickscope_core::profiling::profile_function;

use crate::descriptor::{Descriptor, EnumField, Field, Gauge, Getter, Setter, Source};
use crate::error::PanelResult;
use crate::format::{
    GaugeValue, PROGRESS_FORMAT, PROGRESS_INT_FORMAT, SLIDER_FORMAT, SLIDER_INT_FORMAT,
};
use crate::options::{OptionSet, WindowOptions};
use crate::panel::{BuildContext, Panel};
use crate::toolkit::{WidgetId, WidgetKind};
use crate::value::{EnumValue, FieldValue, ImageSource, WidgetValue};

/// Ordered list of widget descriptions plus typed option records.
///
/// Widgets appear in the order they were added. Nothing touches the toolkit
/// or reads any value until [`build`](Self::build).
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickscope_ui::PanelBuilder;
///
/// let speed = Rc::new(Cell::new(2.5f32));
/// let (get, set) = (Rc::clone(&speed), Rc::clone(&speed));
///
/// let mut builder = PanelBuilder::new();
/// builder
///     .configure_window_options(|window| window.title = "Player".into())
///     .add_label("Movement")
///     .add_slider_mut("Speed", 0.0, 10.0, move || get.get(), move |v| set.set(v))
///     .with_format("{value:.1} m/s");
///
/// assert_eq!(builder.len(), 2);
/// ```
#[derive(Default)]
pub struct PanelBuilder {
    descriptors: Vec<Descriptor>,
    options: OptionSet,
}

impl std::fmt::Debug for PanelBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelBuilder")
            .field("descriptors", &self.descriptors.len())
            .field("options", &self.options)
            .finish()
    }
}

impl PanelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, descriptor: Descriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Add vertical space.
    pub fn add_space(&mut self, height: f32) -> &mut Self {
        self.push(Descriptor::Space { height })
    }

    /// Add static text.
    pub fn add_label(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Descriptor::Label { text: text.into() })
    }

    /// Add a button that runs `action` when clicked.
    pub fn add_button(&mut self, text: impl Into<String>, action: impl FnMut() + 'static) -> &mut Self {
        self.push(Descriptor::Button {
            text: text.into(),
            action: Box::new(action),
        })
    }

    /// Add a read-only value field.
    pub fn add_field<T: FieldValue>(
        &mut self,
        label: impl Into<String>,
        getter: impl Fn() -> T + 'static,
    ) -> &mut Self {
        self.push_field::<T>(label.into(), Box::new(move || getter().to_widget_value()), None)
    }

    /// Add an editable value field.
    pub fn add_field_mut<T: FieldValue>(
        &mut self,
        label: impl Into<String>,
        getter: impl Fn() -> T + 'static,
        mut setter: impl FnMut(T) + 'static,
    ) -> &mut Self {
        let label = label.into();
        let field = label.clone();
        let setter: Setter<WidgetValue> = Box::new(move |value| match T::from_widget_value(&value) {
            Some(value) => setter(value),
            None => tracing::warn!(field = %field, ?value, "Ignoring edit of the wrong type"),
        });
        self.push_field::<T>(
            label,
            Box::new(move || getter().to_widget_value()),
            Some(setter),
        )
    }

    fn push_field<T: FieldValue>(
        &mut self,
        label: String,
        getter: Getter<WidgetValue>,
        setter: Option<Setter<WidgetValue>>,
    ) -> &mut Self {
        let field = Field {
            label,
            kind: T::KIND,
            source: Source::Getter(getter),
            setter,
        };
        if T::KIND.is_composite() {
            self.push(Descriptor::CompositeField(field))
        } else {
            self.push(Descriptor::ScalarField(field))
        }
    }

    /// Add a read-only enum picker.
    pub fn add_enum_field<E: EnumValue>(
        &mut self,
        label: impl Into<String>,
        getter: impl Fn() -> E + 'static,
    ) -> &mut Self {
        self.push(Descriptor::EnumField(EnumField {
            label: label.into(),
            options: E::option_names(),
            source: Source::Getter(Box::new(move || WidgetValue::Enum(getter().choice()))),
            setter: None,
        }))
    }

    /// Add an editable enum picker.
    pub fn add_enum_field_mut<E: EnumValue>(
        &mut self,
        label: impl Into<String>,
        getter: impl Fn() -> E + 'static,
        mut setter: impl FnMut(E) + 'static,
    ) -> &mut Self {
        let setter: Setter<WidgetValue> = Box::new(move |value| {
            let picked = match &value {
                WidgetValue::Enum(choice) => choice.index.and_then(|i| E::variants().get(i)),
                _ => None,
            };
            match picked {
                Some(variant) => setter(variant.clone()),
                None => tracing::warn!(?value, "Ignoring enum edit without a known variant"),
            }
        });
        self.push(Descriptor::EnumField(EnumField {
            label: label.into(),
            options: E::option_names(),
            source: Source::Getter(Box::new(move || WidgetValue::Enum(getter().choice()))),
            setter: Some(setter),
        }))
    }

    /// Add a read-only float slider over `low..=high`.
    pub fn add_slider(
        &mut self,
        label: impl Into<String>,
        low: f32,
        high: f32,
        getter: impl Fn() -> f32 + 'static,
    ) -> &mut Self {
        let gauge = gauge(label.into(), low, high, SLIDER_FORMAT, Box::new(getter), None);
        self.push(Descriptor::Slider(gauge))
    }

    /// Add an editable float slider over `low..=high`.
    pub fn add_slider_mut(
        &mut self,
        label: impl Into<String>,
        low: f32,
        high: f32,
        getter: impl Fn() -> f32 + 'static,
        setter: impl FnMut(f32) + 'static,
    ) -> &mut Self {
        let gauge = gauge(
            label.into(),
            low,
            high,
            SLIDER_FORMAT,
            Box::new(getter),
            Some(Box::new(setter)),
        );
        self.push(Descriptor::Slider(gauge))
    }

    /// Add a read-only integer slider over `low..=high`.
    pub fn add_slider_int(
        &mut self,
        label: impl Into<String>,
        low: i32,
        high: i32,
        getter: impl Fn() -> i32 + 'static,
    ) -> &mut Self {
        let gauge = gauge(
            label.into(),
            low as f32,
            high as f32,
            SLIDER_INT_FORMAT,
            Box::new(getter),
            None,
        );
        self.push(Descriptor::SliderInt(gauge))
    }

    /// Add an editable integer slider over `low..=high`.
    pub fn add_slider_int_mut(
        &mut self,
        label: impl Into<String>,
        low: i32,
        high: i32,
        getter: impl Fn() -> i32 + 'static,
        setter: impl FnMut(i32) + 'static,
    ) -> &mut Self {
        let gauge = gauge(
            label.into(),
            low as f32,
            high as f32,
            SLIDER_INT_FORMAT,
            Box::new(getter),
            Some(Box::new(setter)),
        );
        self.push(Descriptor::SliderInt(gauge))
    }

    /// Add a float progress bar. The caption is the label followed by the
    /// formatted value.
    pub fn add_progress_bar(
        &mut self,
        label: impl Into<String>,
        low: f32,
        high: f32,
        getter: impl Fn() -> f32 + 'static,
    ) -> &mut Self {
        let gauge = gauge(label.into(), low, high, PROGRESS_FORMAT, Box::new(getter), None);
        self.push(Descriptor::ProgressBar(gauge))
    }

    /// Add an integer progress bar.
    pub fn add_progress_bar_int(
        &mut self,
        label: impl Into<String>,
        low: i32,
        high: i32,
        getter: impl Fn() -> i32 + 'static,
    ) -> &mut Self {
        let gauge = gauge(
            label.into(),
            low as f32,
            high as f32,
            PROGRESS_INT_FORMAT,
            Box::new(getter),
            None,
        );
        self.push(Descriptor::ProgressBarInt(gauge))
    }

    /// Add an image that never changes.
    pub fn add_image(&mut self, label: impl Into<String>, source: ImageSource) -> &mut Self {
        self.push(Descriptor::StaticImage {
            label: label.into(),
            source,
        })
    }

    /// Add an image that follows `getter`.
    pub fn add_dynamic_image(
        &mut self,
        label: impl Into<String>,
        getter: impl Fn() -> ImageSource + 'static,
    ) -> &mut Self {
        self.push(Descriptor::DynamicImage {
            label: label.into(),
            source: Source::Getter(Box::new(getter)),
        })
    }

    /// Add a collapsible group. `configure` fills the nested builder right away.
    ///
    /// Option records set on the nested builder are ignored.
    pub fn add_group(
        &mut self,
        label: impl Into<String>,
        configure: impl FnOnce(&mut PanelBuilder),
    ) -> &mut Self {
        let mut builder = PanelBuilder::new();
        configure(&mut builder);
        self.push(Descriptor::Group {
            label: label.into(),
            builder,
        })
    }

    /// Override the caption format of the last added slider or progress bar.
    ///
    /// Patterns use a named `value` placeholder, e.g. `"{value:.1} m/s"`.
    pub fn with_format(&mut self, pattern: impl Into<String>) -> &mut Self {
        let pattern = pattern.into();
        let applied = self
            .descriptors
            .last_mut()
            .is_some_and(|last| last.set_format(pattern.clone()));
        if !applied {
            tracing::warn!(%pattern, "Format ignored: last widget is not a slider or progress bar");
        }
        self
    }

    /// Apply `configure` to the option record of type `K`, creating its
    /// default first if missing.
    pub fn configure_options<K: Default + 'static>(
        &mut self,
        configure: impl FnOnce(&mut K),
    ) -> &mut Self {
        configure(self.options.get_or_default::<K>());
        self
    }

    pub fn configure_window_options(&mut self, configure: impl FnOnce(&mut WindowOptions)) -> &mut Self {
        self.configure_options(configure)
    }

    pub fn options<K: 'static>(&self) -> Option<&K> {
        self.options.get::<K>()
    }

    /// Number of top-level widgets described.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Realize the panel into a new window.
    ///
    /// Formats, ranges and every initial read are checked before any widget
    /// is created. A failing read aborts the build and the values observed so
    /// far leave the scheduler on its next pass.
    pub fn build(self, ctx: &mut BuildContext<'_>) -> PanelResult<Panel> {
        profile_function!();
        self.validate()?;
        let builder = self.observe(ctx)?;

        let toolkit = Rc::clone(ctx.toolkit());
        let window = toolkit.create(WidgetKind::Window);
        if let Some(options) = builder.options.get::<WindowOptions>() {
            toolkit.set_text(window, &options.title);
            toolkit.set_draggable(window, options.draggable);
        }

        let widgets = builder.descriptors.len();
        let mut bag = DisposeBag::new();
        builder.realize_into(ctx, window, &mut bag)?;

        let disposables = bag.shared();
        let sweep = Rc::clone(&disposables);
        toolkit.on_detach(
            window,
            Box::new(move || {
                if let Ok(mut bag) = sweep.try_borrow_mut() {
                    bag.dispose();
                }
            }),
        );

        tracing::debug!(
            widgets,
            bindings = disposables.borrow().len(),
            "Built panel"
        );
        Ok(Panel::new(window, disposables))
    }

    /// Realize the panel and attach its window to `host`.
    pub fn build_with(self, ctx: &mut BuildContext<'_>, host: WidgetId) -> PanelResult<Panel> {
        let panel = self.build(ctx)?;
        ctx.toolkit().add_child(host, panel.root());
        Ok(panel)
    }

    pub(crate) fn validate(&self) -> PanelResult<()> {
        self.descriptors.iter().try_for_each(Descriptor::validate)
    }

    pub(crate) fn observe(self, ctx: &mut BuildContext<'_>) -> PanelResult<Self> {
        let descriptors = self
            .descriptors
            .into_iter()
            .map(|descriptor| descriptor.observe(ctx))
            .collect::<PanelResult<Vec<_>>>()?;
        Ok(Self {
            descriptors,
            options: self.options,
        })
    }

    pub(crate) fn realize_into(
        self,
        ctx: &mut BuildContext<'_>,
        parent: WidgetId,
        bag: &mut DisposeBag,
    ) -> PanelResult<()> {
        for descriptor in self.descriptors {
            descriptor.realize(ctx, parent, bag)?;
        }
        Ok(())
    }
}

fn gauge<T: GaugeValue>(
    label: String,
    low: f32,
    high: f32,
    format: &str,
    getter: Getter<T>,
    setter: Option<Setter<T>>,
) -> Gauge<T> {
    Gauge {
        label,
        low,
        high,
        format: format.to_string(),
        source: Source::Getter(getter),
        setter,
    }
}
