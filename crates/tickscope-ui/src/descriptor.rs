//! Inert widget descriptions and how each one is realized.

use std::rc::Rc;

use tickscope_core::{DisposeBag, Observable};

use crate::builder::PanelBuilder;
use crate::error::{PanelError, PanelResult};
use crate::format::{self, GaugeValue};
use crate::panel::BuildContext;
use crate::toolkit::{ClickCallback, WidgetId, WidgetKind};
use crate::value::{FieldKind, ImageSource, WidgetValue};

pub(crate) type Getter<T> = Box<dyn Fn() -> T>;
pub(crate) type Setter<T> = Box<dyn FnMut(T)>;

/// Where a bound widget reads its value from.
pub(crate) enum Source<T> {
    Getter(Getter<T>),
    /// Already read once and registered with the scheduler.
    Observed(Observable<T>),
}

impl<T: Clone + PartialEq + 'static> Source<T> {
    fn into_observable(self, ctx: &mut BuildContext<'_>, label: &str) -> PanelResult<Observable<T>> {
        match self {
            Source::Observed(observable) => Ok(observable),
            Source::Getter(getter) => {
                Observable::from_fn(ctx.scheduler(), getter).map_err(|fault| PanelError::InitialRead {
                    label: label.to_string(),
                    fault,
                })
            }
        }
    }

    fn observe(self, ctx: &mut BuildContext<'_>, label: &str) -> PanelResult<Self> {
        self.into_observable(ctx, label).map(Source::Observed)
    }
}

/// A slider or progress bar over a numeric range.
pub(crate) struct Gauge<T> {
    pub label: String,
    pub low: f32,
    pub high: f32,
    pub format: String,
    pub source: Source<T>,
    pub setter: Option<Setter<T>>,
}

/// A value field, already erased to [`WidgetValue`].
pub(crate) struct Field {
    pub label: String,
    pub kind: FieldKind,
    pub source: Source<WidgetValue>,
    pub setter: Option<Setter<WidgetValue>>,
}

pub(crate) struct EnumField {
    pub label: String,
    pub options: Vec<String>,
    pub source: Source<WidgetValue>,
    pub setter: Option<Setter<WidgetValue>>,
}

pub(crate) enum Descriptor {
    Space { height: f32 },
    Label { text: String },
    Button { text: String, action: ClickCallback },
    Slider(Gauge<f32>),
    SliderInt(Gauge<i32>),
    ProgressBar(Gauge<f32>),
    ProgressBarInt(Gauge<i32>),
    ScalarField(Field),
    CompositeField(Field),
    EnumField(EnumField),
    StaticImage { label: String, source: ImageSource },
    DynamicImage { label: String, source: Source<ImageSource> },
    Group { label: String, builder: PanelBuilder },
}

impl Descriptor {
    /// Override the caption format. Returns `false` if this kind has none.
    pub fn set_format(&mut self, pattern: String) -> bool {
        match self {
            Descriptor::Slider(gauge) | Descriptor::ProgressBar(gauge) => gauge.format = pattern,
            Descriptor::SliderInt(gauge) | Descriptor::ProgressBarInt(gauge) => {
                gauge.format = pattern
            }
            _ => return false,
        }
        true
    }

    /// Check everything that can be checked without reading any value.
    pub fn validate(&self) -> PanelResult<()> {
        match self {
            Descriptor::Slider(gauge) | Descriptor::ProgressBar(gauge) => gauge.validate(),
            Descriptor::SliderInt(gauge) | Descriptor::ProgressBarInt(gauge) => gauge.validate(),
            Descriptor::Group { builder, .. } => builder.validate(),
            _ => Ok(()),
        }
    }

    /// Perform every initial read this descriptor needs, groups included.
    ///
    /// No widget is created here, so a failing read leaves the toolkit
    /// untouched.
    pub fn observe(self, ctx: &mut BuildContext<'_>) -> PanelResult<Self> {
        Ok(match self {
            Descriptor::Slider(gauge) => Descriptor::Slider(gauge.observe(ctx)?),
            Descriptor::SliderInt(gauge) => Descriptor::SliderInt(gauge.observe(ctx)?),
            Descriptor::ProgressBar(gauge) => Descriptor::ProgressBar(gauge.observe(ctx)?),
            Descriptor::ProgressBarInt(gauge) => Descriptor::ProgressBarInt(gauge.observe(ctx)?),
            Descriptor::ScalarField(field) => Descriptor::ScalarField(field.observe(ctx)?),
            Descriptor::CompositeField(field) => Descriptor::CompositeField(field.observe(ctx)?),
            Descriptor::EnumField(field) => {
                let source = field.source.observe(ctx, &field.label)?;
                Descriptor::EnumField(EnumField { source, ..field })
            }
            Descriptor::DynamicImage { label, source } => {
                let source = source.observe(ctx, &label)?;
                Descriptor::DynamicImage { label, source }
            }
            Descriptor::Group { label, builder } => Descriptor::Group {
                label,
                builder: builder.observe(ctx)?,
            },
            other => other,
        })
    }

    /// Create the widget under `parent` and bind it.
    ///
    /// Every subscription made for the widget goes into `bag`.
    pub fn realize(
        self,
        ctx: &mut BuildContext<'_>,
        parent: WidgetId,
        bag: &mut DisposeBag,
    ) -> PanelResult<()> {
        let toolkit = Rc::clone(ctx.toolkit());
        match self {
            Descriptor::Space { height } => {
                let id = toolkit.create(WidgetKind::Space { height });
                toolkit.add_child(parent, id);
            }
            Descriptor::Label { text } => {
                let id = toolkit.create(WidgetKind::Label { text });
                toolkit.add_child(parent, id);
            }
            Descriptor::Button { text, action } => {
                let id = toolkit.create(WidgetKind::Button { text });
                toolkit.on_click(id, action);
                toolkit.add_child(parent, id);
            }
            Descriptor::Slider(gauge) => realize_slider(gauge, ctx, parent, bag)?,
            Descriptor::SliderInt(gauge) => realize_slider(gauge, ctx, parent, bag)?,
            Descriptor::ProgressBar(gauge) => realize_progress_bar(gauge, ctx, parent, bag)?,
            Descriptor::ProgressBarInt(gauge) => realize_progress_bar(gauge, ctx, parent, bag)?,
            Descriptor::ScalarField(field) | Descriptor::CompositeField(field) => {
                let id = toolkit.create(WidgetKind::Field {
                    label: field.label.clone(),
                    kind: field.kind,
                });
                realize_editable(ctx, id, field.label, field.source, field.setter, bag)?;
                toolkit.add_child(parent, id);
            }
            Descriptor::EnumField(field) => {
                let id = toolkit.create(WidgetKind::EnumField {
                    label: field.label.clone(),
                    options: field.options,
                });
                realize_editable(ctx, id, field.label, field.source, field.setter, bag)?;
                toolkit.add_child(parent, id);
            }
            Descriptor::StaticImage { label, source } => {
                let id = toolkit.create(WidgetKind::Image { label });
                toolkit.set_value(id, WidgetValue::Image(source));
                toolkit.add_child(parent, id);
            }
            Descriptor::DynamicImage { label, source } => {
                let id = toolkit.create(WidgetKind::Image {
                    label: label.clone(),
                });
                let push_to = Rc::clone(&toolkit);
                bind(ctx, &label, source, bag, move |source: &ImageSource| {
                    push_to.set_value(id, WidgetValue::Image(source.clone()))
                })?;
                toolkit.add_child(parent, id);
            }
            Descriptor::Group { label, builder } => {
                let foldout = toolkit.create(WidgetKind::Foldout { label });
                toolkit.set_expanded(foldout, false);
                let content = toolkit.create(WidgetKind::Container);
                toolkit.add_child(foldout, content);

                let mut group_bag = DisposeBag::new();
                builder.realize_into(ctx, content, &mut group_bag)?;

                // Detaching the foldout alone releases the group's bindings.
                let group_bag = group_bag.shared();
                let hook = Rc::clone(&group_bag);
                toolkit.on_detach(
                    foldout,
                    Box::new(move || {
                        if let Ok(mut bag) = hook.try_borrow_mut() {
                            bag.dispose();
                        }
                    }),
                );
                bag.add_bag(group_bag);
                toolkit.add_child(parent, foldout);
            }
        }
        Ok(())
    }
}

impl<T: GaugeValue + Default> Gauge<T> {
    fn validate(&self) -> PanelResult<()> {
        format::check_range(&self.label, self.low, self.high)?;
        format::check_format::<T>(&self.format)
    }
}

impl<T: GaugeValue> Gauge<T> {
    fn observe(self, ctx: &mut BuildContext<'_>) -> PanelResult<Self> {
        let source = self.source.observe(ctx, &self.label)?;
        Ok(Gauge { source, ..self })
    }
}

impl Field {
    fn observe(self, ctx: &mut BuildContext<'_>) -> PanelResult<Self> {
        let source = self.source.observe(ctx, &self.label)?;
        Ok(Field { source, ..self })
    }
}

/// Push the initial value of `source` and every later change through `push`.
fn bind<T, F>(
    ctx: &mut BuildContext<'_>,
    label: &str,
    source: Source<T>,
    bag: &mut DisposeBag,
    push: F,
) -> PanelResult<()>
where
    T: Clone + PartialEq + 'static,
    F: Fn(&T) + 'static,
{
    let observable = source.into_observable(ctx, label)?;
    push(&observable.value());
    bag.add(observable.subscribe(move |value| push(value)));
    Ok(())
}

fn realize_editable(
    ctx: &mut BuildContext<'_>,
    id: WidgetId,
    label: String,
    source: Source<WidgetValue>,
    setter: Option<Setter<WidgetValue>>,
    bag: &mut DisposeBag,
) -> PanelResult<()> {
    let toolkit = Rc::clone(ctx.toolkit());
    toolkit.set_enabled(id, setter.is_some());

    let push_to = Rc::clone(&toolkit);
    bind(ctx, &label, source, bag, move |value: &WidgetValue| {
        push_to.set_value(id, value.clone())
    })?;

    if let Some(setter) = setter {
        toolkit.on_user_edit(id, setter);
    }
    Ok(())
}

fn realize_slider<T: GaugeValue>(
    gauge: Gauge<T>,
    ctx: &mut BuildContext<'_>,
    parent: WidgetId,
    bag: &mut DisposeBag,
) -> PanelResult<()> {
    let toolkit = Rc::clone(ctx.toolkit());
    let Gauge {
        label,
        low,
        high,
        format,
        source,
        setter,
    } = gauge;

    let id = toolkit.create(WidgetKind::Slider {
        label: label.clone(),
        low,
        high,
        whole_numbers: T::WHOLE_NUMBERS,
    });
    toolkit.set_enabled(id, setter.is_some());

    let edit_pattern = format.clone();
    let push_to = Rc::clone(&toolkit);
    bind(ctx, &label, source, bag, move |value: &T| {
        push_to.set_value(id, value.to_widget_value());
        push_to.set_fill(id, format::fill_percent(value.to_f32(), low, high));
        push_to.set_text(id, &value.caption(&format));
    })?;

    if let Some(mut setter) = setter {
        // Weak: the toolkit owns this callback.
        let edited = Rc::downgrade(&toolkit);
        toolkit.on_user_edit(
            id,
            Box::new(move |value| match T::from_widget_value(&value) {
                Some(value) => {
                    // The thumb already moved; keep fill and caption with it.
                    if let Some(edited) = edited.upgrade() {
                        edited.set_fill(id, format::fill_percent(value.to_f32(), low, high));
                        edited.set_text(id, &value.caption(&edit_pattern));
                    }
                    setter(value)
                }
                None => tracing::warn!(?value, "Ignoring slider edit of the wrong type"),
            }),
        );
    }
    toolkit.add_child(parent, id);
    Ok(())
}

fn realize_progress_bar<T: GaugeValue>(
    gauge: Gauge<T>,
    ctx: &mut BuildContext<'_>,
    parent: WidgetId,
    bag: &mut DisposeBag,
) -> PanelResult<()> {
    let toolkit = Rc::clone(ctx.toolkit());
    let Gauge {
        label,
        low,
        high,
        format,
        source,
        ..
    } = gauge;

    let id = toolkit.create(WidgetKind::ProgressBar { low, high });

    let push_to = Rc::clone(&toolkit);
    let title = label.clone();
    bind(ctx, &label, source, bag, move |value: &T| {
        push_to.set_value(id, value.to_widget_value());
        push_to.set_fill(id, format::fill_percent(value.to_f32(), low, high));
        push_to.set_text(id, &format!("{} {}", title, value.caption(&format)));
    })?;

    toolkit.add_child(parent, id);
    Ok(())
}
