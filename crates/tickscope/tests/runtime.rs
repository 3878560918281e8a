//! PanelRuntime tests driving panels through the mock toolkit.

use std::cell::Cell;
use std::rc::Rc;

use tickscope::prelude::*;
use tickscope::{WidgetKind, WidgetValue};
use tickscope_test_utils::MockToolkit;

struct Counter {
    value: Rc<Cell<i32>>,
}

impl PanelSource for Counter {
    fn configure(&self, builder: &mut PanelBuilder) {
        let (get, set) = (Rc::clone(&self.value), Rc::clone(&self.value));
        builder
            .add_field("Value", {
                let get = Rc::clone(&get);
                move || get.get()
            })
            .add_button("Increment", move || set.set(set.get() + 1))
            .add_slider_int("Gauge", 0, 10, move || get.get());
    }
}

fn runtime() -> (Rc<MockToolkit>, PanelRuntime) {
    let mock = Rc::new(MockToolkit::new());
    let toolkit: SharedToolkit = mock.clone();
    (mock, PanelRuntime::new(toolkit))
}

#[test]
fn test_mount_and_tick() {
    let (mock, mut runtime) = runtime();
    let host = mock.create(WidgetKind::Container);
    let counter = Counter {
        value: Rc::new(Cell::new(1)),
    };

    let panel = runtime.mount(&counter, host).unwrap();
    assert_eq!(mock.text(panel.root()).as_deref(), Some("Counter"));
    assert_eq!(runtime.scheduler().len(), 2);

    let value = mock.find_by_label("Value").unwrap();
    let gauge = mock.find_by_label("Gauge").unwrap();
    mock.simulate_click(mock.find_by_label("Increment").unwrap());
    runtime.tick();

    assert_eq!(mock.value(value), Some(WidgetValue::Int(2)));
    assert_eq!(mock.fill(gauge), Some(20.0));
    assert_eq!(runtime.frame_count(), 1);

    assert_eq!(panel.detach(), 2);
    runtime.tick();
    assert!(runtime.scheduler().is_empty());
    assert_eq!(runtime.frame_count(), 2);
}

#[test]
fn test_builder_panels_share_scheduler() {
    let (mock, mut runtime) = runtime();
    let shared = Rc::new(Cell::new(0.0f32));

    let panels: Vec<_> = (0..3)
        .map(|i| {
            let get = Rc::clone(&shared);
            let mut builder = PanelBuilder::new();
            builder.add_progress_bar(format!("Bar {i}"), 0.0, 1.0, move || get.get());
            runtime.build(builder).unwrap()
        })
        .collect();
    assert_eq!(runtime.scheduler().len(), 3);

    shared.set(1.0);
    runtime.tick();
    for panel in &panels {
        let bar = mock.children(panel.root())[0];
        assert_eq!(mock.fill(bar), Some(100.0));
    }

    drop(panels);
    runtime.tick();
    assert!(runtime.scheduler().is_empty());
    assert_eq!(runtime.scheduler().stats().passes, 2);
}

#[test]
fn test_custom_tasks_run_alongside_panels() {
    let (_mock, mut runtime) = runtime();
    let ticks = Rc::new(Cell::new(0));
    let count = Rc::clone(&ticks);
    runtime
        .scheduler_mut()
        .register(move || -> FaultResult<TickStatus> {
            count.set(count.get() + 1);
            Ok(TickStatus::Continue)
        });

    for _ in 0..4 {
        runtime.tick();
    }
    assert_eq!(ticks.get(), 4);
}

#[test]
fn test_with_config_honours_scheduler_settings() {
    let mock = Rc::new(MockToolkit::new());
    let toolkit: SharedToolkit = mock.clone();
    let config = Config {
        scheduler: SchedulerConfig {
            initial_capacity: 2,
            retire_unobserved: false,
        },
        ..Default::default()
    };
    let mut runtime = PanelRuntime::with_config(toolkit, config);
    assert_eq!(runtime.scheduler().capacity(), 2);

    let mut builder = PanelBuilder::new();
    builder.add_field("n", || 1i32);
    let panel = runtime.build(builder).unwrap();
    assert_eq!(panel.detach(), 1);

    // Without eager retirement the observable idles instead of retiring.
    runtime.tick();
    assert_eq!(runtime.scheduler().len(), 1);
}
