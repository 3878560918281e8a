//! Sandbox demonstrating a live debug panel.
//!
//! This example shows how to:
//! - Describe a panel with `PanelSource`
//! - Mount it through a `PanelRuntime`
//! - Watch bound widgets follow state changes across ticks
//! - Feed user edits back into the state
//!
//! Widgets are recorded by the in-memory `MockToolkit`, so nothing is drawn.
//!
//! Run with: cargo run -p tickscope --example sandbox

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tickscope::prelude::*;
use tickscope::{WidgetKind, WidgetValue};
use tickscope_test_utils::MockToolkit;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Stance {
    #[default]
    Idle,
    Walking,
    Running,
}

impl EnumValue for Stance {
    fn variants() -> &'static [Self] {
        &[Stance::Idle, Stance::Walking, Stance::Running]
    }

    fn name(&self) -> &'static str {
        match self {
            Stance::Idle => "Idle",
            Stance::Walking => "Walking",
            Stance::Running => "Running",
        }
    }
}

#[derive(Default)]
struct Player {
    name: RefCell<String>,
    health: Cell<i32>,
    speed: Cell<f32>,
    position: Cell<Vec3>,
    stance: Cell<Stance>,
    god_mode: Cell<bool>,
}

/// Wraps the shared player so the panel can hold its own handles.
struct PlayerPanel(Rc<Player>);

impl PanelSource for PlayerPanel {
    fn configure(&self, builder: &mut PanelBuilder) {
        let player = &self.0;

        let p = Rc::clone(player);
        builder.add_field("Name", move || p.name.borrow().clone());

        let (get, set) = (Rc::clone(player), Rc::clone(player));
        builder.add_progress_bar_int("Health", 0, 100, move || get.health.get());
        builder.add_button("Heal", move || set.health.set(100));

        let (get, set) = (Rc::clone(player), Rc::clone(player));
        builder
            .add_slider_mut("Speed", 0.0, 10.0, move || get.speed.get(), move |v| set.speed.set(v))
            .with_format("{value:.1} m/s");

        let (get, set) = (Rc::clone(player), Rc::clone(player));
        builder.add_enum_field_mut(
            "Stance",
            move || get.stance.get(),
            move |stance| set.stance.set(stance),
        );

        let player = Rc::clone(player);
        builder.add_group("Advanced", move |group| {
            let p = Rc::clone(&player);
            group.add_field("Position", move || p.position.get());
            let (get, set) = (Rc::clone(&player), Rc::clone(&player));
            group.add_field_mut("God mode", move || get.god_mode.get(), move |v| set.god_mode.set(v));
        });
    }
}

fn main() {
    tickscope::logging::init();

    let mock = Rc::new(MockToolkit::new());
    let toolkit: SharedToolkit = mock.clone();
    let host = mock.create(WidgetKind::Container);

    let player = Rc::new(Player {
        name: RefCell::new("Ada".to_string()),
        health: Cell::new(80),
        speed: Cell::new(2.5),
        ..Default::default()
    });

    let mut runtime = PanelRuntime::new(toolkit);
    let panel = match runtime.mount(&PlayerPanel(Rc::clone(&player)), host) {
        Ok(panel) => panel,
        Err(e) => {
            tracing::error!("Failed to mount panel: {}", e);
            return;
        }
    };

    // Progress bars carry their label in the caption, not in the widget kind.
    let Some(health) = mock
        .children(panel.root())
        .into_iter()
        .find(|id| matches!(mock.kind(*id), Some(WidgetKind::ProgressBar { .. })))
    else {
        tracing::error!("Health bar missing");
        return;
    };

    for frame in 1..=5 {
        player.health.set(player.health.get() - 15);
        player.position.set(Vec3::new(frame as f32, 0.0, 0.0));
        runtime.tick();
        tracing::info!(
            frame,
            health = ?mock.text(health),
            live = runtime.scheduler().len(),
            "Tick"
        );
    }

    if let Some(heal) = mock.find_by_label("Heal") {
        mock.simulate_click(heal);
    }
    if let Some(speed) = mock.find_by_label("Speed") {
        mock.simulate_edit(speed, WidgetValue::Float(7.25));
    }
    runtime.tick();

    tracing::info!(
        health = ?mock.text(health),
        speed = ?mock.find_by_label("Speed").and_then(|id| mock.text(id)),
        "After user input"
    );

    let released = panel.detach();
    runtime.tick();
    tracing::info!(
        released,
        live = runtime.scheduler().len(),
        frames = runtime.frame_count(),
        "Panel detached"
    );
}
