//! Host types that describe their own panel.

use crate::builder::PanelBuilder;
use crate::error::PanelResult;
use crate::panel::{BuildContext, Panel};
use crate::toolkit::WidgetId;

/// A type that knows how to describe a panel for itself.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickscope_ui::{PanelBuilder, PanelSource};
///
/// struct Enemy {
///     health: Rc<Cell<i32>>,
/// }
///
/// impl PanelSource for Enemy {
///     fn configure(&self, builder: &mut PanelBuilder) {
///         let health = Rc::clone(&self.health);
///         builder.add_progress_bar_int("Health", 0, 100, move || health.get());
///     }
/// }
///
/// let enemy = Enemy { health: Rc::new(Cell::new(80)) };
/// assert_eq!(enemy.title(), "Enemy");
/// ```
pub trait PanelSource {
    fn configure(&self, builder: &mut PanelBuilder);

    /// Window title. Defaults to the type name without its module path.
    fn title(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }
}

/// Build `source`'s panel and attach its window to `host`.
///
/// The window is titled after [`PanelSource::title`] before `configure` runs,
/// so `configure` may still override it.
pub fn mount<S: PanelSource + ?Sized>(
    source: &S,
    ctx: &mut BuildContext<'_>,
    host: WidgetId,
) -> PanelResult<Panel> {
    let mut builder = PanelBuilder::new();
    let title = source.title();
    builder.configure_window_options(|window| window.title = title);
    source.configure(&mut builder);
    builder.build_with(ctx, host)
}

/// `a::b::Foo<c::Bar>` becomes `Foo`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stats;

    impl PanelSource for Stats {
        fn configure(&self, _builder: &mut PanelBuilder) {}
    }

    struct Titled;

    impl PanelSource for Titled {
        fn configure(&self, _builder: &mut PanelBuilder) {}

        fn title(&self) -> String {
            "Custom".into()
        }
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Foo"), "Foo");
        assert_eq!(short_type_name("a::Foo<b::Bar>"), "Foo");
        assert_eq!(short_type_name("Foo"), "Foo");
    }

    #[test]
    fn test_default_title() {
        assert_eq!(Stats.title(), "Stats");
        assert_eq!(Titled.title(), "Custom");
    }
}
