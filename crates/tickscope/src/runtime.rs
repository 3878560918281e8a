//! Drives panels from the host's frame loop.

use tickscope_core::profiling::{self, profile_function};
use tickscope_core::scheduler::log_fault;
use tickscope_core::{Config, TickScheduler};
use tickscope_ui::{
    BuildContext, Panel, PanelBuilder, PanelResult, PanelSource, SharedToolkit, WidgetId,
};

/// Owns the tick scheduler and the toolkit panels render into.
///
/// Call [`tick`](Self::tick) once per host frame.
///
/// # Example
/// ```ignore
/// let mut runtime = PanelRuntime::new(toolkit);
/// let panel = runtime.mount(&player, host)?;
///
/// loop {
///     // ... host frame ...
///     runtime.tick();
/// }
/// ```
pub struct PanelRuntime {
    scheduler: TickScheduler,
    toolkit: SharedToolkit,
    frame_count: u64,
}

impl PanelRuntime {
    pub fn new(toolkit: SharedToolkit) -> Self {
        Self::with_config(toolkit, Config::default())
    }

    pub fn with_config(toolkit: SharedToolkit, config: Config) -> Self {
        profiling::apply(config.profiling);
        Self {
            scheduler: TickScheduler::with_config(config.scheduler, Box::new(log_fault)),
            toolkit,
            frame_count: 0,
        }
    }

    /// Build `source`'s panel and attach it to `host`.
    pub fn mount<S: PanelSource + ?Sized>(&mut self, source: &S, host: WidgetId) -> PanelResult<Panel> {
        let title = source.title();
        let panel = tickscope_ui::mount(source, &mut self.context(), host)?;
        tracing::info!(%title, root = panel.root().as_u64(), "Mounted panel");
        Ok(panel)
    }

    /// Build a panel into a detached window.
    pub fn build(&mut self, builder: PanelBuilder) -> PanelResult<Panel> {
        builder.build(&mut self.context())
    }

    /// Build a panel and attach its window to `host`.
    pub fn build_with(&mut self, builder: PanelBuilder, host: WidgetId) -> PanelResult<Panel> {
        builder.build_with(&mut self.context(), host)
    }

    /// Run one scheduler pass.
    pub fn tick(&mut self) {
        profiling::new_frame();
        profile_function!();
        self.scheduler.run_once();
        self.frame_count += 1;
    }

    /// Number of ticks run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Mutable access for registering custom tasks or observables.
    pub fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }

    pub fn toolkit(&self) -> &SharedToolkit {
        &self.toolkit
    }

    fn context(&mut self) -> BuildContext<'_> {
        BuildContext::new(&self.toolkit, &mut self.scheduler)
    }
}

impl std::fmt::Debug for PanelRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelRuntime")
            .field("scheduler", &self.scheduler)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}
