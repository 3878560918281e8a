/// Configuration for a tickscope runtime.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub scheduler: SchedulerConfig,
    pub profiling: ProfilingMode,
}

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Number of task slots allocated up front. Storage doubles when full.
    pub initial_capacity: usize,
    /// Retire an observable on its next tick once its last subscriber is
    /// released, instead of leaving it scheduled with nobody listening.
    pub retire_unobserved: bool,
}

impl SchedulerConfig {
    pub const DEFAULT_CAPACITY: usize = 16;
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            initial_capacity: Self::DEFAULT_CAPACITY,
            retire_unobserved: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Scopes are recorded and can be read through the global profiler
    On,
    /// Scopes are recorded and served to 'puffin_viewer' over HTTP
    WithWebserver,
}
