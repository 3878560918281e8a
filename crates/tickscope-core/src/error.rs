use std::any::Any;

/// A failure raised while ticking a scheduled task or reading an accessor.
///
/// Faults are cloned once per subscriber when an observable retires, so the
/// payload is kept to owned strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The accessor reported an error.
    Accessor(String),

    /// The observed target was dropped.
    TargetDropped,

    /// The accessor or task panicked.
    Panicked(String),

    /// A scheduled task reported an error.
    Task(String),
}

impl Fault {
    /// Build an accessor fault from any message.
    pub fn accessor(message: impl Into<String>) -> Self {
        Fault::Accessor(message.into())
    }

    /// Build a task fault from any message.
    pub fn task(message: impl Into<String>) -> Self {
        Fault::Task(message.into())
    }

    /// Convert a panic payload captured by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Fault::Panicked(message)
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fault::Accessor(msg) => write!(f, "Accessor failed: {}", msg),
            Fault::TargetDropped => write!(f, "Observed target was dropped"),
            Fault::Panicked(msg) => write!(f, "Panicked: {}", msg),
            Fault::Task(msg) => write!(f, "Task failed: {}", msg),
        }
    }
}

impl std::error::Error for Fault {}

/// Result type for accessors and tasks.
pub type FaultResult<T> = Result<T, Fault>;
