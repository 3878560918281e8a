use tickscope_core::Fault;

/// Errors raised while building a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelError {
    /// A format pattern could not render a value.
    InvalidFormat { pattern: String, reason: String },

    /// A slider or progress bar range is not finite or has `low > high`.
    InvalidRange { label: String, low: f32, high: f32 },

    /// The first read of a bound value failed.
    InitialRead { label: String, fault: Fault },
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::InvalidFormat { pattern, reason } => {
                write!(f, "Invalid format pattern '{}': {}", pattern, reason)
            }
            PanelError::InvalidRange { label, low, high } => {
                write!(f, "Invalid range for '{}': {}..{}", label, low, high)
            }
            PanelError::InitialRead { label, fault } => {
                write!(f, "Failed to read initial value of '{}': {}", label, fault)
            }
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::InitialRead { fault, .. } => Some(fault),
            _ => None,
        }
    }
}

/// Result type for panel construction.
pub type PanelResult<T> = Result<T, PanelError>;
