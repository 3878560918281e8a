//! Captions and fill levels for sliders and progress bars.
//!
//! Captions use `strfmt` patterns with a single named `value` placeholder,
//! e.g. `"{value:.2}"` or `"[{value}]"`.

use std::collections::HashMap;

use strfmt::strfmt;

use crate::error::{PanelError, PanelResult};
use crate::value::WidgetValue;

/// Default caption of a float slider.
pub const SLIDER_FORMAT: &str = "{value:.2}";
/// Default caption of an integer slider.
pub const SLIDER_INT_FORMAT: &str = "{value}";
/// Default caption of a float progress bar.
pub const PROGRESS_FORMAT: &str = "[{value:.2}]";
/// Default caption of an integer progress bar.
pub const PROGRESS_INT_FORMAT: &str = "[{value}]";

/// Filled proportion of `low..=high` in percent, clamped to `0..=100`.
///
/// An empty range is reported as 0.
///
/// ```
/// use tickscope_ui::format::fill_percent;
///
/// assert_eq!(fill_percent(7.5, 0.0, 10.0), 75.0);
/// assert_eq!(fill_percent(-3.0, 0.0, 10.0), 0.0);
/// assert_eq!(fill_percent(4.0, 4.0, 4.0), 0.0);
/// ```
pub fn fill_percent(value: f32, low: f32, high: f32) -> f32 {
    if low == high {
        return 0.0;
    }
    ((value - low) / (high - low)).clamp(0.0, 1.0) * 100.0
}

/// Check that `low..=high` is a usable range.
pub(crate) fn check_range(label: &str, low: f32, high: f32) -> PanelResult<()> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(PanelError::InvalidRange {
            label: label.to_string(),
            low,
            high,
        })
    }
}

/// A number shown on a slider or progress bar.
pub(crate) trait GaugeValue: Copy + PartialEq + 'static {
    const WHOLE_NUMBERS: bool;

    fn to_f32(self) -> f32;

    fn to_widget_value(self) -> WidgetValue;

    fn from_widget_value(value: &WidgetValue) -> Option<Self>;

    fn format(self, pattern: &str) -> Result<String, strfmt::FmtError>;

    /// Render the caption, falling back to plain `Display` if the pattern
    /// rejects this particular value.
    fn caption(self, pattern: &str) -> String;
}

impl GaugeValue for f32 {
    const WHOLE_NUMBERS: bool = false;

    fn to_f32(self) -> f32 {
        self
    }

    fn to_widget_value(self) -> WidgetValue {
        WidgetValue::Float(f64::from(self))
    }

    fn from_widget_value(value: &WidgetValue) -> Option<Self> {
        value.as_float().map(|v| v as f32)
    }

    fn format(self, pattern: &str) -> Result<String, strfmt::FmtError> {
        let mut vars = HashMap::new();
        vars.insert("value".to_string(), f64::from(self));
        strfmt(pattern, &vars)
    }

    fn caption(self, pattern: &str) -> String {
        self.format(pattern).unwrap_or_else(|_| self.to_string())
    }
}

impl GaugeValue for i32 {
    const WHOLE_NUMBERS: bool = true;

    fn to_f32(self) -> f32 {
        self as f32
    }

    fn to_widget_value(self) -> WidgetValue {
        WidgetValue::Int(i64::from(self))
    }

    fn from_widget_value(value: &WidgetValue) -> Option<Self> {
        match value {
            WidgetValue::Int(v) => i32::try_from(*v).ok(),
            // Toolkits without integer sliders report floats.
            WidgetValue::Float(v) => Some(v.round() as i32),
            _ => None,
        }
    }

    fn format(self, pattern: &str) -> Result<String, strfmt::FmtError> {
        let mut vars = HashMap::new();
        vars.insert("value".to_string(), i64::from(self));
        strfmt(pattern, &vars)
    }

    fn caption(self, pattern: &str) -> String {
        self.format(pattern).unwrap_or_else(|_| self.to_string())
    }
}

/// Check that `pattern` can render a `T`.
pub(crate) fn check_format<T: GaugeValue + Default>(pattern: &str) -> PanelResult<()> {
    T::default()
        .format(pattern)
        .map(|_| ())
        .map_err(|e| PanelError::InvalidFormat {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}
