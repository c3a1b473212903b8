//! Display helpers shared by every consumer of the engine output.
use serde::Serialize;

/// Placeholder shown for unavailable values.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingErrorGrade {
    Low,
    Moderate,
    High,
}

impl TrackingErrorGrade {
    pub fn from_tracking_error(tracking_error: f64) -> Self {
        if tracking_error <= 1.0 {
            TrackingErrorGrade::Low
        } else if tracking_error <= 2.0 {
            TrackingErrorGrade::Moderate
        } else {
            TrackingErrorGrade::High
        }
    }
}

/// Formats an optional value, falling back to [`PLACEHOLDER`].
pub fn format_optional<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), format_fn)
}

/// Signed percentage with two decimals, e.g. `+1.23%`.
pub fn format_change(change: Option<f64>) -> String {
    format_optional(change, |c| format!("{c:+.2}%"))
}

/// Unit price with four decimals.
pub fn format_price(price: Option<f64>) -> String {
    format_optional(price, |p| format!("{p:.4}"))
}

/// Fund scale with two decimals.
pub fn format_scale(scale: Option<f64>) -> String {
    format_optional(scale, |s| format!("{s:.2}"))
}
