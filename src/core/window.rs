//! Reduction of a trailing price window into display metrics.

use crate::core::fund::PricePoint;
use serde::Serialize;

/// Metrics derived from a trailing price window. `None` means unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceWindow {
    pub latest_price: Option<f64>,
    pub daily_change: Option<f64>,
    pub period_change: Option<f64>,
}

/// Percentage change from `from` to `to`.
///
/// Unavailable when `from` is not a positive number or the result is not finite.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from.is_nan() || from <= 0.0 {
        return None;
    }
    let change = (to - from) / from * 100.0;
    change.is_finite().then_some(change)
}

/// Reduces an ascending price series to its latest price, the latest
/// daily change and the change between the first and last sample.
pub fn reduce_window(series: &[PricePoint]) -> PriceWindow {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return PriceWindow::default();
    };

    let period_change = if series.len() >= 2 {
        percent_change(first.price, last.price)
    } else {
        None
    };

    PriceWindow {
        latest_price: Some(last.price),
        daily_change: last.daily_change,
        period_change,
    }
}
