//! Date-anchored return calculations over a price series.

use crate::core::fund::PricePoint;
use crate::core::window::percent_change;
use anyhow::anyhow;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum LookbackPeriod {
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl LookbackPeriod {
    pub const ALL: [LookbackPeriod; 3] = [
        LookbackPeriod::OneWeek,
        LookbackPeriod::OneMonth,
        LookbackPeriod::ThreeMonths,
    ];

    pub fn days(&self) -> u32 {
        match self {
            LookbackPeriod::OneWeek => 7,
            LookbackPeriod::OneMonth => 30,
            LookbackPeriod::ThreeMonths => 90,
        }
    }
}

impl Display for LookbackPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LookbackPeriod::OneWeek => "1W",
                LookbackPeriod::OneMonth => "1M",
                LookbackPeriod::ThreeMonths => "3M",
            }
        )
    }
}

impl FromStr for LookbackPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1W" => Ok(LookbackPeriod::OneWeek),
            "1M" => Ok(LookbackPeriod::OneMonth),
            "3M" => Ok(LookbackPeriod::ThreeMonths),
            _ => Err(anyhow!("Invalid lookback period: {}", s)),
        }
    }
}

/// Percentage return over the trailing `lookback_days`, measured from today.
pub fn compute_return(series: &[PricePoint], lookback_days: u32) -> Option<f64> {
    compute_return_as_of(series, lookback_days, Utc::now().date_naive())
}

/// Percentage return from the first point dated strictly after
/// `today - lookback_days` to the latest point.
///
/// The anchor is located by date, not by position, since the series may
/// cover more history than the requested lookback.
pub fn compute_return_as_of(
    series: &[PricePoint],
    lookback_days: u32,
    today: NaiveDate,
) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let latest = series.last()?;

    // A cutoff before the earliest representable date precedes every point.
    let anchor_index = match today.checked_sub_signed(Duration::days(i64::from(lookback_days))) {
        Some(cutoff) => series.partition_point(|p| p.date <= cutoff),
        None => 0,
    };
    let anchor = series.get(anchor_index)?;

    percent_change(anchor.price, latest.price)
}
