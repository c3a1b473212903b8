//! Leaderboards over fund snapshots.
use crate::core::snapshot::FundSnapshot;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankMetric {
    DailyChange,
    PeriodChange,
}

impl RankMetric {
    pub fn value(&self, snapshot: &FundSnapshot) -> Option<f64> {
        let value = match self {
            RankMetric::DailyChange => snapshot.daily_change,
            RankMetric::PeriodChange => snapshot.period_change,
        };
        value.filter(|v| v.is_finite())
    }
}

impl Display for RankMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RankMetric::DailyChange => "daily",
                RankMetric::PeriodChange => "period",
            }
        )
    }
}

impl FromStr for RankMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "daily-change" | "dailychange" => Ok(RankMetric::DailyChange),
            "period" | "period-change" | "periodchange" => Ok(RankMetric::PeriodChange),
            _ => Err(anyhow!("Invalid rank metric: {}", s)),
        }
    }
}

/// Every snapshot that has `metric`, best first.
///
/// The sort is stable, so equal values keep their input order.
fn sorted_by_metric(snapshots: &[FundSnapshot], metric: RankMetric) -> Vec<&FundSnapshot> {
    let mut ranked: Vec<(f64, &FundSnapshot)> = snapshots
        .iter()
        .filter_map(|s| metric.value(s).map(|v| (v, s)))
        .collect();
    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.into_iter().map(|(_, s)| s).collect()
}

/// The `top_n` best performers by `metric`, best first.
///
/// Snapshots without the metric are left out rather than padded, so fewer
/// than `top_n` may come back.
pub fn rank_by_metric(
    snapshots: &[FundSnapshot],
    metric: RankMetric,
    top_n: usize,
) -> Vec<&FundSnapshot> {
    let mut ranked = sorted_by_metric(snapshots, metric);
    ranked.truncate(top_n);
    ranked
}

/// The `n` worst performers by `metric`, worst first.
pub fn top_losers(snapshots: &[FundSnapshot], metric: RankMetric, n: usize) -> Vec<&FundSnapshot> {
    let ranked = sorted_by_metric(snapshots, metric);
    let start = ranked.len().saturating_sub(n);
    ranked[start..].iter().rev().copied().collect()
}

/// Dashboard leaderboards computed in one pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard<'a> {
    pub daily_gainers: Vec<&'a FundSnapshot>,
    pub daily_losers: Vec<&'a FundSnapshot>,
    pub period_performers: Vec<&'a FundSnapshot>,
}

impl<'a> Leaderboard<'a> {
    pub fn new(snapshots: &'a [FundSnapshot], n: usize) -> Self {
        Self {
            daily_gainers: rank_by_metric(snapshots, RankMetric::DailyChange, n),
            daily_losers: top_losers(snapshots, RankMetric::DailyChange, n),
            period_performers: rank_by_metric(snapshots, RankMetric::PeriodChange, n),
        }
    }
}
