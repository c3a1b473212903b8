use super::emit_json;
use crate::core::ranking::{RankMetric, rank_by_metric, top_losers};
use crate::core::{FundDataProvider, load_snapshots};
use anyhow::Result;

/// Emits the top `top_n` funds by `metric`, or the bottom ones when `losers` is set.
pub async fn run(
    provider: &dyn FundDataProvider,
    metric: RankMetric,
    top_n: usize,
    losers: bool,
    window_days: u32,
) -> Result<()> {
    let snapshots = load_snapshots(provider, None, window_days).await?;
    let ranked = if losers {
        top_losers(&snapshots, metric, top_n)
    } else {
        rank_by_metric(&snapshots, metric, top_n)
    };
    emit_json(&ranked)
}
