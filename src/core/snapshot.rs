//! Builds denormalized fund snapshots from metadata and price history.
use crate::core::format::format_change;
use crate::core::fund::{FundDataProvider, FundRecord, PriceSeries};
use crate::core::window::{PriceWindow, reduce_window};
use anyhow::{Context, Result};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A fund's metadata merged with metrics reduced from its recent prices.
///
/// Snapshots are rebuilt on every pass and carry no identity beyond the
/// fund code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSnapshot {
    #[serde(flatten)]
    pub fund: FundRecord,
    pub latest_price: Option<f64>,
    pub daily_change: Option<f64>,
    pub period_change: Option<f64>,
}

impl FundSnapshot {
    pub fn code(&self) -> &str {
        &self.fund.code
    }

    pub fn window(&self) -> PriceWindow {
        PriceWindow {
            latest_price: self.latest_price,
            daily_change: self.daily_change,
            period_change: self.period_change,
        }
    }
}

/// Merges a fund record with its reduced price window.
pub fn build_snapshot(fund: FundRecord, series: &PriceSeries) -> FundSnapshot {
    let window = reduce_window(series);
    FundSnapshot {
        fund,
        latest_price: window.latest_price,
        daily_change: window.daily_change,
        period_change: window.period_change,
    }
}

/// A snapshot whose price-derived fields are all unavailable.
pub fn unpriced_snapshot(fund: FundRecord) -> FundSnapshot {
    FundSnapshot {
        fund,
        latest_price: None,
        daily_change: None,
        period_change: None,
    }
}

/// Builds one snapshot per fund, fetching every price window concurrently.
///
/// A failed fetch degrades only that fund's snapshot; the output always has
/// one entry per input record, in input order.
pub async fn build_snapshots(
    provider: &dyn FundDataProvider,
    funds: Vec<FundRecord>,
    window_days: u32,
) -> Vec<FundSnapshot> {
    let futures = funds.into_iter().map(|fund| async move {
        let history = provider.get_price_history(&fund.code, window_days).await;
        match history {
            Ok(series) => {
                if series.is_empty() {
                    debug!("No price data for {} in the last {window_days} days", fund.code);
                }
                let snapshot = build_snapshot(fund, &series);
                debug!(
                    "{}: {} today, {} over {window_days} days",
                    snapshot.code(),
                    format_change(snapshot.daily_change),
                    format_change(snapshot.period_change)
                );
                snapshot
            }
            Err(e) => {
                warn!(code = %fund.code, error = %e, "Price fetch failed, snapshot has no price data");
                unpriced_snapshot(fund)
            }
        }
    });

    join_all(futures).await
}

/// Lists funds and builds their snapshots in a single aggregation pass.
///
/// Failing to list funds fails the whole pass; no partial result is returned.
pub async fn load_snapshots(
    provider: &dyn FundDataProvider,
    search: Option<&str>,
    window_days: u32,
) -> Result<Vec<FundSnapshot>> {
    let funds = provider
        .list_funds(search)
        .await
        .context("Failed to list funds")?;
    info!("Building snapshots for {} funds", funds.len());

    Ok(build_snapshots(provider, funds, window_days).await)
}
