use super::emit_json;
use crate::core::format::format_scale;
use crate::core::{
    FundDataProvider, FundSnapshot, Leaderboard, PortfolioSummary, aggregate_portfolio,
    load_snapshots,
};
use anyhow::Result;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub window_days: u32,
    pub portfolio: PortfolioSummary,
    pub leaderboard: Leaderboard<'a>,
    pub funds: &'a [FundSnapshot],
}

impl<'a> DashboardView<'a> {
    pub fn new(snapshots: &'a [FundSnapshot], window_days: u32, top_n: usize) -> Self {
        Self {
            window_days,
            portfolio: aggregate_portfolio(snapshots),
            leaderboard: Leaderboard::new(snapshots, top_n),
            funds: snapshots,
        }
    }
}

/// Runs one aggregation pass and emits the dashboard.
pub async fn run(
    provider: &dyn FundDataProvider,
    search: Option<&str>,
    window_days: u32,
    top_n: usize,
) -> Result<()> {
    let snapshots = load_snapshots(provider, search, window_days).await?;
    let view = DashboardView::new(&snapshots, window_days, top_n);
    info!(
        "Dashboard ready: {} funds, total scale {}",
        view.portfolio.fund_count,
        format_scale(Some(view.portfolio.total_scale))
    );
    emit_json(&view)
}

/// Emits the snapshots of all funds matching `search`.
pub async fn list(
    provider: &dyn FundDataProvider,
    search: Option<&str>,
    window_days: u32,
) -> Result<()> {
    let snapshots = load_snapshots(provider, search, window_days).await?;
    emit_json(&snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FundRecord;
    use crate::core::snapshot::unpriced_snapshot;

    #[test]
    fn test_dashboard_view_serialization() {
        let mut record = FundRecord::new("510300", "CSI 300 ETF");
        record.company = Some("Huatai".to_string());
        record.fund_size = Some(12.0);
        let mut priced = unpriced_snapshot(record);
        priced.daily_change = Some(1.5);
        let snapshots = vec![priced, unpriced_snapshot(FundRecord::new("159915", "ChiNext"))];

        let view = DashboardView::new(&snapshots, 30, 5);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["windowDays"], 30);
        assert_eq!(json["portfolio"]["fundCount"], 2);
        assert_eq!(json["portfolio"]["totalScale"], 12.0);
        assert!(json["portfolio"]["avgTrackingError"].is_null());
        assert_eq!(json["portfolio"]["companyDistribution"][0]["company"], "Huatai");
        assert_eq!(json["leaderboard"]["dailyGainers"][0]["code"], "510300");
        assert_eq!(json["leaderboard"]["dailyGainers"].as_array().unwrap().len(), 1);
        assert!(json["funds"][1]["latestPrice"].is_null());
    }
}
