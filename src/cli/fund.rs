use super::emit_json;
use crate::core::format::{TrackingErrorGrade, format_change, format_price};
use crate::core::returns::compute_return_as_of;
use crate::core::{
    FundDataProvider, FundRecord, LookbackPeriod, PricePoint, PriceSeries, PriceWindow,
    reduce_window,
};
use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDetail {
    pub fund: FundRecord,
    pub tracking_error_grade: Option<TrackingErrorGrade>,
    pub latest: Option<PricePoint>,
    pub window: PriceWindow,
    pub returns: BTreeMap<String, Option<f64>>,
    pub prices: PriceSeries,
}

impl FundDetail {
    pub fn new(fund: FundRecord, prices: PriceSeries, today: NaiveDate) -> Self {
        let returns = LookbackPeriod::ALL
            .iter()
            .map(|period| {
                (
                    period.to_string(),
                    compute_return_as_of(&prices, period.days(), today),
                )
            })
            .collect();

        Self {
            tracking_error_grade: fund
                .tracking_error
                .map(TrackingErrorGrade::from_tracking_error),
            latest: prices.last().cloned(),
            window: reduce_window(&prices),
            returns,
            prices,
            fund,
        }
    }
}

/// Emits a single fund with its price history and lookback returns.
///
/// An unavailable price history still produces the detail with every
/// derived value unavailable.
pub async fn run(provider: &dyn FundDataProvider, code: &str, window_days: u32) -> Result<()> {
    let fund = provider
        .get_fund(code)
        .await?
        .ok_or_else(|| anyhow!("Fund with code {} not found", code))?;

    let prices = match provider.get_price_history(code, window_days).await {
        Ok(prices) => prices,
        Err(e) => {
            warn!(code = %code, error = %e, "Price history unavailable");
            PriceSeries::new()
        }
    };

    let detail = FundDetail::new(fund, prices, Utc::now().date_naive());
    info!(
        "{}: latest {} ({} today, {} over window)",
        code,
        format_price(detail.window.latest_price),
        format_change(detail.window.daily_change),
        format_change(detail.window.period_change)
    );
    emit_json(&detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_fund_detail_returns_by_lookback() {
        let mut fund = FundRecord::new("510300", "CSI 300 ETF");
        fund.tracking_error = Some(1.4);
        let prices = vec![
            PricePoint::new(date(1, 15), 50.0, None),
            PricePoint::new(date(3, 5), 80.0, Some(1.0)),
            PricePoint::new(date(3, 10), 100.0, Some(2.0)),
        ];

        let detail = FundDetail::new(fund, prices, date(3, 10));

        assert_eq!(detail.tracking_error_grade, Some(TrackingErrorGrade::Moderate));
        assert_eq!(detail.latest.as_ref().map(|p| p.price), Some(100.0));
        assert_eq!(detail.window.period_change, Some(100.0));
        assert_eq!(detail.returns["1W"], Some(25.0));
        assert_eq!(detail.returns["1M"], Some(25.0));
        assert_eq!(detail.returns["3M"], Some(100.0));
    }

    #[test]
    fn test_fund_detail_without_prices() {
        let detail = FundDetail::new(FundRecord::new("1", "One"), Vec::new(), date(3, 10));
        assert!(detail.latest.is_none());
        assert!(detail.tracking_error_grade.is_none());
        assert_eq!(detail.window, PriceWindow::default());
        assert!(detail.returns.values().all(Option::is_none));
        assert_eq!(detail.returns.len(), 3);
    }
}
