//! Fund metadata, price history and the data provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Static fund metadata as supplied by a [`FundDataProvider`].
///
/// Numeric fields the provider may omit are `Option`s. An absent value is
/// never the same thing as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub code: String,
    pub name: String,
    pub company: Option<String>,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub experience_years: f64,
    pub tracking_index: Option<String>,
    pub tracking_error: Option<f64>,
    pub fund_size: Option<f64>,
    pub establishment_date: Option<NaiveDate>,
    pub expense_ratio: Option<f64>,
    pub rating: Option<u8>,
    pub description: Option<String>,
}

impl FundRecord {
    /// Creates a record with only the identifying fields set.
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            company: None,
            manager: String::new(),
            experience_years: 0.0,
            tracking_index: None,
            tracking_error: None,
            fund_size: None,
            establishment_date: None,
            expense_ratio: None,
            rating: None,
            description: None,
        }
    }
}

/// A single price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    /// Percentage change relative to the prior trading day.
    pub daily_change: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64, daily_change: Option<f64>) -> Self {
        Self {
            date,
            price,
            daily_change,
        }
    }
}

/// Price observations for one fund, oldest first.
///
/// Ordering is trusted as delivered by the provider and never re-sorted.
pub type PriceSeries = Vec<PricePoint>;

#[async_trait]
pub trait FundDataProvider: Send + Sync {
    /// Lists funds, optionally filtered by a free-text search term.
    async fn list_funds(&self, search: Option<&str>) -> Result<Vec<FundRecord>>;

    /// Looks up a single fund. Returns `Ok(None)` when the code is unknown.
    async fn get_fund(&self, code: &str) -> Result<Option<FundRecord>>;

    /// Fetches the trailing `window_days` of price history in ascending date order.
    async fn get_price_history(&self, code: &str, window_days: u32) -> Result<PriceSeries>;
}
