use super::util::{RetryPolicy, with_retry};
use crate::core::config::ProviderConfig;
use crate::core::{FundDataProvider, FundRecord, PricePoint, PriceSeries};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

const MAX_WINDOW_DAYS: u32 = 365;

/// Fund data provider backed by the fund tracker REST API.
pub struct FundApiProvider {
    base_url: String,
    page_limit: u32,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl FundApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fundtrack/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_limit: config.page_limit,
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&raw, params).with_context(|| format!("Invalid API URL: {raw}"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("Requesting {}", url);
        let response = with_retry(
            || async {
                self.client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()
            },
            self.retry,
        )
        .await
        .with_context(|| format!("Request failed: {url}"))?;

        parse_body(response, &url).await
    }
}

async fn parse_body<T: DeserializeOwned>(response: reqwest::Response, url: &Url) -> Result<T> {
    let response_text = response
        .text()
        .await
        .with_context(|| format!("Failed to get response text: {url}"))?;

    if response_text.trim().is_empty() {
        return Err(anyhow!("Received empty response: {}", url));
    }

    serde_json::from_str(&response_text).map_err(|e| {
        error!(error = ?e, response = %response_text, "Failed to parse API response");
        anyhow!("Failed to parse API response from {url}: {e}")
    })
}

/// Accepts plain dates and ISO datetimes, keeping only the calendar date.
fn parse_api_date(date_str: &str) -> Result<NaiveDate> {
    let day = date_str.get(..10).unwrap_or(date_str);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {date_str}"))
}

#[derive(Debug, Deserialize)]
struct ApiFund {
    code: String,
    name: String,
    company: Option<String>,
    manager: Option<String>,
    experience_years: Option<f64>,
    tracking_index: Option<String>,
    tracking_error: Option<f64>,
    fund_size: Option<f64>,
    establishment_date: Option<String>,
    expense_ratio: Option<f64>,
    rating: Option<u8>,
    description: Option<String>,
}

impl From<ApiFund> for FundRecord {
    fn from(fund: ApiFund) -> Self {
        let establishment_date = fund.establishment_date.as_deref().and_then(|d| {
            parse_api_date(d)
                .map_err(|e| debug!("Ignoring establishment date for {}: {}", fund.code, e))
                .ok()
        });
        FundRecord {
            establishment_date,
            code: fund.code,
            name: fund.name,
            company: fund.company.filter(|c| !c.trim().is_empty()),
            manager: fund.manager.unwrap_or_default(),
            experience_years: fund.experience_years.unwrap_or_default(),
            tracking_index: fund.tracking_index,
            tracking_error: fund.tracking_error,
            fund_size: fund.fund_size,
            expense_ratio: fund.expense_ratio,
            rating: fund.rating,
            description: fund.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiPrice {
    date: String,
    price: f64,
    daily_change: Option<f64>,
}

#[async_trait]
impl FundDataProvider for FundApiProvider {
    async fn list_funds(&self, search: Option<&str>) -> Result<Vec<FundRecord>> {
        let mut params = vec![
            ("skip", "0".to_string()),
            ("limit", self.page_limit.to_string()),
        ];
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            params.push(("search", term.to_string()));
        }
        let url = self.url("/api/funds", &params)?;

        let funds: Vec<ApiFund> = self.get_json(url).await.context("Failed to load fund list")?;
        debug!("Fetched {} funds", funds.len());
        Ok(funds.into_iter().map(FundRecord::from).collect())
    }

    async fn get_fund(&self, code: &str) -> Result<Option<FundRecord>> {
        let url = self.url(&format!("/api/funds/code/{code}"), &[])?;
        debug!("Requesting {}", url);

        let response = with_retry(|| async { self.client.get(url.clone()).send().await }, self.retry)
            .await
            .with_context(|| format!("Failed to send request for fund: {code}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Fund {} not found", code);
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .with_context(|| format!("Failed to load fund: {code}"))?;

        let fund: ApiFund = parse_body(response, &url).await?;
        Ok(Some(fund.into()))
    }

    async fn get_price_history(&self, code: &str, window_days: u32) -> Result<PriceSeries> {
        let days = window_days.clamp(1, MAX_WINDOW_DAYS);
        let url = self.url(
            &format!("/api/funds/{code}/prices"),
            &[("days", days.to_string())],
        )?;

        let prices: Vec<ApiPrice> = self
            .get_json(url)
            .await
            .with_context(|| format!("Failed to load price history for fund: {code}"))?;

        let series = prices
            .into_iter()
            .filter_map(|p| match parse_api_date(&p.date) {
                Ok(date) => Some(PricePoint::new(date, p.price, p.daily_change)),
                Err(e) => {
                    debug!("Skipping price point for {}: {}", code, e);
                    None
                }
            })
            .collect();
        Ok(series)
    }
}
