use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use reqwest::Client as HTTPClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error as ThisError;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.massive.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("No trading data for {ticker} on {date} (possible weekend or holiday).")]
    NoTradingData { ticker: String, date: NaiveDate },
    #[error("Market data request timed out")]
    Timeout,
    #[error("Market data request failed with status: {0}")]
    StatusError(u16),
    #[error("HTTP error: {0}")]
    HTTPError(reqwest::Error),
    #[error("URL error: {0}")]
    URLError(#[from] url::ParseError),
    #[error("Other error: {0}")]
    OtherError(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Error::Timeout;
        }

        // the request url carries the api key
        Error::HTTPError(error.without_url())
    }
}

/// Opening and closing trade price of one ticker on one calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub open: f64,
    pub close: f64,
}

#[derive(Deserialize, Debug)]
struct AggregateBar {
    #[serde(rename = "o")]
    open_price: Option<f64>,
    #[serde(rename = "c")]
    close_price: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct AggregatesResponse {
    results: Option<Vec<AggregateBar>>,
}

#[automock]
#[async_trait]
pub trait Interface: Send + Sync {
    async fn fetch_daily_bar(&self, ticker: String, date: NaiveDate) -> Result<DailyBar, Error>;
}

#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    api_key: String,
    http_client: HTTPClient,
}

impl Client {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::OtherError(
                "Market data API key must not be empty".to_string(),
            ));
        }

        let base_url = Url::parse(base_url)?;

        if base_url.cannot_be_a_base() {
            return Err(Error::OtherError(format!(
                "Market data base URL is not a base: {base_url}"
            )));
        }

        let http_client = HTTPClient::builder().timeout(timeout).build()?;

        Ok(Client {
            base_url,
            api_key,
            http_client,
        })
    }

    fn aggregates_url(&self, ticker: &str, date: NaiveDate) -> Result<Url, Error> {
        let date = date.format("%Y-%m-%d").to_string();

        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| Error::OtherError(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend([
                "v2",
                "aggs",
                "ticker",
                ticker,
                "range",
                "1",
                "day",
                date.as_str(),
                date.as_str(),
            ]);

        Ok(url)
    }
}

#[async_trait]
impl Interface for Client {
    async fn fetch_daily_bar(&self, ticker: String, date: NaiveDate) -> Result<DailyBar, Error> {
        let url = self.aggregates_url(&ticker, date)?;

        debug!("Fetching daily bar for {} on {}", ticker, date);

        let response = self
            .http_client
            .get(url)
            .header("accept", "application/json")
            .query(&[("adjusted", "true"), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Market data request for {} on {} failed with status: {}",
                ticker,
                date,
                response.status()
            );
            return Err(Error::StatusError(response.status().as_u16()));
        }

        let aggregates: AggregatesResponse = response.json().await?;

        let bar = match aggregates
            .results
            .and_then(|results| results.into_iter().next())
        {
            Some(bar) => bar,
            None => return Err(Error::NoTradingData { ticker, date }),
        };

        match (bar.open_price, bar.close_price) {
            (Some(open), Some(close)) => Ok(DailyBar { open, close }),
            _ => Err(Error::OtherError(format!(
                "Daily bar for {ticker} on {date} is missing an open or close price"
            ))),
        }
    }
}
