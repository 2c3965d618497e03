pub mod calculation;
pub mod request;
pub mod service;

pub use calculation::{calculate, round2, PriceSummary, Prices, Valuation, Values};
pub use request::{Payload, Request};
pub use service::Service;

use crate::data::Error as DataError;
use chrono::NaiveDate;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),
    #[error("No trading data for {ticker} on {date} (possible weekend or holiday).")]
    NoTradingData { ticker: String, date: NaiveDate },
    #[error("{0}")]
    GatewayFailure(String),
    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl From<DataError> for Error {
    fn from(error: DataError) -> Self {
        match error {
            DataError::NoTradingData { ticker, date } => Error::NoTradingData { ticker, date },
            other => Error::GatewayFailure(other.to_string()),
        }
    }
}
