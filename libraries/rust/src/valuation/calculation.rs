use super::{Error, Request};
use crate::data::DailyBar;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub open: f64,
    pub close: f64,
    /// Average of open and close, rounded to cents.
    pub avg: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Prices {
    pub receipt: PriceSummary,
    pub sale: PriceSummary,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Values {
    pub fair_market_value_per_share_on_receipt: f64,
    pub total_gift_value: f64,
    pub sale_price_per_share: f64,
    pub total_proceeds: f64,
    pub gain_or_loss: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub ticker: String,
    pub shares: f64,
    pub receipt_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub prices: Prices,
    pub values: Values,
}

impl Valuation {
    pub fn new(request: Request, receipt: DailyBar, sale: DailyBar, values: Values) -> Self {
        Valuation {
            ticker: request.ticker,
            shares: request.shares,
            receipt_date: request.receipt_date,
            sale_date: request.sale_date,
            prices: Prices {
                receipt: PriceSummary {
                    open: receipt.open,
                    close: receipt.close,
                    avg: values.fair_market_value_per_share_on_receipt,
                },
                sale: PriceSummary {
                    open: sale.open,
                    close: sale.close,
                    avg: values.sale_price_per_share,
                },
            },
            values,
        }
    }
}

/// Rounds to two decimal places, ties away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives per-share and total values from the receipt and sale day bars.
///
/// Prices and shares go through their shortest decimal representation so that
/// a displayed price of `151.005` rounds to `151.01`.
pub fn calculate(receipt: &DailyBar, sale: &DailyBar, shares: f64) -> Result<Values, Error> {
    let shares = to_decimal("shares", shares)?;

    let average_receipt = average("receipt", receipt)?;
    let average_sale = average("sale", sale)?;

    let total_gift_value = round2(multiply("total gift value", average_receipt, shares)?);
    let total_proceeds = round2(multiply("total proceeds", average_sale, shares)?);

    let gain_or_loss = total_proceeds
        .checked_sub(total_gift_value)
        .map(round2)
        .ok_or_else(|| Error::Calculation("gain or loss overflowed".to_string()))?;

    Ok(Values {
        fair_market_value_per_share_on_receipt: to_money(round2(average_receipt))?,
        total_gift_value: to_money(total_gift_value)?,
        sale_price_per_share: to_money(round2(average_sale))?,
        total_proceeds: to_money(total_proceeds)?,
        gain_or_loss: to_money(gain_or_loss)?,
    })
}

fn average(name: &str, bar: &DailyBar) -> Result<Decimal, Error> {
    let open = to_decimal(&format!("{name} open"), bar.open)?;
    let close = to_decimal(&format!("{name} close"), bar.close)?;

    open.checked_add(close)
        .and_then(|sum| sum.checked_div(Decimal::from(2)))
        .ok_or_else(|| Error::Calculation(format!("{name} average overflowed")))
}

fn multiply(name: &str, price: Decimal, shares: Decimal) -> Result<Decimal, Error> {
    price
        .checked_mul(shares)
        .ok_or_else(|| Error::Calculation(format!("{name} overflowed")))
}

fn to_decimal(name: &str, value: f64) -> Result<Decimal, Error> {
    if !value.is_finite() {
        return Err(Error::Calculation(format!("{name} is not a finite number")));
    }

    Decimal::from_str(&value.to_string())
        .map_err(|e| Error::Calculation(format!("{name} {value} is out of range: {e}")))
}

fn to_money(value: Decimal) -> Result<f64, Error> {
    value
        .to_string()
        .parse::<f64>()
        .map_err(|e| Error::Calculation(format!("{value} cannot be reported: {e}")))
}
