use super::Error;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SHARES_MESSAGE: &str = "shares must be a positive number.";

/// Largest share count whose totals stay within decimal range.
const MAX_SHARES: f64 = 1e15;

const MAX_SHARES_MESSAGE: &str = "shares must be at most 1000000000000000.";

/// Raw valuation request body as submitted by the form.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub ticker: Option<String>,
    pub receipt_date: Option<String>,
    pub sale_date: Option<String>,
    /// Either a JSON number or a numeric string.
    pub shares: Option<Value>,
}

/// A validated valuation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub ticker: String,
    pub receipt_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub shares: f64,
}

impl TryFrom<Payload> for Request {
    type Error = Error;

    fn try_from(payload: Payload) -> Result<Self, Self::Error> {
        let ticker = parse_ticker(payload.ticker)?;
        let receipt_date = parse_date("receiptDate", payload.receipt_date)?;
        let sale_date = parse_date("saleDate", payload.sale_date)?;
        let shares = parse_shares(payload.shares)?;

        Ok(Request {
            ticker,
            receipt_date,
            sale_date,
            shares,
        })
    }
}

fn parse_ticker(ticker: Option<String>) -> Result<String, Error> {
    match ticker.as_deref().map(str::trim) {
        Some(ticker) if !ticker.is_empty() => Ok(ticker.to_uppercase()),
        _ => Err(Error::InvalidInput("ticker is required.".to_string())),
    }
}

fn parse_date(field: &str, value: Option<String>) -> Result<NaiveDate, Error> {
    let value = match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => return Err(Error::InvalidInput(format!("{field} is required."))),
    };

    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| {
        Error::InvalidInput(format!(
            "{field} must be a date in YYYY-MM-DD format, got {value:?}."
        ))
    })
}

fn parse_shares(value: Option<Value>) -> Result<f64, Error> {
    let shares = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match shares {
        Some(shares) if shares.is_finite() && shares > MAX_SHARES => {
            Err(Error::InvalidInput(MAX_SHARES_MESSAGE.to_string()))
        }
        Some(shares) if shares.is_finite() && shares > 0.0 => Ok(shares),
        _ => Err(Error::InvalidInput(SHARES_MESSAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(shares: Value) -> Payload {
        serde_json::from_value(json!({
            "ticker": "AAPL",
            "receiptDate": "2024-01-02",
            "saleDate": "2024-06-03",
            "shares": shares,
        }))
        .unwrap()
    }

    fn invalid_input_message(payload: Payload) -> String {
        match Request::try_from(payload) {
            Err(Error::InvalidInput(message)) => message,
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_try_from_payload() {
        let request = Request::try_from(payload(json!(100))).unwrap();

        assert_eq!(
            request,
            Request {
                ticker: "AAPL".to_string(),
                receipt_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                sale_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                shares: 100.0,
            }
        );
    }

    #[test]
    fn test_ticker_is_normalized() {
        let mut payload = payload(json!(1));
        payload.ticker = Some("  brk.b ".to_string());

        let request = Request::try_from(payload).unwrap();

        assert_eq!(request.ticker, "BRK.B");
    }

    #[test]
    fn test_shares_accepts_numeric_strings() {
        let request = Request::try_from(payload(json!(" 12.5 "))).unwrap();
        assert_eq!(request.shares, 12.5);

        let request = Request::try_from(payload(json!("0.0001"))).unwrap();
        assert_eq!(request.shares, 0.0001);
    }

    #[test]
    fn test_shares_rejects_invalid_values() {
        for shares in [
            Value::Null,
            json!(0),
            json!(-5),
            json!("abc"),
            json!(""),
            json!("0"),
            json!("inf"),
            json!("NaN"),
            json!(true),
            json!([100]),
        ] {
            assert_eq!(
                invalid_input_message(payload(shares)),
                "shares must be a positive number."
            );
        }
    }

    #[test]
    fn test_shares_rejects_unrepresentable_counts() {
        let request = Request::try_from(payload(json!(1e15))).unwrap();
        assert_eq!(request.shares, 1e15);

        for shares in [json!(1e28), json!("1e29"), json!(f64::MAX)] {
            assert_eq!(
                invalid_input_message(payload(shares)),
                "shares must be at most 1000000000000000."
            );
        }
    }

    #[test]
    fn test_missing_fields() {
        let mut missing_ticker = payload(json!(1));
        missing_ticker.ticker = Some("   ".to_string());
        assert_eq!(invalid_input_message(missing_ticker), "ticker is required.");

        let mut missing_receipt_date = payload(json!(1));
        missing_receipt_date.receipt_date = None;
        assert_eq!(
            invalid_input_message(missing_receipt_date),
            "receiptDate is required."
        );

        let mut missing_sale_date = payload(json!(1));
        missing_sale_date.sale_date = Some(String::new());
        assert_eq!(
            invalid_input_message(missing_sale_date),
            "saleDate is required."
        );

        assert_eq!(
            invalid_input_message(Payload::default()),
            "ticker is required."
        );
    }

    #[test]
    fn test_malformed_dates() {
        for date in ["01/02/2024", "2024-13-01", "2024-02-30", "yesterday"] {
            let mut payload = payload(json!(1));
            payload.receipt_date = Some(date.to_string());

            let message = invalid_input_message(payload);

            assert!(message.starts_with("receiptDate must be a date in YYYY-MM-DD format"));
        }
    }
}
