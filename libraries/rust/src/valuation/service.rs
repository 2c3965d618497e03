use super::{calculate, Error, Payload, Request, Valuation};
use crate::data::Interface;
use std::sync::Arc;
use tracing::{info, warn};

/// Values a stock gift against daily bars from a market data gateway.
#[derive(Clone)]
pub struct Service {
    gateway: Arc<dyn Interface>,
}

impl Service {
    pub fn new(gateway: Arc<dyn Interface>) -> Self {
        Service { gateway }
    }

    /// Validates the payload, then values it. Invalid payloads never reach the gateway.
    pub async fn value(&self, payload: Payload) -> Result<Valuation, Error> {
        let request = Request::try_from(payload)?;

        self.value_request(request).await
    }

    pub async fn value_request(&self, request: Request) -> Result<Valuation, Error> {
        info!(
            "Valuing {} shares of {} received {} and sold {}",
            request.shares, request.ticker, request.receipt_date, request.sale_date
        );

        let bars = futures::try_join!(
            self.gateway
                .fetch_daily_bar(request.ticker.clone(), request.receipt_date),
            self.gateway
                .fetch_daily_bar(request.ticker.clone(), request.sale_date),
        );

        let (receipt, sale) = match bars {
            Ok(bars) => bars,
            Err(e) => {
                warn!("Failed to fetch daily bars for {}: {}", request.ticker, e);
                return Err(e.into());
            }
        };

        let values = calculate(&receipt, &sale, request.shares)?;

        Ok(Valuation::new(request, receipt, sale, values))
    }
}
