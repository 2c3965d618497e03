use crate::error::Error;
use actix_web::{post, web, HttpResponse};
use log::{error, info};
use stockgift::valuation::{Error as ValuationError, Payload, Service};

#[post("/api/gift-valuation")]
pub async fn handler(body: web::Bytes, service: web::Data<Service>) -> Result<HttpResponse, Error> {
    let payload: Payload = serde_json::from_slice(&body).map_err(|e| {
        info!("Rejected valuation request body: {}", e);
        Error::from(e)
    })?;

    match service.value(payload).await {
        Ok(valuation) => Ok(HttpResponse::Ok().json(valuation)),
        Err(ValuationError::InvalidInput(message)) => {
            info!("Rejected valuation request: {}", message);
            Err(ValuationError::InvalidInput(message).into())
        }
        Err(e) => {
            error!("Failed to value gift: {:?}", e);
            Err(e.into())
        }
    }
}
