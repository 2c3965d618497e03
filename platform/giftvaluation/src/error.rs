use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use stockgift::valuation::Error as ValuationError;
use thiserror::Error as ThisError;

const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected server error.";

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidBody(_) | Error::Valuation(ValuationError::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            Error::Valuation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Error::Valuation(ValuationError::Calculation(_)) => UNEXPECTED_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
