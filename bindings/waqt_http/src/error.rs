use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use waqt_core::WaqtError;

/// Error body returned by every route: `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl From<WaqtError> for ApiError {
    fn from(err: WaqtError) -> Self {
        match err {
            WaqtError::InvalidCountryCode { .. } | WaqtError::InvalidInput { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            WaqtError::DatasetNotFound { .. }
            | WaqtError::DateNotFound { .. }
            | WaqtError::CityListNotFound { .. } => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("failed to encode response: {}", err))
    }
}

/// `200 OK` with a JSON body; an encoding failure becomes a 500 with the
/// usual error body.
pub fn json_ok<T: Serialize>(body: &T) -> Result<HttpResponse, ApiError> {
    let encoded = serde_json::to_string(body)?;
    Ok(HttpResponse::Ok().content_type(ContentType::json()).body(encoded))
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
