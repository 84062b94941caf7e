use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::error::StoreError;

pub mod attendance;
pub mod stats;
pub mod worker;

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            StoreError::Storage(e) => {
                error!(error = %e, "Storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

/// `?date=YYYY-MM-DD`, today when omitted.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

/// Body of check-in and check-out requests.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    #[schema(example = 1)]
    pub worker_id: i64,
    /// Defaults to the current time.
    #[schema(example = "09:00:00", value_type = Option<String>)]
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbsentRequest {
    #[schema(example = 1)]
    pub worker_id: i64,
    #[schema(example = "2024-01-15", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}
