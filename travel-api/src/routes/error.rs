use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::TravelError;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<TravelError> for ApiError {
    fn from(err: TravelError) -> Self {
        match err {
            TravelError::NotFound(_) => Self::not_found(err.to_string()),
            TravelError::MissingReference(..)
            | TravelError::DuplicateExpenseTypeName
            | TravelError::InvalidDateRange
            | TravelError::Validation(_)
            | TravelError::InvalidReportType(_)
            | TravelError::InvalidDataType(_) => Self::bad_request(err.to_string()),
            TravelError::Report(message) => {
                tracing::error!("Report generation failed: {}", message);
                Self::internal("report generation failed")
            }
            TravelError::Storage(_) => Self::internal("storage operation failed"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let not_found = ApiError::from(TravelError::NotFound(Entity::Expense));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Expense not found");

        let duplicate = ApiError::from(TravelError::DuplicateExpenseTypeName);
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

        let storage = ApiError::from(TravelError::storage("disk I/O error"));
        assert_eq!(storage.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.message, "storage operation failed");
    }
}
