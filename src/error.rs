use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Configuration(String),

    #[error("database error: {0}")]
    DataAccess(#[from] sqlx::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Configuration(_) | AppError::DataAccess(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Database details never leave the process.
        let message = match self {
            AppError::DataAccess(e) => {
                tracing::error!(error = %e, "Data access failed");
                "Internal Server Error".to_string()
            }
            AppError::Configuration(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                msg.clone()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ApiResponse::<()>::error(status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let resp = err.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Configuration("bad time".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::DataAccess(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn renders_envelope_with_carried_message() {
        let body = body_of(AppError::Conflict("Already checked in today".into())).await;

        assert_eq!(body["code"], 409);
        assert_eq!(body["message"], "Already checked in today");
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn hides_database_details() {
        let body = body_of(AppError::DataAccess(sqlx::Error::PoolTimedOut)).await;

        assert_eq!(body["code"], 500);
        assert_eq!(body["message"], "Internal Server Error");
    }
}
