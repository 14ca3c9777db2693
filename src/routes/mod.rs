use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, ResponseError};
use serde_json::json;

use crate::services::ServiceError;

pub mod articles;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    MalformedBody(String),
    #[error("{0}")]
    BodyTooLarge(String),
    #[error("Article not found")]
    ArticleNotFound,
    #[error(transparent)]
    ServiceError(#[from] ServiceError),
}

impl ApiError {
    pub fn malformed(error: impl std::fmt::Display) -> Self {
        ApiError::MalformedBody(error.to_string())
    }

    /// Error of a request body extractor. Oversized bodies keep their 413 status.
    pub fn unreadable_body(error: impl Into<actix_web::Error>) -> Self {
        let error = error.into();
        if error.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge(error.to_string())
        } else {
            ApiError::malformed(error)
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::ServiceError(ServiceError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ArticleNotFound | ApiError::ServiceError(ServiceError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::ServiceError(ServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::MalformedBody(reason) | ApiError::BodyTooLarge(reason) => {
                json!({ "error": reason })
            }
            ApiError::ServiceError(ServiceError::Validation(errors)) => json!({
                "error": "Article validation failed",
                "validation_error": errors,
            }),
            ApiError::ArticleNotFound | ApiError::ServiceError(ServiceError::NotFound(_)) => {
                json!({ "message": "Article not found" })
            }
            ApiError::ServiceError(ServiceError::Storage(error)) => {
                tracing::error!("Storage failure: {}", error);
                json!({ "error": error.to_string() })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[get("/ping")]
#[tracing::instrument]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("pong")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).configure(articles::configure);
}
