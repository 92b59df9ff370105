use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::ENCODING_FAILED_BODY;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error_code: u32,
}

impl ErrorBody {
    #[inline]
    pub fn new(message: String, error_code: u32) -> Self {
        Self {
            message,
            error_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Server service panicked: {0:?}")]
    ServicePanicked(Option<String>),
    #[error("The requested route does not exist")]
    RouteNotFound,

    #[error("The user could not be found")]
    UserNotFound,
    #[error("Invalid user data: name and email are required and the id must be positive")]
    InvalidUserData,
    #[error("The email is already registered")]
    EmailExists,

    #[error("The product could not be found")]
    ProductNotFound,
    #[error("Invalid product data: name is required, price must be positive, stock must not be negative and the id must be positive")]
    InvalidProductData,
}

impl From<&ApiError> for StatusCode {
    fn from(value: &ApiError) -> Self {
        match value {
            ApiError::ServicePanicked(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RouteNotFound | ApiError::UserNotFound | ApiError::ProductNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::InvalidUserData | ApiError::EmailExists | ApiError::InvalidProductData => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<&ApiError> for u32 {
    fn from(value: &ApiError) -> Self {
        match value {
            ApiError::ServicePanicked(_) => 50001,
            ApiError::InvalidUserData => 40001,
            ApiError::InvalidProductData => 40002,
            ApiError::EmailExists => 40003,
            ApiError::RouteNotFound => 40400,
            ApiError::UserNotFound => 40401,
            ApiError::ProductNotFound => 40402,
        }
    }
}

/// Fully resolved error payload, also produced by the request extractors
/// when axum rejects a body or a path segment.
#[derive(Debug)]
pub struct ErrorResponse {
    pub status_code: StatusCode,
    pub error_code: u32,
    pub message: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(value: ApiError) -> Self {
        Self {
            status_code: (&value).into(),
            error_code: (&value).into(),
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let err_body = ErrorBody::new(self.message, self.error_code);

        let tuple = match serde_json::to_vec(&err_body) {
            Ok(buf) => (
                self.status_code,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
                )],
                buf,
            ),
            Err(e) => {
                tracing::error!(error = e.to_string(), "Failed to encode error body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
                    )],
                    ENCODING_FAILED_BODY.to_vec(),
                )
            }
        };

        tuple.into_response()
    }
}

impl IntoResponse for ApiError {
    #[inline]
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}
