use crate::{
    errors::{ApiError, ErrorResponse},
    ENCODING_FAILED_BODY,
};
use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{any::type_name, sync::Arc};

pub trait ApiResponder {
    fn http_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn unit() -> &'static str;
    fn article() -> &'static str;

    fn plural() -> String {
        format!("{}s", Self::unit())
    }

    fn message(&self) -> String {
        format!("{} {} was returned", Self::article(), Self::unit())
    }
}

impl ApiResponder for () {
    #[inline]
    fn unit() -> &'static str {
        "response with nothing"
    }
    #[inline]
    fn article() -> &'static str {
        "A"
    }
}

impl<T: ApiResponder + Serialize> ApiResponder for Vec<T> {
    #[inline]
    fn unit() -> &'static str {
        T::unit()
    }

    #[inline]
    fn article() -> &'static str {
        T::article()
    }

    fn message(&self) -> String {
        match self.len() {
            0 => format!("No {} was returned", T::unit()),
            1 => format!("1 {} was returned", T::unit()),
            n => format!("{n} {} were returned", T::plural()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppData<T>(pub Arc<T>);

impl<T> AppData<T> {
    #[inline]
    pub fn new(data: Arc<T>) -> Self {
        Self(data)
    }

    #[inline]
    pub fn extension(data: T) -> Extension<Arc<T>> {
        Extension(Arc::new(data))
    }
}

#[async_trait]
impl<T: Sync + Send + 'static, S: Send + Sync> FromRequestParts<S> for AppData<T> {
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let data = parts.extensions.get::<Arc<T>>().ok_or_else(|| {
            let t_name = type_name::<T>();
            let self_t_name = type_name::<Self>();

            tracing::error!(type_name = t_name, "Failed get AppData request extension");

            ApiError::ServicePanicked(Some(format!(
                "Failed to get '{self_t_name}' request extension"
            )))
        })?;

        Ok(Self::new(data.clone()))
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub message: Option<String>,
    #[serde(skip_serializing)]
    pub http_code: Option<StatusCode>,
}

impl<T: ApiResponder + Serialize> DataResponse<T> {
    /// Builds a response overriding the status and message the payload
    /// would report on its own.
    #[inline]
    pub fn with(data: T, http_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
            http_code: Some(http_code),
        }
    }
}

impl<T: ApiResponder + Serialize> IntoResponse for DataResponse<T> {
    fn into_response(mut self) -> Response {
        let http_code = self.http_code.unwrap_or_else(|| self.data.http_code());
        if self.message.is_none() {
            self.message = Some(self.data.message());
        }

        let tuple = match serde_json::to_vec(&self) {
            Ok(buf) => (
                http_code,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
                )],
                buf,
            ),
            Err(e) => {
                tracing::error!(error = e.to_string(), "Failed to encode response body");
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

impl<T: ApiResponder + Serialize> From<T> for DataResponse<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self {
            message: Some(value.message()),
            http_code: Some(value.http_code()),
            data: value,
        }
    }
}

#[inline]
fn rejection_response(status_code: StatusCode, message: String) -> ErrorResponse {
    ErrorResponse {
        error_code: u32::from(status_code.as_u16()) * 100_u32,
        status_code,
        message,
    }
}

pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(v)) => Ok(Self(v)),
            Err(e) => Err(rejection_response(e.status(), e.body_text())),
        }
    }
}

/// Path extractor answering malformed segments (e.g. a non-numeric id) with
/// the JSON error envelope instead of axum's plain text body.
pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let res: Result<axum::extract::Path<T>, PathRejection> =
            axum::extract::Path::from_request_parts(parts, state).await;

        match res {
            Ok(axum::extract::Path(v)) => Ok(Self(v)),
            Err(e) => Err(rejection_response(e.status(), e.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item;

    impl ApiResponder for Item {
        fn unit() -> &'static str {
            "item"
        }
        fn article() -> &'static str {
            "An"
        }
    }

    #[test]
    fn test_vec_messages() {
        assert_eq!(Vec::<Item>::new().message(), "No item was returned");
        assert_eq!(vec![Item].message(), "1 item was returned");
        assert_eq!(vec![Item, Item, Item].message(), "3 items were returned");
        assert_eq!(Item.message(), "An item was returned");
    }
}
