use crate::errors::ApiError;
use axum::{body::Body, http::Response, response::IntoResponse, Router};
use std::{
    env,
    fmt::{Debug, Display},
    str::FromStr,
};
use tower_http::{
    catch_panic::{CatchPanicLayer, ResponseForPanic},
    normalize_path::NormalizePath,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPanicHandler;

impl ResponseForPanic for JsonPanicHandler {
    type ResponseBody = Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn std::any::Any + Send + 'static>,
    ) -> Response<Self::ResponseBody> {
        if let Some(s) = err.downcast_ref::<String>() {
            tracing::error!("Service panicked: {}", s);

            ApiError::ServicePanicked(Some(s.clone()))
        } else if let Some(s) = err.downcast_ref::<&str>() {
            tracing::error!("Service panicked: {}", s);

            ApiError::ServicePanicked(Some(s.to_string()))
        } else {
            tracing::error!(
                "Service panicked but `CatchPanic` was unable to downcast the panic info"
            );

            ApiError::ServicePanicked(None)
        }
        .into_response()
    }
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub seed_data: bool,
    /// Seconds browsers may cache a CORS preflight answer.
    pub cors_max_age: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            seed_data: true,
            cors_max_age: 300,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, VarError> {
        let default = Self::default();

        Ok(Self {
            port: env_param_or("APP_PORT", default.port)?,
            seed_data: env_param_or("APP_SEED_DATA", default.seed_data)?,
            cors_max_age: env_param_or("APP_CORS_MAX_AGE", default.cors_max_age)?,
        })
    }
}

/// Wraps the router in the middleware stack. From the outside in: trailing
/// slash trimming, request id assignment, CORS, tracing, request id
/// propagation and panic recovery.
pub fn app(router: Router, config: &AppConfig) -> NormalizePath<Router> {
    let mut app = router
        .layer(CatchPanicLayer::custom(JsonPanicHandler))
        .layer(PropagateRequestIdLayer::x_request_id());

    #[cfg(feature = "http-trace")]
    {
        app = app.layer(tower_http::trace::TraceLayer::new_for_http());
    }
    #[cfg(feature = "http-cors")]
    {
        app = setup_app_cors(app, config.cors_max_age);
    }

    app = app.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    // Routing happens inside the router, so the trailing slash has to be
    // trimmed before the request reaches it.
    NormalizePath::trim_trailing_slash(app)
}

#[cfg(feature = "http-cors")]
pub fn setup_app_cors(app: Router, max_age: u64) -> Router {
    use axum::http::{header, HeaderName, Method};
    use std::time::Duration;
    use tower_http::cors::{AllowOrigin, CorsLayer};

    // Credentials rule out the `*` origin, so the request origin is echoed back.
    app.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::ACCEPT,
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                HeaderName::from_static("x-csrf-token"),
            ])
            .expose_headers([header::LINK])
            .allow_credentials(true)
            .max_age(Duration::from_secs(max_age)),
    )
}

#[derive(thiserror::Error)]
pub enum VarError {
    #[cfg(feature = "dotenv")]
    #[error("The dotenv file could not be found")]
    DotenvFileNotFound,

    #[error("The environment variable \"{0}\" was not provided")]
    NotProvided(&'static str),
    #[error("The environment variable \"{0}\" could not be parsed")]
    Invalid(&'static str),
}

impl Debug for VarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl VarError {
    fn from_std(err: env::VarError, key: &'static str) -> Self {
        match err {
            env::VarError::NotPresent => Self::NotProvided(key),
            env::VarError::NotUnicode(_) => Self::Invalid(key),
        }
    }
}

pub fn env_param<T: FromStr>(key: &'static str) -> Result<T, VarError> {
    match env::var(key) {
        Ok(v) => T::from_str(&v).map_err(|_| VarError::Invalid(key)),
        Err(err) => Err(VarError::from_std(err, key)),
    }
}

/// Like [`env_param`], but a missing variable yields `default`. A present but
/// unparsable one is still an error.
pub fn env_param_or<T: FromStr>(key: &'static str, default: T) -> Result<T, VarError> {
    match env_param(key) {
        Err(VarError::NotProvided(_)) => Ok(default),
        res => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::router, product::memory_repository::InMemoryProductRepository,
        user::memory_repository::InMemoryUserRepository,
    };
    use axum::{
        body::to_bytes,
        http::{Request, StatusCode},
        routing,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn mock_app() -> NormalizePath<Router> {
        let router = router(
            InMemoryUserRepository::seeded(),
            InMemoryProductRepository::seeded(),
        );

        app(router, &AppConfig::default())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn decode(resp: Response<Body>) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_env_param() {
        env::set_var("CATALOG_TEST_PORT", "9090");
        env::set_var("CATALOG_TEST_BAD_PORT", "ninety");

        assert_eq!(env_param::<u16>("CATALOG_TEST_PORT").unwrap(), 9090);
        assert!(matches!(
            env_param::<u16>("CATALOG_TEST_BAD_PORT"),
            Err(VarError::Invalid("CATALOG_TEST_BAD_PORT"))
        ));
        assert!(matches!(
            env_param::<u16>("CATALOG_TEST_MISSING"),
            Err(VarError::NotProvided("CATALOG_TEST_MISSING"))
        ));

        assert_eq!(env_param_or("CATALOG_TEST_MISSING", true).unwrap(), true);
        assert_eq!(env_param_or("CATALOG_TEST_PORT", 8080_u16).unwrap(), 9090);
        assert!(env_param_or("CATALOG_TEST_BAD_PORT", 8080_u16).is_err());
    }

    #[test]
    fn test_config_rejects_bad_cors_max_age() {
        env::set_var("APP_CORS_MAX_AGE", "soon");
        assert!(matches!(
            AppConfig::from_env(),
            Err(VarError::Invalid("APP_CORS_MAX_AGE"))
        ));

        env::set_var("APP_CORS_MAX_AGE", "60");
        assert_eq!(AppConfig::from_env().unwrap().cors_max_age, 60);

        env::remove_var("APP_CORS_MAX_AGE");
        assert_eq!(AppConfig::from_env().unwrap().cors_max_age, 300);
    }

    #[tokio::test]
    async fn test_panic_handler_body() {
        let cases: [(Box<dyn std::any::Any + Send>, Option<&str>); 3] = [
            (Box::new("boom"), Some("boom")),
            (Box::new(String::from("stock overflow")), Some("stock overflow")),
            (Box::new(17_u8), None),
        ];

        for (payload, expected) in cases {
            let resp = JsonPanicHandler.response_for_panic(payload);
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = decode(resp).await;
            let err = ApiError::ServicePanicked(expected.map(String::from));
            assert_eq!(body["error_code"], 50001);
            assert_eq!(body["message"], err.to_string());
        }
    }

    async fn explode() -> &'static str {
        panic!("inventory exploded")
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let app = app(
            Router::new().route("/explode", routing::get(explode)),
            &AppConfig::default(),
        );

        let resp = app.oneshot(get("/explode")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().contains_key("x-request-id"));

        let body = decode(resp).await;
        assert_eq!(body["error_code"], 50001);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("inventory exploded"));
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let app = mock_app();

        let resp = app.clone().oneshot(get("/api/users/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(decode(resp).await["data"].as_array().unwrap().len(), 5);

        let resp = app.clone().oneshot(get("/health/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // An empty category lands on the product id route.
        let resp = app.oneshot(get("/api/products/category/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(decode(resp).await["error_code"], 40000);
    }

    #[tokio::test]
    async fn test_request_id() {
        let app = mock_app();

        let resp = app.clone().oneshot(get("/health")).await.unwrap();
        let generated = resp.headers().get("x-request-id").unwrap();
        assert_eq!(generated.len(), 36);

        let req = Request::builder()
            .uri("/api/users/42")
            .header("x-request-id", "order-42")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["x-request-id"], "order-42");
    }

    #[cfg(feature = "http-cors")]
    #[tokio::test]
    async fn test_cors_preflight() {
        use axum::http::{header, Method};

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/products")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let resp = mock_app().oneshot(req).await.unwrap();
        assert!(resp.status().is_success());

        let headers = resp.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "300");
    }
}
