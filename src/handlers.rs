use crate::{
    errors::ApiError,
    http::{ApiResponder, AppData, DataResponse, Json, Path},
    product::{
        handlers::{CategoryPathParams, ProductHandlers, ProductIdPathParams},
        models::{Product, ProductRequest},
        repository::ProductRepository,
    },
    user::{
        handlers::{UserHandlers, UserIdPathParams},
        models::{User, UserRequest},
        repository::UserRepository,
    },
};
use axum::{routing, Router};
use serde::Serialize;

pub const SERVICE_NAME: &str = "catalog-api";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

impl ApiResponder for HealthStatus {
    fn unit() -> &'static str {
        "health status"
    }
    fn article() -> &'static str {
        "A"
    }
    fn message(&self) -> String {
        "The API is working correctly".into()
    }
}

pub fn router<U, P>(user_repo: U, product_repo: P) -> Router
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", routing::get(get_health))
        .route("/health", routing::get(get_health))
        .route(
            "/api/users",
            routing::get(get_users::<U>).post(post_users::<U>),
        )
        .route(
            "/api/users/:id",
            routing::get(get_users_id::<U>)
                .put(put_users_id::<U>)
                .delete(delete_users_id::<U>),
        )
        .route(
            "/api/products",
            routing::get(get_products::<P>).post(post_products::<P>),
        )
        .route(
            "/api/products/:id",
            routing::get(get_products_id::<P>)
                .put(put_products_id::<P>)
                .delete(delete_products_id::<P>),
        )
        .route(
            "/api/products/category/:category",
            routing::get(get_products_category::<P>),
        )
        .fallback(fallback)
        .layer(AppData::extension(UserHandlers::new(user_repo)))
        .layer(AppData::extension(ProductHandlers::new(product_repo)))
}

pub async fn fallback() -> ApiError {
    ApiError::RouteNotFound
}

pub async fn get_health() -> DataResponse<HealthStatus> {
    HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
    }
    .into()
}

pub async fn get_users<U>(
    AppData(data): AppData<UserHandlers<U>>,
) -> Result<DataResponse<Vec<User>>, ApiError>
where
    U: UserRepository + 'static,
{
    data.handle_get_all().await
}

pub async fn get_users_id<U>(
    AppData(data): AppData<UserHandlers<U>>,
    Path(path): Path<UserIdPathParams>,
) -> Result<DataResponse<User>, ApiError>
where
    U: UserRepository + 'static,
{
    data.handle_get_one(path).await
}

pub async fn post_users<U>(
    AppData(data): AppData<UserHandlers<U>>,
    Json(body): Json<UserRequest>,
) -> Result<DataResponse<User>, ApiError>
where
    U: UserRepository + 'static,
{
    data.handle_create(body).await
}

pub async fn put_users_id<U>(
    AppData(data): AppData<UserHandlers<U>>,
    Path(path): Path<UserIdPathParams>,
    Json(body): Json<UserRequest>,
) -> Result<DataResponse<User>, ApiError>
where
    U: UserRepository + 'static,
{
    data.handle_update(path, body).await
}

pub async fn delete_users_id<U>(
    AppData(data): AppData<UserHandlers<U>>,
    Path(path): Path<UserIdPathParams>,
) -> Result<DataResponse<()>, ApiError>
where
    U: UserRepository + 'static,
{
    data.handle_delete(path).await
}

pub async fn get_products<P>(
    AppData(data): AppData<ProductHandlers<P>>,
) -> Result<DataResponse<Vec<Product>>, ApiError>
where
    P: ProductRepository + 'static,
{
    data.handle_get_all().await
}

pub async fn get_products_id<P>(
    AppData(data): AppData<ProductHandlers<P>>,
    Path(path): Path<ProductIdPathParams>,
) -> Result<DataResponse<Product>, ApiError>
where
    P: ProductRepository + 'static,
{
    data.handle_get_one(path).await
}

pub async fn get_products_category<P>(
    AppData(data): AppData<ProductHandlers<P>>,
    Path(path): Path<CategoryPathParams>,
) -> Result<DataResponse<Vec<Product>>, ApiError>
where
    P: ProductRepository + 'static,
{
    data.handle_get_by_category(path).await
}

pub async fn post_products<P>(
    AppData(data): AppData<ProductHandlers<P>>,
    Json(body): Json<ProductRequest>,
) -> Result<DataResponse<Product>, ApiError>
where
    P: ProductRepository + 'static,
{
    data.handle_create(body).await
}

pub async fn put_products_id<P>(
    AppData(data): AppData<ProductHandlers<P>>,
    Path(path): Path<ProductIdPathParams>,
    Json(body): Json<ProductRequest>,
) -> Result<DataResponse<Product>, ApiError>
where
    P: ProductRepository + 'static,
{
    data.handle_update(path, body).await
}

pub async fn delete_products_id<P>(
    AppData(data): AppData<ProductHandlers<P>>,
    Path(path): Path<ProductIdPathParams>,
) -> Result<DataResponse<()>, ApiError>
where
    P: ProductRepository + 'static,
{
    data.handle_delete(path).await
}
