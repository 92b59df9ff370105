use super::{
    models::{Product, ProductRequest},
    repository::ProductRepository,
    service::ProductService,
};
use crate::{errors::ApiError, http::DataResponse};
use axum::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductIdPathParams {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryPathParams {
    pub category: String,
}

pub struct ProductHandlers<P: ProductRepository> {
    service: ProductService<P>,
}

impl<P: ProductRepository> ProductHandlers<P> {
    pub fn new(product_repo: P) -> Self {
        Self {
            service: ProductService::new(product_repo),
        }
    }

    pub async fn handle_get_all(&self) -> Result<DataResponse<Vec<Product>>, ApiError> {
        Ok(self.service.get_all().await.into())
    }

    pub async fn handle_get_one(
        &self,
        path: ProductIdPathParams,
    ) -> Result<DataResponse<Product>, ApiError> {
        let product = self.service.get_by_id(path.id).await?;

        Ok(product.into())
    }

    pub async fn handle_get_by_category(
        &self,
        path: CategoryPathParams,
    ) -> Result<DataResponse<Vec<Product>>, ApiError> {
        Ok(self.service.get_by_category(&path.category).await.into())
    }

    pub async fn handle_create(
        &self,
        body: ProductRequest,
    ) -> Result<DataResponse<Product>, ApiError> {
        let product = self.service.create(body).await?;

        Ok(DataResponse::with(
            product,
            StatusCode::CREATED,
            "Product created",
        ))
    }

    pub async fn handle_update(
        &self,
        path: ProductIdPathParams,
        body: ProductRequest,
    ) -> Result<DataResponse<Product>, ApiError> {
        let product = self.service.update(path.id, body).await?;

        Ok(DataResponse::with(product, StatusCode::OK, "Product updated"))
    }

    pub async fn handle_delete(
        &self,
        path: ProductIdPathParams,
    ) -> Result<DataResponse<()>, ApiError> {
        self.service.delete(path.id).await?;

        Ok(DataResponse::with((), StatusCode::OK, "Product deleted"))
    }
}
