//! Product business rules: required name, positive price, non-negative
//! stock, the default category and the sparse-patch update merge.

use super::{
    models::{Product, ProductRequest, DEFAULT_PRODUCT_CATEGORY},
    repository::ProductRepository,
};
use crate::errors::ApiError;

pub struct ProductService<P: ProductRepository> {
    product_repo: P,
}

#[inline]
fn keep_if_empty(incoming: String, existing: &str) -> String {
    if incoming.is_empty() {
        existing.to_owned()
    } else {
        incoming
    }
}

#[inline]
fn keep_if_not_positive<T: PartialOrd + Default>(incoming: T, existing: T) -> T {
    if incoming <= T::default() {
        existing
    } else {
        incoming
    }
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(product_repo: P) -> Self {
        Self { product_repo }
    }

    pub async fn get_all(&self) -> Vec<Product> {
        self.product_repo.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidProductData);
        }

        self.product_repo.get_by_id(id).await
    }

    pub async fn get_by_category(&self, category: &str) -> Vec<Product> {
        self.product_repo.get_by_category(category).await
    }

    pub async fn create(&self, req: ProductRequest) -> Result<Product, ApiError> {
        if req.name.is_empty() || req.price <= 0.0 || req.stock < 0 {
            tracing::debug!(
                price = req.price,
                stock = req.stock,
                "Rejected invalid product creation"
            );
            return Err(ApiError::InvalidProductData);
        }

        let category = if req.category.is_empty() {
            DEFAULT_PRODUCT_CATEGORY.to_owned()
        } else {
            req.category
        };

        let product = self
            .product_repo
            .create(Product {
                id: 0,
                name: req.name,
                description: req.description,
                price: req.price,
                stock: req.stock,
                category,
                active: true,
            })
            .await;

        tracing::info!(product_id = product.id, "Product created");

        Ok(product)
    }

    /// Sparse patch: empty strings and non-positive numbers keep the stored
    /// value, so neither stock nor price can be zeroed through here.
    pub async fn update(&self, id: i64, req: ProductRequest) -> Result<Product, ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidProductData);
        }

        let existing = self.product_repo.get_by_id(id).await?;

        let product = Product {
            id: existing.id,
            name: keep_if_empty(req.name, &existing.name),
            description: keep_if_empty(req.description, &existing.description),
            price: keep_if_not_positive(req.price, existing.price),
            stock: keep_if_not_positive(req.stock, existing.stock),
            category: keep_if_empty(req.category, &existing.category),
            active: existing.active,
        };

        let product = self.product_repo.update(id, product).await?;
        tracing::info!(product_id = product.id, "Product updated");

        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidProductData);
        }

        self.product_repo.delete(id).await?;
        tracing::info!(product_id = id, "Product deleted");

        Ok(())
    }
}
