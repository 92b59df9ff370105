use super::models::Product;
use crate::errors::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait ProductRepository: Sync + Send {
    async fn get_all(&self) -> Vec<Product>;
    async fn get_by_id(&self, id: i64) -> Result<Product, ApiError>;
    async fn get_by_category(&self, category: &str) -> Vec<Product>;
    async fn create(&self, product: Product) -> Product;
    async fn update(&self, id: i64, product: Product) -> Result<Product, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}
