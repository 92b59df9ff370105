use super::models::User;
use crate::errors::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Sync + Send {
    async fn get_all(&self) -> Vec<User>;
    async fn get_by_id(&self, id: i64) -> Result<User, ApiError>;
    async fn create(&self, user: User) -> User;
    async fn update(&self, id: i64, user: User) -> Result<User, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}
