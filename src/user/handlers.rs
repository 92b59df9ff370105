use super::{
    models::{User, UserRequest},
    repository::UserRepository,
    service::UserService,
};
use crate::{errors::ApiError, http::DataResponse};
use axum::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserIdPathParams {
    pub id: i64,
}

pub struct UserHandlers<U: UserRepository> {
    service: UserService<U>,
}

impl<U: UserRepository> UserHandlers<U> {
    pub fn new(user_repo: U) -> Self {
        Self {
            service: UserService::new(user_repo),
        }
    }

    pub async fn handle_get_all(&self) -> Result<DataResponse<Vec<User>>, ApiError> {
        Ok(self.service.get_all().await.into())
    }

    pub async fn handle_get_one(
        &self,
        path: UserIdPathParams,
    ) -> Result<DataResponse<User>, ApiError> {
        let user = self.service.get_by_id(path.id).await?;

        Ok(user.into())
    }

    pub async fn handle_create(&self, body: UserRequest) -> Result<DataResponse<User>, ApiError> {
        let user = self.service.create(body).await?;

        Ok(DataResponse::with(
            user,
            StatusCode::CREATED,
            "User created",
        ))
    }

    pub async fn handle_update(
        &self,
        path: UserIdPathParams,
        body: UserRequest,
    ) -> Result<DataResponse<User>, ApiError> {
        let user = self.service.update(path.id, body).await?;

        Ok(DataResponse::with(user, StatusCode::OK, "User updated"))
    }

    pub async fn handle_delete(
        &self,
        path: UserIdPathParams,
    ) -> Result<DataResponse<()>, ApiError> {
        self.service.delete(path.id).await?;

        Ok(DataResponse::with((), StatusCode::OK, "User deleted"))
    }
}
