//! User business rules: required fields, email uniqueness, defaults and the
//! sparse-patch update merge.
//!
//! Email uniqueness is checked against a snapshot taken before the insert
//! and is not atomic with it; two racing creates with the same email may
//! both succeed.

use super::{
    models::{User, UserRequest, DEFAULT_USER_ROLE},
    repository::UserRepository,
};
use crate::errors::ApiError;
use chrono::{SecondsFormat, Utc};

pub struct UserService<U: UserRepository> {
    user_repo: U,
}

#[inline]
fn keep_if_empty(incoming: String, existing: &str) -> String {
    if incoming.is_empty() {
        existing.to_owned()
    } else {
        incoming
    }
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repo: U) -> Self {
        Self { user_repo }
    }

    pub async fn get_all(&self) -> Vec<User> {
        self.user_repo.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidUserData);
        }

        self.user_repo.get_by_id(id).await
    }

    pub async fn create(&self, req: UserRequest) -> Result<User, ApiError> {
        if req.name.is_empty() || req.email.is_empty() {
            tracing::debug!("Rejected user creation with missing name or email");
            return Err(ApiError::InvalidUserData);
        }

        let users = self.user_repo.get_all().await;
        if users.iter().any(|u| u.email == req.email) {
            tracing::debug!(email = %req.email, "Rejected user creation with taken email");
            return Err(ApiError::EmailExists);
        }

        let role = if req.role.is_empty() {
            DEFAULT_USER_ROLE.to_owned()
        } else {
            req.role
        };

        let user = self
            .user_repo
            .create(User {
                id: 0,
                name: req.name,
                email: req.email,
                role,
                active: true,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            })
            .await;

        tracing::info!(user_id = user.id, "User created");

        Ok(user)
    }

    pub async fn update(&self, id: i64, req: UserRequest) -> Result<User, ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidUserData);
        }

        let existing = self.user_repo.get_by_id(id).await?;

        let user = User {
            id: existing.id,
            name: keep_if_empty(req.name, &existing.name),
            email: keep_if_empty(req.email, &existing.email),
            role: keep_if_empty(req.role, &existing.role),
            active: existing.active,
            created_at: existing.created_at,
        };

        let user = self.user_repo.update(id, user).await?;
        tracing::info!(user_id = user.id, "User updated");

        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidUserData);
        }

        self.user_repo.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }
}
