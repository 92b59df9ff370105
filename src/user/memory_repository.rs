use super::{models::User, repository::UserRepository};
use crate::errors::ApiError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

struct UserStore {
    users: Vec<User>,
    next_id: i64,
}

/// Vec-backed user collection. Lookups are linear scans; the id counter only
/// moves forward, so ids freed by `delete` are never handed out again.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<UserStore>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    #[inline]
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Repository preloaded with the five demo users, ids 1 to 5.
    pub fn seeded() -> Self {
        Self::with_users(seed_users())
    }

    fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        Self {
            store: Arc::new(RwLock::new(UserStore { users, next_id })),
        }
    }
}

fn seed_users() -> Vec<User> {
    let seed = |id: i64, name: &str, email: &str, role: &str, active: bool, created_at: &str| {
        User {
            id,
            name: name.into(),
            email: email.into(),
            role: role.into(),
            active,
            created_at: created_at.into(),
        }
    };

    vec![
        seed(
            1,
            "João Silva",
            "joao.silva@example.com",
            "admin",
            true,
            "2024-01-15T10:00:00Z",
        ),
        seed(
            2,
            "Maria Santos",
            "maria.santos@example.com",
            "user",
            true,
            "2024-01-16T11:30:00Z",
        ),
        seed(
            3,
            "Pedro Oliveira",
            "pedro.oliveira@example.com",
            "user",
            false,
            "2024-01-17T14:20:00Z",
        ),
        seed(
            4,
            "Ana Costa",
            "ana.costa@example.com",
            "manager",
            true,
            "2024-01-18T09:15:00Z",
        ),
        seed(
            5,
            "Carlos Ferreira",
            "carlos.ferreira@example.com",
            "user",
            true,
            "2024-01-19T16:45:00Z",
        ),
    ]
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> Vec<User> {
        let lock = self.store.read().await;

        lock.users.clone()
    }

    async fn get_by_id(&self, id: i64) -> Result<User, ApiError> {
        let lock = self.store.read().await;

        for u in lock.users.iter() {
            if u.id == id {
                return Ok(u.clone());
            }
        }

        Err(ApiError::UserNotFound)
    }

    async fn create(&self, mut user: User) -> User {
        let mut lock = self.store.write().await;

        user.id = lock.next_id;
        lock.next_id += 1;
        lock.users.push(user.clone());
        drop(lock);

        user
    }

    async fn update(&self, id: i64, mut user: User) -> Result<User, ApiError> {
        let mut lock = self.store.write().await;

        let slot = match lock.users.iter_mut().find(|u| u.id == id) {
            Some(v) => v,
            None => return Err(ApiError::UserNotFound),
        };

        user.id = id;
        *slot = user.clone();

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let mut lock = self.store.write().await;

        let idx = match lock.users.iter().position(|u| u.id == id) {
            Some(i) => i,
            None => return Err(ApiError::UserNotFound),
        };
        lock.users.remove(idx);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mock_user(name: &str, email: &str) -> User {
        User {
            id: 0,
            name: name.into(),
            email: email.into(),
            role: "user".into(),
            active: true,
            created_at: "2024-02-01T08:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let a = repo.create(mock_user("a", "a@example.com")).await;
        let b = repo.create(mock_user("b", "b@example.com")).await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        repo.delete(b.id).await.unwrap();
        let c = repo.create(mock_user("c", "c@example.com")).await;
        assert_eq!(c.id, 3, "deleted ids must not be reused");

        let seeded = InMemoryUserRepository::seeded();
        let d = seeded.create(mock_user("d", "d@example.com")).await;
        assert_eq!(d.id, 6);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = InMemoryUserRepository::seeded();

        let user = repo.get_by_id(3).await.unwrap();
        assert_eq!(user.name, "Pedro Oliveira");
        assert!(!user.active);

        assert_eq!(repo.get_by_id(42).await, Err(ApiError::UserNotFound));
    }

    #[tokio::test]
    async fn test_get_all_is_a_snapshot() {
        let repo = InMemoryUserRepository::seeded();

        let before = repo.get_all().await;
        repo.create(mock_user("new", "new@example.com")).await;

        assert_eq!(before.len(), 5);
        assert_eq!(repo.get_all().await.len(), 6);
        let ids: Vec<_> = before.iter().map(|u| u.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let repo = InMemoryUserRepository::seeded();

        let mut replacement = mock_user("Ana C.", "ana@example.com");
        replacement.id = 999;

        let updated = repo.update(4, replacement).await.unwrap();
        assert_eq!(updated.id, 4);
        assert_eq!(updated.name, "Ana C.");
        assert_eq!(updated.role, "user");
        assert_eq!(repo.get_by_id(4).await.unwrap(), updated);
        assert_eq!(repo.get_by_id(999).await, Err(ApiError::UserNotFound));

        assert_eq!(
            repo.update(77, mock_user("x", "x@example.com")).await,
            Err(ApiError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_preserves_order() {
        let repo = InMemoryUserRepository::seeded();

        repo.delete(2).await.unwrap();
        assert_eq!(repo.delete(2).await, Err(ApiError::UserNotFound));

        let ids: Vec<_> = repo.get_all().await.iter().map(|u| u.id).collect();
        assert_eq!(ids, [1, 3, 4, 5]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates() {
        let repo = InMemoryUserRepository::new();

        let mut handles = Vec::new();
        for i in 0..64 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create(mock_user("u", &format!("u{i}@example.com")))
                    .await
                    .id
            }));
        }

        let mut ids = HashSet::new();
        for h in handles {
            ids.insert(h.await.unwrap());
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(ids.iter().max(), Some(&64));
        assert_eq!(repo.get_all().await.len(), 64);
    }
}
