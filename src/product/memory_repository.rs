use super::{models::Product, repository::ProductRepository};
use crate::errors::ApiError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

struct ProductStore {
    products: Vec<Product>,
    next_id: i64,
}

#[derive(Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<ProductStore>>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    #[inline]
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Repository preloaded with the five demo products, ids 1 to 5.
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }

    fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        Self {
            store: Arc::new(RwLock::new(ProductStore { products, next_id })),
        }
    }
}

fn seed_products() -> Vec<Product> {
    let seed = |id: i64,
                name: &str,
                description: &str,
                price: f64,
                stock: i64,
                category: &str,
                active: bool| Product {
        id,
        name: name.into(),
        description: description.into(),
        price,
        stock,
        category: category.into(),
        active,
    };

    vec![
        seed(
            1,
            "Notebook Dell XPS 15",
            "Notebook de alta performance com processador Intel i7",
            8999.99,
            15,
            "Eletrônicos",
            true,
        ),
        seed(
            2,
            "Mouse Logitech MX Master 3",
            "Mouse sem fio ergonômico para produtividade",
            599.90,
            50,
            "Periféricos",
            true,
        ),
        seed(
            3,
            "Teclado Mecânico Keychron K8",
            "Teclado mecânico sem fio com switches Gateron",
            799.00,
            30,
            "Periféricos",
            true,
        ),
        seed(
            4,
            "Monitor LG UltraWide 34",
            "Monitor ultrawide 34 polegadas 4K",
            3499.99,
            8,
            "Monitores",
            true,
        ),
        seed(
            5,
            "Webcam Logitech C920",
            "Webcam Full HD para videoconferências",
            499.90,
            0,
            "Periféricos",
            false,
        ),
    ]
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Vec<Product> {
        let lock = self.store.read().await;

        lock.products.clone()
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, ApiError> {
        let lock = self.store.read().await;

        for p in lock.products.iter() {
            if p.id == id {
                return Ok(p.clone());
            }
        }

        Err(ApiError::ProductNotFound)
    }

    async fn get_by_category(&self, category: &str) -> Vec<Product> {
        let lock = self.store.read().await;

        lock.products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    async fn create(&self, mut product: Product) -> Product {
        let mut lock = self.store.write().await;

        product.id = lock.next_id;
        lock.next_id += 1;
        lock.products.push(product.clone());
        drop(lock);

        product
    }

    async fn update(&self, id: i64, mut product: Product) -> Result<Product, ApiError> {
        let mut lock = self.store.write().await;

        let slot = match lock.products.iter_mut().find(|p| p.id == id) {
            Some(v) => v,
            None => return Err(ApiError::ProductNotFound),
        };

        product.id = id;
        *slot = product.clone();

        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let mut lock = self.store.write().await;

        let idx = match lock.products.iter().position(|p| p.id == id) {
            Some(i) => i,
            None => return Err(ApiError::ProductNotFound),
        };
        lock.products.remove(idx);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mock_product(name: &str, category: &str) -> Product {
        Product {
            id: 0,
            name: name.into(),
            description: String::new(),
            price: 10.0,
            stock: 1,
            category: category.into(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_get_by_category() {
        let repo = InMemoryProductRepository::seeded();

        let ids: Vec<_> = repo
            .get_by_category("Periféricos")
            .await
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, [2, 3, 5]);

        assert!(repo.get_by_category("Jardinagem").await.is_empty());
        assert!(repo.get_by_category("periféricos").await.is_empty());
    }

    #[tokio::test]
    async fn test_ids_never_reused() {
        let repo = InMemoryProductRepository::seeded();

        repo.delete(5).await.unwrap();
        let created = repo.create(mock_product("Headset", "Áudio")).await;
        assert_eq!(created.id, 6);

        let empty = InMemoryProductRepository::new();
        assert_eq!(empty.create(mock_product("a", "x")).await.id, 1);
        assert_eq!(empty.create(mock_product("b", "x")).await.id, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryProductRepository::seeded();

        assert_eq!(
            repo.update(9, mock_product("x", "y")).await,
            Err(ApiError::ProductNotFound)
        );
        assert_eq!(repo.delete(9).await, Err(ApiError::ProductNotFound));
        assert_eq!(repo.get_by_id(9).await, Err(ApiError::ProductNotFound));
        assert_eq!(repo.get_all().await.len(), 5);
    }

    #[tokio::test]
    async fn test_update_keeps_slot() {
        let repo = InMemoryProductRepository::seeded();

        let updated = repo.update(2, mock_product("Mouse", "Outros")).await.unwrap();
        assert_eq!(updated.id, 2);

        let all = repo.get_all().await;
        assert_eq!(all[1], updated);
        assert_eq!(all.len(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers() {
        let repo = InMemoryProductRepository::new();

        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let p = repo.create(mock_product(&format!("p{i}"), "x")).await;
                // Readers interleaved with writers on the same collection.
                let _ = repo.get_by_category("x").await;
                repo.update(p.id, mock_product("renamed", "y")).await.unwrap();
                p.id
            }));
        }

        let mut ids = HashSet::new();
        for h in handles {
            ids.insert(h.await.unwrap());
        }

        assert_eq!(ids.len(), 32);
        assert_eq!(repo.get_by_category("y").await.len(), 32);
    }
}
