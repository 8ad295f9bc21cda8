use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProductStore, Storage, UserStore};
use crate::{
    error::{StorageError, StorageResult},
    models::{NewProduct, NewUser, Product, ProductUpdate, User},
};

/// Process-local storage with the same error semantics as `PgStorage`.
/// Ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    products: BTreeMap<i32, Product>,
    users: BTreeMap<i32, User>,
    last_product_id: i32,
    last_user_id: i32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryStorage {
    async fn get_all_products(&self) -> StorageResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        let mut inner = self.inner.write().await;

        inner.last_product_id += 1;
        let product = Product::from_new(inner.last_product_id, product);
        inner.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> StorageResult<()> {
        const OP: &str = "storage.memory.product.delete_product";

        let mut inner = self.inner.write().await;
        inner
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(OP, format!("product {}", id)))
    }

    async fn update_product(&self, id: i32, product: ProductUpdate) -> StorageResult<Product> {
        const OP: &str = "storage.memory.product.update_product";

        let mut inner = self.inner.write().await;
        let existing = inner
            .products
            .get_mut(&id)
            .ok_or_else(|| StorageError::not_found(OP, format!("product {}", id)))?;

        existing.apply_update(product);
        Ok(existing.clone())
    }

    async fn get_product_by_id(&self, id: i32) -> StorageResult<Product> {
        const OP: &str = "storage.memory.product.get_product_by_id";

        let inner = self.inner.read().await;
        inner
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(OP, format!("product {}", id)))
    }
}

#[async_trait]
impl UserStore for InMemoryStorage {
    async fn get_all_users(&self) -> StorageResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        const OP: &str = "storage.memory.user.create_user";

        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StorageError::conflict(
                OP,
                format!("email {} already registered", user.email),
            ));
        }

        inner.last_user_id += 1;
        let user = User::from_new(inner.last_user_id, user);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<User> {
        const OP: &str = "storage.memory.user.get_user_by_email";

        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| StorageError::not_found(OP, format!("user with email {}", email)))
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
