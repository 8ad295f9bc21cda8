use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProductStore, Storage, UserStore};
use crate::{
    database,
    error::StorageResult,
    models::{NewProduct, NewUser, Product, ProductUpdate, User},
    queries::{product_queries, user_queries},
};

#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgStorage {
    async fn get_all_products(&self) -> StorageResult<Vec<Product>> {
        product_queries::get_all(&self.pool).await
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        let product = product_queries::create(&self.pool, &product).await?;
        tracing::debug!(product_id = product.id, "Inserted product");
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> StorageResult<()> {
        product_queries::delete(&self.pool, id).await
    }

    async fn update_product(&self, id: i32, product: ProductUpdate) -> StorageResult<Product> {
        product_queries::update(&self.pool, id, &product).await
    }

    async fn get_product_by_id(&self, id: i32) -> StorageResult<Product> {
        product_queries::find_by_id(&self.pool, id).await
    }
}

#[async_trait]
impl UserStore for PgStorage {
    async fn get_all_users(&self) -> StorageResult<Vec<User>> {
        user_queries::get_all(&self.pool).await
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let user = user_queries::create_user(&self.pool, &user).await?;
        tracing::debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<User> {
        user_queries::find_by_email(&self.pool, email).await
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn ping(&self) -> StorageResult<()> {
        database::check_health(&self.pool).await
    }
}
