//! Storage seam between the HTTP handlers and the database.
//!
//! Handlers only ever see `dyn Storage`; the pool stays inside the
//! implementation.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::{
    error::StorageResult,
    models::{NewProduct, NewUser, Product, ProductUpdate, User},
};

pub use memory::InMemoryStorage;
pub use postgres::PgStorage;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, ordered by id.
    async fn get_all_products(&self) -> StorageResult<Vec<Product>>;

    /// Inserts a product and returns it with its assigned id.
    async fn create_product(&self, product: NewProduct) -> StorageResult<Product>;

    /// Fails with `NotFound` when no row has this id.
    async fn delete_product(&self, id: i32) -> StorageResult<()>;

    /// Replaces every column of the row with this id.
    async fn update_product(&self, id: i32, product: ProductUpdate) -> StorageResult<Product>;

    async fn get_product_by_id(&self, id: i32) -> StorageResult<Product>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_all_users(&self) -> StorageResult<Vec<User>>;

    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;

    async fn get_user_by_email(&self, email: &str) -> StorageResult<User>;
}

#[async_trait]
pub trait Storage: ProductStore + UserStore {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StorageResult<()>;
}
