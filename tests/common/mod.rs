#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use pet_shop::{
    AppConfig, AppState, app,
    error::StorageResult,
    models::{NewProduct, NewUser, Product, ProductUpdate, User},
    storage::{InMemoryStorage, ProductStore, Storage, UserStore},
};
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "STORAGE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_app(storage: Arc<dyn Storage>) -> Router {
    app::router(AppState::new(storage), &test_config()).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Wraps the in-memory backend and counts every storage call.
#[derive(Default)]
pub struct CountingStorage {
    inner: InMemoryStorage,
    calls: AtomicUsize,
}

impl CountingStorage {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for CountingStorage {
    async fn get_all_products(&self) -> StorageResult<Vec<Product>> {
        self.hit();
        self.inner.get_all_products().await
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        self.hit();
        self.inner.create_product(product).await
    }

    async fn delete_product(&self, id: i32) -> StorageResult<()> {
        self.hit();
        self.inner.delete_product(id).await
    }

    async fn update_product(&self, id: i32, product: ProductUpdate) -> StorageResult<Product> {
        self.hit();
        self.inner.update_product(id, product).await
    }

    async fn get_product_by_id(&self, id: i32) -> StorageResult<Product> {
        self.hit();
        self.inner.get_product_by_id(id).await
    }
}

#[async_trait]
impl UserStore for CountingStorage {
    async fn get_all_users(&self) -> StorageResult<Vec<User>> {
        self.hit();
        self.inner.get_all_users().await
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        self.hit();
        self.inner.create_user(user).await
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<User> {
        self.hit();
        self.inner.get_user_by_email(email).await
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn ping(&self) -> StorageResult<()> {
        self.inner.ping().await
    }
}

/// Backend whose product listing panics, for exercising panic recovery.
#[derive(Default)]
pub struct PanickingStorage {
    inner: InMemoryStorage,
}

#[async_trait]
impl ProductStore for PanickingStorage {
    async fn get_all_products(&self) -> StorageResult<Vec<Product>> {
        panic!("storage exploded");
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        self.inner.create_product(product).await
    }

    async fn delete_product(&self, id: i32) -> StorageResult<()> {
        self.inner.delete_product(id).await
    }

    async fn update_product(&self, id: i32, product: ProductUpdate) -> StorageResult<Product> {
        self.inner.update_product(id, product).await
    }

    async fn get_product_by_id(&self, id: i32) -> StorageResult<Product> {
        self.inner.get_product_by_id(id).await
    }
}

#[async_trait]
impl UserStore for PanickingStorage {
    async fn get_all_users(&self) -> StorageResult<Vec<User>> {
        self.inner.get_all_users().await
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        self.inner.create_user(user).await
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<User> {
        self.inner.get_user_by_email(email).await
    }
}

#[async_trait]
impl Storage for PanickingStorage {
    async fn ping(&self) -> StorageResult<()> {
        self.inner.ping().await
    }
}

/// Backend whose product listing outlasts any sensible request timeout.
#[derive(Default)]
pub struct SlowStorage {
    inner: InMemoryStorage,
}

#[async_trait]
impl ProductStore for SlowStorage {
    async fn get_all_products(&self) -> StorageResult<Vec<Product>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        self.inner.get_all_products().await
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        self.inner.create_product(product).await
    }

    async fn delete_product(&self, id: i32) -> StorageResult<()> {
        self.inner.delete_product(id).await
    }

    async fn update_product(&self, id: i32, product: ProductUpdate) -> StorageResult<Product> {
        self.inner.update_product(id, product).await
    }

    async fn get_product_by_id(&self, id: i32) -> StorageResult<Product> {
        self.inner.get_product_by_id(id).await
    }
}

#[async_trait]
impl UserStore for SlowStorage {
    async fn get_all_users(&self) -> StorageResult<Vec<User>> {
        self.inner.get_all_users().await
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        self.inner.create_user(user).await
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<User> {
        self.inner.get_user_by_email(email).await
    }
}

#[async_trait]
impl Storage for SlowStorage {
    async fn ping(&self) -> StorageResult<()> {
        self.inner.ping().await
    }
}
