use sqlx::PgPool;

use crate::{
    error::{StorageContext, StorageError, StorageResult},
    models::{NewProduct, Product, ProductUpdate},
};

pub async fn get_all(pool: &PgPool) -> StorageResult<Vec<Product>> {
    const OP: &str = "storage.postgres.product.get_all_products";

    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, price, stock FROM products ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .context(OP)?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> StorageResult<Product> {
    const OP: &str = "storage.postgres.product.get_product_by_id";

    sqlx::query_as::<_, Product>("SELECT id, name, price, stock FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context(OP)?
        .ok_or_else(|| StorageError::not_found(OP, format!("product {}", id)))
}

pub async fn create(pool: &PgPool, product: &NewProduct) -> StorageResult<Product> {
    const OP: &str = "storage.postgres.product.create_product";

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, price, stock)
         VALUES ($1, $2, $3)
         RETURNING id, name, price, stock",
    )
    .bind(&product.name)
    .bind(product.price)
    .bind(product.stock)
    .fetch_one(pool)
    .await
    .context(OP)?;

    Ok(product)
}

pub async fn update(pool: &PgPool, id: i32, product: &ProductUpdate) -> StorageResult<Product> {
    const OP: &str = "storage.postgres.product.update_product";

    sqlx::query_as::<_, Product>(
        "UPDATE products SET name = $1, price = $2, stock = $3
         WHERE id = $4
         RETURNING id, name, price, stock",
    )
    .bind(&product.name)
    .bind(product.price)
    .bind(product.stock)
    .bind(id)
    .fetch_optional(pool)
    .await
    .context(OP)?
    .ok_or_else(|| StorageError::not_found(OP, format!("product {}", id)))
}

pub async fn delete(pool: &PgPool, id: i32) -> StorageResult<()> {
    const OP: &str = "storage.postgres.product.delete_product";

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context(OP)?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found(OP, format!("product {}", id)));
    }

    Ok(())
}
