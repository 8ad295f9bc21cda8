use sqlx::PgPool;

use crate::{
    error::{StorageContext, StorageError, StorageResult},
    models::{NewUser, User},
};

pub async fn get_all(pool: &PgPool) -> StorageResult<Vec<User>> {
    const OP: &str = "storage.postgres.user.get_all_users";

    let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
        .fetch_all(pool)
        .await
        .context(OP)?;

    Ok(users)
}

/// Inserts a user. A duplicate email trips the `users.email` unique
/// constraint and comes back as a conflict.
pub async fn create_user(pool: &PgPool, user: &NewUser) -> StorageResult<User> {
    const OP: &str = "storage.postgres.user.create_user";

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
    )
    .bind(&user.name)
    .bind(&user.email)
    .fetch_one(pool)
    .await
    .context(OP)?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> StorageResult<User> {
    const OP: &str = "storage.postgres.user.get_user_by_email";

    sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .context(OP)?
        .ok_or_else(|| StorageError::not_found(OP, format!("user with email {}", email)))
}
