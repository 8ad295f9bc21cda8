mod health;
mod params;
pub mod products;
pub mod users;

use axum::{Router, routing::get};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/products",
            get(products::get_all_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product_by_id)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/users",
            get(users::get_all_users).post(users::create_user),
        )
        .route("/users/{email}", get(users::get_user_by_email))
}
