use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    /// Quantity on hand.
    pub stock: i32,
}

// Request types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

/// Full-row replacement. The path carries the identifier; `id` in the body
/// is accepted for compatibility and must agree with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

impl Product {
    pub fn from_new(id: i32, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
            stock: new.stock,
        }
    }

    pub fn apply_update(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.price = update.price;
        self.stock = update.stock;
    }
}
