use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{entity::sea_orm_active_enums::Availability, models::Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: Option<bool>,
    pub availability: Option<Availability>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    /// Moves the product to another category of the same restaurant.
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
    pub availability: Option<Availability>,
    pub position: Option<i32>,
    pub featured: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
