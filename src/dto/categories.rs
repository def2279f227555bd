use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
    pub active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

/// A menu section: one category and its visible products.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuSection {
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Menu {
    pub sections: Vec<MenuSection>,
}
