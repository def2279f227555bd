use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::KitchenType;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateKitchenTypeRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KitchenTypeList {
    pub items: Vec<KitchenType>,
}
