use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::sea_orm_active_enums::ShippingStatus, models::ShippingOption};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShippingOptionRequest {
    pub name: String,
    pub price: Decimal,
    pub status: Option<ShippingStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateShippingOptionRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<ShippingStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShippingOptionList {
    pub items: Vec<ShippingOption>,
}
