use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::sea_orm_active_enums::PaymentKind, models::PaymentMethod};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentMethodRequest {
    pub kind: PaymentKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: i32,
    pub active: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePaymentMethodRequest {
    pub kind: Option<PaymentKind>,
    pub description: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodList {
    pub items: Vec<PaymentMethod>,
}
