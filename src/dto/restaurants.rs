use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::sea_orm_active_enums::RestaurantStatus,
    models::{KitchenType, PaymentMethod, Restaurant, ShippingOption, SocialLink},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<RestaurantStatus>,
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub opening_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "20:00:00")]
    pub closing_time: Option<NaiveTime>,
    #[serde(default)]
    pub kitchen_type_ids: Vec<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub status: Option<RestaurantStatus>,
    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub opening_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "20:00:00")]
    pub closing_time: Option<NaiveTime>,
    /// Replaces the restaurant's kitchen types when present.
    pub kitchen_type_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantList {
    pub items: Vec<Restaurant>,
}

/// Public restaurant profile with its active configuration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub kitchen_types: Vec<KitchenType>,
    pub social_links: Vec<SocialLink>,
    pub payment_methods: Vec<PaymentMethod>,
    pub shipping_options: Vec<ShippingOption>,
}
