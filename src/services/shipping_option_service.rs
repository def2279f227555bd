use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::shipping_options::{
        CreateShippingOptionRequest, ShippingOptionList, UpdateShippingOptionRequest,
    },
    entity::{
        sea_orm_active_enums::ShippingStatus,
        shipping_options::{
            ActiveModel as ShippingOptionActive, Column as ShippingCol, Entity as ShippingOptions,
            Model as ShippingOptionModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::ShippingOption,
    response::ApiResponse,
    services::{access::owned_restaurant, validation},
    state::AppState,
};

pub async fn list_shipping_options(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<ApiResponse<ShippingOptionList>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let items = ShippingOptions::find()
        .filter(ShippingCol::RestaurantId.eq(restaurant.id))
        .order_by_asc(ShippingCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(shipping_option_from_entity)
        .collect();
    Ok(ApiResponse::ok("Shipping options", ShippingOptionList { items }))
}

pub async fn create_shipping_option(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    payload: CreateShippingOptionRequest,
) -> AppResult<ApiResponse<ShippingOption>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let name = validation::required_text("name", &payload.name, 100)?;
    let price = validation::non_negative_price("price", payload.price)?;

    let option = ShippingOptionActive {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant.id),
        name: Set(name),
        status: Set(payload.status.unwrap_or(ShippingStatus::Active)),
        price: Set(price),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "shipping_option_create",
        "shipping_options",
        serde_json::json!({ "restaurant_id": restaurant.id, "shipping_option_id": option.id }),
    )
    .await;

    Ok(ApiResponse::ok("Shipping option created", shipping_option_from_entity(option)))
}

pub async fn get_shipping_option(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<ShippingOption>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let option = find_shipping_option(state, restaurant.id, id).await?;
    Ok(ApiResponse::ok("Shipping option", shipping_option_from_entity(option)))
}

/// A new price only applies to orders placed afterwards.
pub async fn update_shipping_option(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
    payload: UpdateShippingOptionRequest,
) -> AppResult<ApiResponse<ShippingOption>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let existing = find_shipping_option(state, restaurant.id, id).await?;

    let mut active: ShippingOptionActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(validation::required_text("name", &name, 100)?);
    }
    if let Some(price) = payload.price {
        active.price = Set(validation::non_negative_price("price", price)?);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());
    let option = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "shipping_option_update",
        "shipping_options",
        serde_json::json!({ "shipping_option_id": option.id }),
    )
    .await;

    Ok(ApiResponse::ok("Updated", shipping_option_from_entity(option)))
}

pub async fn delete_shipping_option(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let option = find_shipping_option(state, restaurant.id, id).await?;
    option.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "shipping_option_delete",
        "shipping_options",
        serde_json::json!({ "shipping_option_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted())
}

async fn find_shipping_option(
    state: &AppState,
    restaurant_id: Uuid,
    id: Uuid,
) -> AppResult<ShippingOptionModel> {
    ShippingOptions::find()
        .filter(
            Condition::all()
                .add(ShippingCol::Id.eq(id))
                .add(ShippingCol::RestaurantId.eq(restaurant_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub(crate) fn shipping_option_from_entity(model: ShippingOptionModel) -> ShippingOption {
    ShippingOption {
        id: model.id,
        restaurant_id: model.restaurant_id,
        name: model.name,
        status: model.status,
        price: model.price,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
