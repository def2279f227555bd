use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::payment_methods::{
        CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest,
    },
    entity::{
        payment_methods::{
            ActiveModel as PaymentMethodActive, Column as PaymentCol, Entity as PaymentMethods,
            Model as PaymentMethodModel,
        },
        sea_orm_active_enums::PaymentKind,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::PaymentMethod,
    response::ApiResponse,
    services::{access::owned_restaurant, validation},
    state::AppState,
};

pub async fn list_payment_methods(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<ApiResponse<PaymentMethodList>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let items = PaymentMethods::find()
        .filter(PaymentCol::RestaurantId.eq(restaurant.id))
        .order_by_asc(PaymentCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(payment_method_from_entity)
        .collect();
    Ok(ApiResponse::ok("Payment methods", PaymentMethodList { items }))
}

pub async fn create_payment_method(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    payload: CreatePaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let position = validation::position(payload.position)?;
    ensure_kind_free(state, restaurant.id, payload.kind, None).await?;

    let method = PaymentMethodActive {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant.id),
        kind: Set(payload.kind),
        description: Set(payload.description.trim().to_string()),
        position: Set(position),
        active: Set(payload.active.unwrap_or(true)),
        config: Set(payload.config),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "payment_method_create",
        "payment_methods",
        serde_json::json!({ "restaurant_id": restaurant.id, "payment_method_id": method.id }),
    )
    .await;

    Ok(ApiResponse::ok("Payment method created", payment_method_from_entity(method)))
}

pub async fn get_payment_method(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let method = find_payment_method(state, restaurant.id, id).await?;
    Ok(ApiResponse::ok("Payment method", payment_method_from_entity(method)))
}

pub async fn update_payment_method(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
    payload: UpdatePaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let existing = find_payment_method(state, restaurant.id, id).await?;

    if let Some(kind) = payload.kind.filter(|kind| *kind != existing.kind) {
        ensure_kind_free(state, restaurant.id, kind, Some(existing.id)).await?;
    }

    let mut active: PaymentMethodActive = existing.into();
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(position) = payload.position {
        active.position = Set(validation::position(position)?);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    if let Some(config) = payload.config {
        active.config = Set(Some(config));
    }
    active.updated_at = Set(Utc::now().into());
    let method = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "payment_method_update",
        "payment_methods",
        serde_json::json!({ "payment_method_id": method.id }),
    )
    .await;

    Ok(ApiResponse::ok("Updated", payment_method_from_entity(method)))
}

/// Orders that used the method keep their total; their reference is cleared.
pub async fn delete_payment_method(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let method = find_payment_method(state, restaurant.id, id).await?;
    method.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "payment_method_delete",
        "payment_methods",
        serde_json::json!({ "payment_method_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted())
}

async fn find_payment_method(
    state: &AppState,
    restaurant_id: Uuid,
    id: Uuid,
) -> AppResult<PaymentMethodModel> {
    let method = PaymentMethods::find()
        .filter(
            Condition::all()
                .add(PaymentCol::Id.eq(id))
                .add(PaymentCol::RestaurantId.eq(restaurant_id)),
        )
        .one(&state.orm)
        .await?;
    match method {
        Some(m) => Ok(m),
        None => Err(AppError::NotFound),
    }
}

async fn ensure_kind_free(
    state: &AppState,
    restaurant_id: Uuid,
    kind: PaymentKind,
    except: Option<Uuid>,
) -> AppResult<()> {
    let mut condition = Condition::all()
        .add(PaymentCol::RestaurantId.eq(restaurant_id))
        .add(PaymentCol::Kind.eq(kind));
    if let Some(id) = except {
        condition = condition.add(PaymentCol::Id.ne(id));
    }
    let clash = PaymentMethods::find().filter(condition).one(&state.orm).await?;
    if clash.is_some() {
        return Err(AppError::bad_request(
            "Restaurant already has this payment method",
        ));
    }
    Ok(())
}

pub(crate) fn payment_method_from_entity(model: PaymentMethodModel) -> PaymentMethod {
    PaymentMethod {
        id: model.id,
        restaurant_id: model.restaurant_id,
        kind: model.kind,
        description: model.description,
        position: model.position,
        active: model.active,
        config: model.config,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
