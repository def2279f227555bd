use std::collections::BTreeSet;

use chrono::{NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::restaurants::{
        CreateRestaurantRequest, RestaurantDetail, RestaurantList, UpdateRestaurantRequest,
    },
    entity::{
        kitchen_types::{Column as KitchenTypeCol, Entity as KitchenTypes},
        orders::{Column as OrderCol, Entity as Orders},
        payment_methods::{Column as PaymentCol, Entity as PaymentMethods},
        restaurant_kitchen_types::{
            ActiveModel as RestaurantKitchenTypeActive, Column as RestaurantKitchenTypeCol,
            Entity as RestaurantKitchenTypes,
        },
        restaurants::{
            ActiveModel as RestaurantActive, Column as RestaurantCol, Entity as Restaurants,
            Model as RestaurantModel,
        },
        sea_orm_active_enums::{RestaurantStatus, ShippingStatus},
        shipping_options::{Column as ShippingCol, Entity as ShippingOptions},
        social_links::{Column as SocialCol, Entity as SocialLinks},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Restaurant,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{
        access::{find_restaurant_by_slug, owned_restaurant},
        kitchen_type_service::kitchen_type_from_entity,
        payment_method_service::payment_method_from_entity,
        shipping_option_service::shipping_option_from_entity,
        social_link_service::social_link_from_entity,
        validation,
    },
    slug,
    state::AppState,
};

pub async fn list_restaurants(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<RestaurantList>> {
    let (page, limit, offset) = pagination.normalize();

    // "open" sorts after "closed", so descending puts open restaurants first.
    let finder = Restaurants::find()
        .order_by_desc(RestaurantCol::Status)
        .order_by_asc(RestaurantCol::Slug);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(restaurant_from_entity)
        .collect();

    Ok(ApiResponse::page(
        "Restaurants",
        RestaurantList { items },
        Meta::new(page, limit, total),
    ))
}

pub async fn list_my_restaurants(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<RestaurantList>> {
    let items: Vec<Restaurant> = Restaurants::find()
        .filter(RestaurantCol::OwnerId.eq(user.user_id))
        .order_by_asc(RestaurantCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(restaurant_from_entity)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::page(
        "My restaurants",
        RestaurantList { items },
        meta,
    ))
}

pub async fn get_restaurant(state: &AppState, slug: &str) -> AppResult<ApiResponse<RestaurantDetail>> {
    let restaurant = find_restaurant_by_slug(&state.orm, slug).await?;
    let detail = restaurant_detail(&state.orm, restaurant).await?;
    Ok(ApiResponse::ok("Restaurant", detail))
}

pub async fn create_restaurant(
    state: &AppState,
    user: &AuthUser,
    payload: CreateRestaurantRequest,
) -> AppResult<ApiResponse<RestaurantDetail>> {
    let name = validation::required_text("name", &payload.name, 100)?;
    let address = validation::required_text("address", &payload.address, 200)?;
    let phone = validation::required_text("phone", &payload.phone, 20)?;
    let base = slug::base_slug(&name)?;
    let kitchen_type_ids = dedup_ids(&payload.kitchen_type_ids);

    let txn = state.orm.begin().await?;

    ensure_kitchen_types_exist(&txn, &kitchen_type_ids).await?;

    let taken: Vec<String> = Restaurants::find()
        .select_only()
        .column(RestaurantCol::Slug)
        .filter(RestaurantCol::Slug.starts_with(base.as_str()))
        .into_tuple()
        .all(&txn)
        .await?;

    let restaurant = RestaurantActive {
        id: Set(Uuid::new_v4()),
        owner_id: Set(user.user_id),
        name: Set(name),
        slug: Set(restaurant_slug(&base, taken)),
        address: Set(address),
        phone: Set(phone),
        description: Set(payload.description.trim().to_string()),
        status: Set(payload.status.unwrap_or(RestaurantStatus::Open)),
        opening_time: Set(payload.opening_time.unwrap_or_else(default_opening_time)),
        closing_time: Set(payload.closing_time.unwrap_or_else(default_closing_time)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    replace_kitchen_types(&txn, restaurant.id, &kitchen_type_ids).await?;

    txn.commit().await?;

    tracing::info!(restaurant = %restaurant.slug, owner_id = %user.user_id, "restaurant created");
    audit::record(
        &state.pool,
        user.user_id,
        "restaurant_create",
        "restaurants",
        serde_json::json!({ "restaurant_id": restaurant.id, "slug": restaurant.slug }),
    )
    .await;

    let detail = restaurant_detail(&state.orm, restaurant).await?;
    Ok(ApiResponse::ok("Restaurant created", detail))
}

pub async fn update_restaurant(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    payload: UpdateRestaurantRequest,
) -> AppResult<ApiResponse<RestaurantDetail>> {
    let existing = owned_restaurant(state, user, slug).await?;

    let txn = state.orm.begin().await?;

    let mut active: RestaurantActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(validation::required_text("name", &name, 100)?);
    }
    if let Some(address) = payload.address {
        active.address = Set(validation::required_text("address", &address, 200)?);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(validation::required_text("phone", &phone, 20)?);
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(opening_time) = payload.opening_time {
        active.opening_time = Set(opening_time);
    }
    if let Some(closing_time) = payload.closing_time {
        active.closing_time = Set(closing_time);
    }
    active.updated_at = Set(Utc::now().into());
    let restaurant = active.update(&txn).await?;

    if let Some(ids) = payload.kitchen_type_ids {
        let ids = dedup_ids(&ids);
        ensure_kitchen_types_exist(&txn, &ids).await?;
        replace_kitchen_types(&txn, restaurant.id, &ids).await?;
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "restaurant_update",
        "restaurants",
        serde_json::json!({ "restaurant_id": restaurant.id }),
    )
    .await;

    let detail = restaurant_detail(&state.orm, restaurant).await?;
    Ok(ApiResponse::ok("Updated", detail))
}

pub async fn delete_restaurant(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = owned_restaurant(state, user, slug).await?;

    let order_count = Orders::find()
        .filter(OrderCol::RestaurantId.eq(restaurant.id))
        .count(&state.orm)
        .await?;
    if order_count > 0 {
        return Err(AppError::bad_request(
            "Restaurant has orders and cannot be deleted",
        ));
    }

    let id = restaurant.id;
    restaurant.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "restaurant_delete",
        "restaurants",
        serde_json::json!({ "restaurant_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted())
}

/// Loads the public profile: kitchen types plus the active social links,
/// payment methods and shipping options.
async fn restaurant_detail<C: ConnectionTrait>(
    conn: &C,
    restaurant: RestaurantModel,
) -> AppResult<RestaurantDetail> {
    let kitchen_types = restaurant
        .find_related(KitchenTypes)
        .order_by_asc(KitchenTypeCol::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(kitchen_type_from_entity)
        .collect();

    let social_links = SocialLinks::find()
        .filter(SocialCol::RestaurantId.eq(restaurant.id))
        .filter(SocialCol::Active.eq(true))
        .order_by_asc(SocialCol::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(social_link_from_entity)
        .collect();

    let payment_methods = PaymentMethods::find()
        .filter(PaymentCol::RestaurantId.eq(restaurant.id))
        .filter(PaymentCol::Active.eq(true))
        .order_by_asc(PaymentCol::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(payment_method_from_entity)
        .collect();

    let shipping_options = ShippingOptions::find()
        .filter(ShippingCol::RestaurantId.eq(restaurant.id))
        .filter(ShippingCol::Status.eq(ShippingStatus::Active))
        .order_by_asc(ShippingCol::Price)
        .all(conn)
        .await?
        .into_iter()
        .map(shipping_option_from_entity)
        .collect();

    Ok(RestaurantDetail {
        restaurant: restaurant_from_entity(restaurant),
        kitchen_types,
        social_links,
        payment_methods,
        shipping_options,
    })
}

async fn ensure_kitchen_types_exist<C: ConnectionTrait>(conn: &C, ids: &[Uuid]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = KitchenTypes::find()
        .filter(KitchenTypeCol::Id.is_in(ids.to_vec()))
        .count(conn)
        .await?;
    if found as usize != ids.len() {
        return Err(AppError::bad_request("Unknown kitchen type id"));
    }
    Ok(())
}

async fn replace_kitchen_types<C: ConnectionTrait>(
    conn: &C,
    restaurant_id: Uuid,
    ids: &[Uuid],
) -> AppResult<()> {
    RestaurantKitchenTypes::delete_many()
        .filter(RestaurantKitchenTypeCol::RestaurantId.eq(restaurant_id))
        .exec(conn)
        .await?;

    if ids.is_empty() {
        return Ok(());
    }
    let rows = ids.iter().map(|kitchen_type_id| RestaurantKitchenTypeActive {
        restaurant_id: Set(restaurant_id),
        kitchen_type_id: Set(*kitchen_type_id),
    });
    RestaurantKitchenTypes::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Static segments routed next to `/restaurants/{slug}`; a slug equal to one
/// of them would be unreachable.
const RESERVED_SLUGS: &[&str] = &["mine"];

fn restaurant_slug(base: &str, mut taken: Vec<String>) -> String {
    taken.extend(RESERVED_SLUGS.iter().map(|reserved| reserved.to_string()));
    slug::next_free(base, &taken)
}

fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn default_opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_closing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub(crate) fn restaurant_from_entity(model: RestaurantModel) -> Restaurant {
    Restaurant {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        slug: model.slug,
        address: model.address,
        phone: model.phone,
        description: model.description,
        status: model.status,
        opening_time: model.opening_time,
        closing_time: model.closing_time,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_ids_removes_repeats() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let ids = dedup_ids(&[a, b, a]);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a) && ids.contains(&b));
    }

    #[test]
    fn restaurant_slug_skips_route_segments() {
        assert_eq!(restaurant_slug("mine", vec![]), "mine-1");
        assert_eq!(restaurant_slug("mine", vec!["mine-1".into()]), "mine-2");
        assert_eq!(restaurant_slug("minestrone", vec![]), "minestrone");
        assert_eq!(restaurant_slug("luigi", vec!["luigi".into()]), "luigi-1");
    }

    #[test]
    fn default_hours_match_schema_defaults() {
        assert_eq!(default_opening_time().to_string(), "09:00:00");
        assert_eq!(default_closing_time().to_string(), "20:00:00");
    }
}
