use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        sea_orm_active_enums::Availability,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    services::{access::owned_restaurant, category_service::find_category, validation},
    slug,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    category_id: Uuid,
) -> AppResult<ApiResponse<ProductList>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, category_id).await?;
    let items = Products::find()
        .filter(Column::CategoryId.eq(category.id))
        .order_by_asc(Column::Position)
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(ApiResponse::ok("Products", ProductList { items }))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    category_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, category_id).await?;
    let result = find_product(state, category.id, id).await?;
    Ok(ApiResponse::ok("Product", product_from_entity(result)))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    category_id: Uuid,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, category_id).await?;
    let name = validation::required_text("name", &payload.name, 150)?;
    let price = validation::non_negative_price("price", payload.price)?;
    let position = validation::position(payload.position)?;
    let description = validation::optional_text("description", payload.description, 2000)?;
    let product_slug = free_slug_in_category(&state.orm, category.id, &name).await?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category.id),
        restaurant_id: Set(restaurant.id),
        name: Set(name),
        slug: Set(product_slug),
        description: Set(description),
        price: Set(price),
        active: Set(payload.active.unwrap_or(true)),
        availability: Set(payload.availability.unwrap_or(Availability::Available)),
        position: Set(position),
        featured: Set(payload.featured),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "product_create",
        "products",
        serde_json::json!({ "restaurant_id": restaurant.id, "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::ok("Product created", product_from_entity(product)))
}

/// A price change never touches existing order lines; they keep the price
/// captured when the order was placed.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    category_id: Uuid,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, category_id).await?;
    let existing = find_product(state, category.id, id).await?;

    let target = match payload.category_id.filter(|target| *target != category.id) {
        Some(target) => Some(find_category(state, restaurant.id, target).await?),
        None => None,
    };

    let name = payload
        .name
        .map(|name| validation::required_text("name", &name, 150))
        .transpose()?;
    // Slugs are scoped to the category, so a move re-resolves it.
    let moved = match target {
        Some(target) => {
            let slug_source = name.as_deref().unwrap_or(&existing.name);
            let moved_slug = free_slug_in_category(&state.orm, target.id, slug_source).await?;
            Some((target.id, moved_slug))
        }
        None => None,
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some((target_id, moved_slug)) = moved {
        active.category_id = Set(target_id);
        active.slug = Set(moved_slug);
    }
    if payload.description.is_some() {
        active.description = Set(validation::optional_text(
            "description",
            payload.description,
            2000,
        )?);
    }
    if let Some(price) = payload.price {
        active.price = Set(validation::non_negative_price("price", price)?);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    if let Some(availability) = payload.availability {
        active.availability = Set(availability);
    }
    if let Some(position) = payload.position {
        active.position = Set(validation::position(position)?);
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::ok("Updated", product_from_entity(product)))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    category_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, category_id).await?;
    let product = find_product(state, category.id, id).await?;

    let ordered = OrderItems::find()
        .filter(OrderItemCol::ProductId.eq(product.id))
        .count(&state.orm)
        .await?;
    if ordered > 0 {
        return Err(AppError::bad_request("Product is referenced by orders"));
    }

    product.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted())
}

async fn find_product(state: &AppState, category_id: Uuid, id: Uuid) -> AppResult<ProductModel> {
    let product = Products::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::CategoryId.eq(category_id)),
        )
        .one(&state.orm)
        .await?;
    match product {
        Some(p) => Ok(p),
        None => Err(AppError::NotFound),
    }
}

async fn free_slug_in_category<C: ConnectionTrait>(
    conn: &C,
    category_id: Uuid,
    name: &str,
) -> AppResult<String> {
    let base = slug::base_slug(name)?;
    let taken: Vec<String> = Products::find()
        .select_only()
        .column(Column::Slug)
        .filter(Column::CategoryId.eq(category_id))
        .filter(Column::Slug.starts_with(base.as_str()))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(slug::next_free(&base, &taken))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        category_id: model.category_id,
        restaurant_id: model.restaurant_id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        price: model.price,
        active: model.active,
        availability: model.availability,
        position: model.position,
        featured: model.featured,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
