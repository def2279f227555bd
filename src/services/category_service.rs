use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
    entity::{
        categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
            Model as CategoryModel,
        },
        order_items::{self, Entity as OrderItems},
        products::Column as ProductCol,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Category,
    response::ApiResponse,
    services::{access::owned_restaurant, validation},
    slug,
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<ApiResponse<CategoryList>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let items = Categories::find()
        .filter(CategoryCol::RestaurantId.eq(restaurant.id))
        .order_by_asc(CategoryCol::Position)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    Ok(ApiResponse::ok("Categories", CategoryList { items }))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let name = validation::required_text("name", &payload.name, 100)?;
    let position = validation::position(payload.position)?;
    let description = validation::optional_text("description", payload.description, 2000)?;

    let base = slug::base_slug(&name)?;
    let taken: Vec<String> = Categories::find()
        .select_only()
        .column(CategoryCol::Slug)
        .filter(CategoryCol::RestaurantId.eq(restaurant.id))
        .filter(CategoryCol::Slug.starts_with(base.as_str()))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant.id),
        name: Set(name),
        slug: Set(slug::next_free(&base, &taken)),
        description: Set(description),
        position: Set(position),
        active: Set(payload.active.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "category_create",
        "categories",
        serde_json::json!({ "restaurant_id": restaurant.id, "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::ok("Category created", category_from_entity(category)))
}

pub async fn get_category(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<Category>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, id).await?;
    Ok(ApiResponse::ok("Category", category_from_entity(category)))
}

/// Renaming keeps the slug.
pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let existing = find_category(state, restaurant.id, id).await?;

    let mut active: CategoryActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(validation::required_text("name", &name, 100)?);
    }
    if payload.description.is_some() {
        active.description = Set(validation::optional_text(
            "description",
            payload.description,
            2000,
        )?);
    }
    if let Some(position) = payload.position {
        active.position = Set(validation::position(position)?);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());
    let category = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::ok("Updated", category_from_entity(category)))
}

/// Deleting a category removes its products, so it is refused while any of
/// them appears on an order.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let category = find_category(state, restaurant.id, id).await?;

    let ordered = OrderItems::find()
        .join(JoinType::InnerJoin, order_items::Relation::Products.def())
        .filter(ProductCol::CategoryId.eq(category.id))
        .count(&state.orm)
        .await?;
    if ordered > 0 {
        return Err(AppError::bad_request(
            "Category has products referenced by orders",
        ));
    }

    category.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted())
}

pub(crate) async fn find_category(
    state: &AppState,
    restaurant_id: Uuid,
    id: Uuid,
) -> AppResult<CategoryModel> {
    Categories::find()
        .filter(
            Condition::all()
                .add(CategoryCol::Id.eq(id))
                .add(CategoryCol::RestaurantId.eq(restaurant_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub(crate) fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        restaurant_id: model.restaurant_id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        position: model.position,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
