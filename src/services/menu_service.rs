//! Public, read-only views of a restaurant's catalogue.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::{
        categories::{Menu, MenuSection},
        products::ProductList,
    },
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{
        access::find_restaurant_by_slug, category_service::category_from_entity,
        product_service::product_from_entity,
    },
    state::AppState,
};

/// Active categories with their active products, both ordered by position
/// then name. Categories without visible products are still listed.
pub async fn get_menu(state: &AppState, slug: &str) -> AppResult<ApiResponse<Menu>> {
    let restaurant = find_restaurant_by_slug(&state.orm, slug).await?;

    let categories = Categories::find()
        .filter(CategoryCol::RestaurantId.eq(restaurant.id))
        .filter(CategoryCol::Active.eq(true))
        .order_by_asc(CategoryCol::Position)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?;

    let category_ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
    let products = Products::find()
        .filter(ProductCol::CategoryId.is_in(category_ids))
        .filter(ProductCol::Active.eq(true))
        .order_by_asc(ProductCol::Position)
        .order_by_asc(ProductCol::Name)
        .all(&state.orm)
        .await?;

    let mut by_category: HashMap<Uuid, Vec<Product>> = HashMap::new();
    for product in products {
        by_category
            .entry(product.category_id)
            .or_default()
            .push(product_from_entity(product));
    }

    let sections = categories
        .into_iter()
        .map(|category| MenuSection {
            products: by_category.remove(&category.id).unwrap_or_default(),
            category: category_from_entity(category),
        })
        .collect();

    Ok(ApiResponse::ok("Menu", Menu { sections }))
}

pub async fn get_menu_product(
    state: &AppState,
    slug: &str,
    product_id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    let restaurant = find_restaurant_by_slug(&state.orm, slug).await?;
    let product = Products::find()
        .filter(
            Condition::all()
                .add(ProductCol::Id.eq(product_id))
                .add(ProductCol::RestaurantId.eq(restaurant.id))
                .add(ProductCol::Active.eq(true)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::ok("Product", product_from_entity(product)))
}

pub async fn list_restaurant_products(
    state: &AppState,
    slug: &str,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let restaurant = find_restaurant_by_slug(&state.orm, slug).await?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Products::find()
        .filter(ProductCol::RestaurantId.eq(restaurant.id))
        .order_by_asc(ProductCol::Name)
        .order_by_asc(ProductCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(ApiResponse::page(
        "Products",
        ProductList { items },
        Meta::new(page, limit, total),
    ))
}
