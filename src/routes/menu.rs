use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{categories::Menu, products::ProductList},
    error::AppResult,
    models::Product,
    response::ApiResponse,
    routes::params::Pagination,
    services::menu_service,
    state::AppState,
};

/// Public catalogue routes; merged into the restaurant router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}/menu", get(get_menu))
        .route("/{slug}/menu/{product_id}", get(get_menu_product))
        .route("/{slug}/products", get(list_restaurant_products))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/menu",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Active categories with their active products", body = ApiResponse<Menu>),
        (status = 404, description = "Not Found"),
    ),
    security(()),
    tag = "Menu"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let resp = menu_service::get_menu(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/menu/{product_id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Active product of the restaurant", body = ApiResponse<Product>),
        (status = 404, description = "Not Found"),
    ),
    security(()),
    tag = "Menu"
)]
pub async fn get_menu_product(
    State(state): State<AppState>,
    Path((slug, product_id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = menu_service::get_menu_product(&state, &slug, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/products",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "All products of the restaurant", body = ApiResponse<ProductList>),
        (status = 404, description = "Not Found"),
    ),
    security(()),
    tag = "Menu"
)]
pub async fn list_restaurant_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = menu_service::list_restaurant_products(&state, &slug, pagination).await?;
    Ok(Json(resp))
}
