use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::restaurants::{
        CreateRestaurantRequest, RestaurantDetail, RestaurantList, UpdateRestaurantRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::{
        categories, dashboard, menu, params::Pagination, payment_methods, products,
        restaurant_orders, shipping_options, social_links,
    },
    services::restaurant_service,
    state::AppState,
};

/// Restaurant resources plus every route scoped to one restaurant slug.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_restaurants).post(create_restaurant))
        .route("/mine", get(list_my_restaurants))
        .route(
            "/{slug}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .nest("/{slug}/social-links", social_links::router())
        .nest("/{slug}/payment-methods", payment_methods::router())
        .nest("/{slug}/shipping-options", shipping_options::router())
        .nest("/{slug}/categories", categories::router())
        .nest("/{slug}/categories/{category_id}/products", products::router())
        .nest("/{slug}/orders", restaurant_orders::router())
        .nest("/{slug}/dashboard", dashboard::router())
        .merge(menu::router())
}

#[utoipa::path(
    get,
    path = "/api/restaurants",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List restaurants, open first", body = ApiResponse<RestaurantList>)
    ),
    security(()),
    tag = "Restaurants"
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    let resp = restaurant_service::list_restaurants(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/mine",
    responses(
        (status = 200, description = "Restaurants owned by the caller", body = ApiResponse<RestaurantList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Restaurants"
)]
pub async fn list_my_restaurants(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    let resp = restaurant_service::list_my_restaurants(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 200, description = "Create restaurant owned by the caller", body = ApiResponse<RestaurantDetail>),
        (status = 400, description = "Invalid input or unknown kitchen type"),
    ),
    security(("bearer_auth" = [])),
    tag = "Restaurants"
)]
pub async fn create_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<RestaurantDetail>>> {
    let resp = restaurant_service::create_restaurant(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}",
    params(
        ("slug" = String, Path, description = "Restaurant slug")
    ),
    responses(
        (status = 200, description = "Restaurant profile", body = ApiResponse<RestaurantDetail>),
        (status = 404, description = "Not Found"),
    ),
    security(()),
    tag = "Restaurants"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<RestaurantDetail>>> {
    let resp = restaurant_service::get_restaurant(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{slug}",
    params(
        ("slug" = String, Path, description = "Restaurant slug")
    ),
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 200, description = "Updated restaurant", body = ApiResponse<RestaurantDetail>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Restaurants"
)]
pub async fn update_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<RestaurantDetail>>> {
    let resp = restaurant_service::update_restaurant(&state, &user, &slug, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{slug}",
    params(
        ("slug" = String, Path, description = "Restaurant slug")
    ),
    responses(
        (status = 200, description = "Deleted restaurant", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Restaurant has orders"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Restaurants"
)]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = restaurant_service::delete_restaurant(&state, &user, &slug).await?;
    Ok(Json(resp))
}
