use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::shipping_options::{
        CreateShippingOptionRequest, ShippingOptionList, UpdateShippingOptionRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::ShippingOption,
    response::ApiResponse,
    services::shipping_option_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipping_options).post(create_shipping_option))
        .route(
            "/{id}",
            get(get_shipping_option)
                .put(update_shipping_option)
                .delete(delete_shipping_option),
        )
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/shipping-options",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Shipping options", body = ApiResponse<ShippingOptionList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipping options"
)]
pub async fn list_shipping_options(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<ShippingOptionList>>> {
    let resp = shipping_option_service::list_shipping_options(&state, &user, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{slug}/shipping-options",
    params(("slug" = String, Path, description = "Restaurant slug")),
    request_body = CreateShippingOptionRequest,
    responses(
        (status = 200, description = "Create shipping option", body = ApiResponse<ShippingOption>),
        (status = 400, description = "Invalid name or price"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipping options"
)]
pub async fn create_shipping_option(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<CreateShippingOptionRequest>,
) -> AppResult<Json<ApiResponse<ShippingOption>>> {
    let resp =
        shipping_option_service::create_shipping_option(&state, &user, &slug, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/shipping-options/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Shipping option ID")
    ),
    responses(
        (status = 200, description = "Get shipping option", body = ApiResponse<ShippingOption>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipping options"
)]
pub async fn get_shipping_option(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<ShippingOption>>> {
    let resp = shipping_option_service::get_shipping_option(&state, &user, &slug, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{slug}/shipping-options/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Shipping option ID")
    ),
    request_body = UpdateShippingOptionRequest,
    responses(
        (status = 200, description = "Updated shipping option", body = ApiResponse<ShippingOption>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipping options"
)]
pub async fn update_shipping_option(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateShippingOptionRequest>,
) -> AppResult<Json<ApiResponse<ShippingOption>>> {
    let resp =
        shipping_option_service::update_shipping_option(&state, &user, &slug, id, payload)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{slug}/shipping-options/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Shipping option ID")
    ),
    responses(
        (status = 200, description = "Deleted shipping option", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Shipping options"
)]
pub async fn delete_shipping_option(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = shipping_option_service::delete_shipping_option(&state, &user, &slug, id).await?;
    Ok(Json(resp))
}
