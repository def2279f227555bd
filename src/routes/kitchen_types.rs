use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::kitchen_types::{CreateKitchenTypeRequest, KitchenTypeList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::KitchenType,
    response::ApiResponse,
    services::kitchen_type_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_kitchen_types).post(create_kitchen_type))
}

#[utoipa::path(
    get,
    path = "/api/kitchen-types",
    responses(
        (status = 200, description = "List kitchen types", body = ApiResponse<KitchenTypeList>)
    ),
    security(()),
    tag = "Kitchen types"
)]
pub async fn list_kitchen_types(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<KitchenTypeList>>> {
    let resp = kitchen_type_service::list_kitchen_types(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/kitchen-types",
    request_body = CreateKitchenTypeRequest,
    responses(
        (status = 200, description = "Create kitchen type (admin only)", body = ApiResponse<KitchenType>),
        (status = 400, description = "Invalid input or duplicate name"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Kitchen types"
)]
pub async fn create_kitchen_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateKitchenTypeRequest>,
) -> AppResult<Json<ApiResponse<KitchenType>>> {
    let resp = kitchen_type_service::create_kitchen_type(&state, &user, payload).await?;
    Ok(Json(resp))
}
