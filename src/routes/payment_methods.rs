use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::payment_methods::{
        CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::PaymentMethod,
    response::ApiResponse,
    services::payment_method_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods).post(create_payment_method))
        .route(
            "/{id}",
            get(get_payment_method)
                .put(update_payment_method)
                .delete(delete_payment_method),
        )
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/payment-methods",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Payment methods", body = ApiResponse<PaymentMethodList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment methods"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<PaymentMethodList>>> {
    let resp = payment_method_service::list_payment_methods(&state, &user, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{slug}/payment-methods",
    params(("slug" = String, Path, description = "Restaurant slug")),
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 200, description = "Create payment method", body = ApiResponse<PaymentMethod>),
        (status = 400, description = "Payment kind already configured"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment methods"
)]
pub async fn create_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<CreatePaymentMethodRequest>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let resp =
        payment_method_service::create_payment_method(&state, &user, &slug, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/payment-methods/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Get payment method", body = ApiResponse<PaymentMethod>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment methods"
)]
pub async fn get_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let resp = payment_method_service::get_payment_method(&state, &user, &slug, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{slug}/payment-methods/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    request_body = UpdatePaymentMethodRequest,
    responses(
        (status = 200, description = "Updated payment method", body = ApiResponse<PaymentMethod>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment methods"
)]
pub async fn update_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdatePaymentMethodRequest>,
) -> AppResult<Json<ApiResponse<PaymentMethod>>> {
    let resp =
        payment_method_service::update_payment_method(&state, &user, &slug, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{slug}/payment-methods/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Deleted payment method", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payment methods"
)]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = payment_method_service::delete_payment_method(&state, &user, &slug, id).await?;
    Ok(Json(resp))
}
