use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::dashboard::DashboardSummary,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(summary))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/dashboard/summary",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Order counts per status, today's revenue and recent orders", body = ApiResponse<DashboardSummary>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let resp = dashboard_service::summary(&state, &user, &slug).await?;
    Ok(Json(resp))
}
