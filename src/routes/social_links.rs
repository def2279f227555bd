use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::social_links::{CreateSocialLinkRequest, SocialLinkList, UpdateSocialLinkRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::SocialLink,
    response::ApiResponse,
    services::social_link_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_social_links).post(create_social_link))
        .route(
            "/{id}",
            get(get_social_link)
                .put(update_social_link)
                .delete(delete_social_link),
        )
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/social-links",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Social links", body = ApiResponse<SocialLinkList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Social links"
)]
pub async fn list_social_links(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<SocialLinkList>>> {
    let resp = social_link_service::list_social_links(&state, &user, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{slug}/social-links",
    params(("slug" = String, Path, description = "Restaurant slug")),
    request_body = CreateSocialLinkRequest,
    responses(
        (status = 200, description = "Create social link", body = ApiResponse<SocialLink>),
        (status = 400, description = "Invalid URL or network already linked"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Social links"
)]
pub async fn create_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<CreateSocialLinkRequest>,
) -> AppResult<Json<ApiResponse<SocialLink>>> {
    let resp = social_link_service::create_social_link(&state, &user, &slug, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}/social-links/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Social link ID")
    ),
    responses(
        (status = 200, description = "Get social link", body = ApiResponse<SocialLink>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Social links"
)]
pub async fn get_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<SocialLink>>> {
    let resp = social_link_service::get_social_link(&state, &user, &slug, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{slug}/social-links/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Social link ID")
    ),
    request_body = UpdateSocialLinkRequest,
    responses(
        (status = 200, description = "Updated social link", body = ApiResponse<SocialLink>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Social links"
)]
pub async fn update_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateSocialLinkRequest>,
) -> AppResult<Json<ApiResponse<SocialLink>>> {
    let resp = social_link_service::update_social_link(&state, &user, &slug, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{slug}/social-links/{id}",
    params(
        ("slug" = String, Path, description = "Restaurant slug"),
        ("id" = Uuid, Path, description = "Social link ID")
    ),
    responses(
        (status = 200, description = "Deleted social link", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Social links"
)]
pub async fn delete_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = social_link_service::delete_social_link(&state, &user, &slug, id).await?;
    Ok(Json(resp))
}
