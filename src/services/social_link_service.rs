use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::social_links::{CreateSocialLinkRequest, SocialLinkList, UpdateSocialLinkRequest},
    entity::{
        sea_orm_active_enums::SocialNetwork,
        social_links::{
            ActiveModel as SocialLinkActive, Column as SocialCol, Entity as SocialLinks,
            Model as SocialLinkModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::SocialLink,
    response::ApiResponse,
    services::{access::owned_restaurant, validation},
    state::AppState,
};

pub async fn list_social_links(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<ApiResponse<SocialLinkList>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let items = SocialLinks::find()
        .filter(SocialCol::RestaurantId.eq(restaurant.id))
        .order_by_asc(SocialCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(social_link_from_entity)
        .collect();
    Ok(ApiResponse::ok("Social links", SocialLinkList { items }))
}

pub async fn create_social_link(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    payload: CreateSocialLinkRequest,
) -> AppResult<ApiResponse<SocialLink>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let url = validation::web_url("url", &payload.url)?;
    let position = validation::position(payload.position)?;
    ensure_kind_free(state, restaurant.id, payload.kind, None).await?;

    let link = SocialLinkActive {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant.id),
        kind: Set(payload.kind),
        url: Set(url),
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
        "social_link_create",
        "social_links",
        serde_json::json!({ "restaurant_id": restaurant.id, "social_link_id": link.id }),
    )
    .await;

    Ok(ApiResponse::ok("Social link created", social_link_from_entity(link)))
}

pub async fn get_social_link(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<SocialLink>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let link = find_social_link(state, restaurant.id, id).await?;
    Ok(ApiResponse::ok("Social link", social_link_from_entity(link)))
}

pub async fn update_social_link(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
    payload: UpdateSocialLinkRequest,
) -> AppResult<ApiResponse<SocialLink>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let existing = find_social_link(state, restaurant.id, id).await?;

    if let Some(kind) = payload.kind.filter(|kind| *kind != existing.kind) {
        ensure_kind_free(state, restaurant.id, kind, Some(existing.id)).await?;
    }

    let mut active: SocialLinkActive = existing.into();
    if let Some(kind) = payload.kind {
        active.kind = Set(kind);
    }
    if let Some(url) = payload.url {
        active.url = Set(validation::web_url("url", &url)?);
    }
    if let Some(position) = payload.position {
        active.position = Set(validation::position(position)?);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());
    let link = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "social_link_update",
        "social_links",
        serde_json::json!({ "social_link_id": link.id }),
    )
    .await;

    Ok(ApiResponse::ok("Updated", social_link_from_entity(link)))
}

pub async fn delete_social_link(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let link = find_social_link(state, restaurant.id, id).await?;
    link.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "social_link_delete",
        "social_links",
        serde_json::json!({ "social_link_id": id }),
    )
    .await;

    Ok(ApiResponse::deleted())
}

async fn find_social_link(
    state: &AppState,
    restaurant_id: Uuid,
    id: Uuid,
) -> AppResult<SocialLinkModel> {
    SocialLinks::find()
        .filter(
            Condition::all()
                .add(SocialCol::Id.eq(id))
                .add(SocialCol::RestaurantId.eq(restaurant_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

/// One link per network per restaurant.
async fn ensure_kind_free(
    state: &AppState,
    restaurant_id: Uuid,
    kind: SocialNetwork,
    except: Option<Uuid>,
) -> AppResult<()> {
    let mut condition = Condition::all()
        .add(SocialCol::RestaurantId.eq(restaurant_id))
        .add(SocialCol::Kind.eq(kind));
    if let Some(id) = except {
        condition = condition.add(SocialCol::Id.ne(id));
    }
    let clash = SocialLinks::find().filter(condition).one(&state.orm).await?;
    if clash.is_some() {
        return Err(AppError::bad_request(
            "Restaurant already has a link for this network",
        ));
    }
    Ok(())
}

pub(crate) fn social_link_from_entity(model: SocialLinkModel) -> SocialLink {
    SocialLink {
        id: model.id,
        restaurant_id: model.restaurant_id,
        kind: model.kind,
        url: model.url,
        position: model.position,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
