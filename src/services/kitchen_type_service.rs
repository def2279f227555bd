use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::kitchen_types::{CreateKitchenTypeRequest, KitchenTypeList},
    entity::kitchen_types::{
        ActiveModel as KitchenTypeActive, Column as KitchenTypeCol, Entity as KitchenTypes,
        Model as KitchenTypeModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::KitchenType,
    response::ApiResponse,
    services::validation,
    slug,
    state::AppState,
};

pub async fn list_kitchen_types(state: &AppState) -> AppResult<ApiResponse<KitchenTypeList>> {
    let items = KitchenTypes::find()
        .order_by_asc(KitchenTypeCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(kitchen_type_from_entity)
        .collect();
    Ok(ApiResponse::ok("Kitchen types", KitchenTypeList { items }))
}

pub async fn create_kitchen_type(
    state: &AppState,
    user: &AuthUser,
    payload: CreateKitchenTypeRequest,
) -> AppResult<ApiResponse<KitchenType>> {
    ensure_admin(user)?;
    let name = validation::required_text("name", &payload.name, 100)?;

    let duplicate = KitchenTypes::find()
        .filter(KitchenTypeCol::Name.eq(name.as_str()))
        .one(&state.orm)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::bad_request("Kitchen type already exists"));
    }

    let base = slug::base_slug(&name)?;
    let taken: Vec<String> = KitchenTypes::find()
        .select_only()
        .column(KitchenTypeCol::Slug)
        .filter(KitchenTypeCol::Slug.starts_with(base.as_str()))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let kitchen_type = KitchenTypeActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug::next_free(&base, &taken)),
        description: Set(validation::optional_text("description", payload.description, 2000)?),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "kitchen_type_create",
        "kitchen_types",
        serde_json::json!({ "kitchen_type_id": kitchen_type.id }),
    )
    .await;

    Ok(ApiResponse::ok("Kitchen type created", kitchen_type_from_entity(kitchen_type)))
}

pub(crate) fn kitchen_type_from_entity(model: KitchenTypeModel) -> KitchenType {
    KitchenType {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
    }
}
