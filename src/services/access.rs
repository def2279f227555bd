//! Tenant resolution and ownership checks shared by every restaurant-scoped service.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::{
    entity::restaurants::{Column as RestaurantCol, Entity as Restaurants, Model as RestaurantModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
};

pub async fn find_restaurant_by_slug<C: ConnectionTrait>(
    conn: &C,
    slug: &str,
) -> AppResult<RestaurantModel> {
    Restaurants::find()
        .filter(RestaurantCol::Slug.eq(slug))
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)
}

pub fn ensure_owner(restaurant: &RestaurantModel, user: &AuthUser) -> AppResult<()> {
    if restaurant.owner_id != user.user_id {
        tracing::debug!(
            restaurant = %restaurant.slug,
            user_id = %user.user_id,
            "ownership check failed"
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Resolves the restaurant by slug and requires the caller to own it.
///
/// Runs before any nested lookup so a non-owner is refused even when the
/// nested id exists.
pub async fn owned_restaurant(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<RestaurantModel> {
    let restaurant = find_restaurant_by_slug(&state.orm, slug).await?;
    ensure_owner(&restaurant, user)?;
    Ok(restaurant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use uuid::Uuid;

    use crate::entity::sea_orm_active_enums::RestaurantStatus;

    fn restaurant(owner_id: Uuid) -> RestaurantModel {
        let now = Utc::now().fixed_offset();
        RestaurantModel {
            id: Uuid::new_v4(),
            owner_id,
            name: "Pizza Place".into(),
            slug: "pizza-place".into(),
            address: "Main St 1".into(),
            phone: "555-0100".into(),
            description: String::new(),
            status: RestaurantStatus::Open,
            opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_passes_and_stranger_is_forbidden() {
        let owner = AuthUser {
            user_id: Uuid::new_v4(),
            role: "customer".into(),
        };
        let stranger = AuthUser {
            user_id: Uuid::new_v4(),
            role: "admin".into(),
        };
        let r = restaurant(owner.user_id);
        assert!(ensure_owner(&r, &owner).is_ok());
        assert!(matches!(ensure_owner(&r, &stranger), Err(AppError::Forbidden)));
    }
}
