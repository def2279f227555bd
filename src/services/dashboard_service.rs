use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, Iterable, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::dashboard::{DashboardSummary, StatusCount},
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        sea_orm_active_enums::OrderStatus,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::{access::owned_restaurant, order_service::order_from_entity},
    state::AppState,
};

const RECENT_ORDERS: u64 = 5;

pub async fn summary(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
) -> AppResult<ApiResponse<DashboardSummary>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let today = start_of_day(Utc::now());

    let rows = status_counts(&state.pool, restaurant.id).await?;
    let orders_by_status = fill_status_counts(&rows);

    let (orders_today, revenue_today): (i64, Decimal) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COALESCE(SUM(total) FILTER (WHERE status = $3), 0)
        FROM orders
        WHERE restaurant_id = $1 AND created_at >= $2
        "#,
    )
    .bind(restaurant.id)
    .bind(today)
    .bind(OrderStatus::Delivered.as_str())
    .fetch_one(&state.pool)
    .await?;

    let recent_orders = Orders::find()
        .filter(OrderCol::RestaurantId.eq(restaurant.id))
        .order_by_desc(OrderCol::CreatedAt)
        .limit(RECENT_ORDERS)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(ApiResponse::ok(
        "Dashboard",
        DashboardSummary {
            orders_by_status,
            orders_today,
            revenue_today,
            recent_orders,
        },
    ))
}

async fn status_counts(pool: &DbPool, restaurant_id: Uuid) -> AppResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT status, COUNT(*)
        FROM orders
        WHERE restaurant_id = $1
        GROUP BY status
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every status appears once, in declaration order, with zero when absent.
fn fill_status_counts(rows: &[(String, i64)]) -> Vec<StatusCount> {
    OrderStatus::iter()
        .map(|status| StatusCount {
            status,
            count: rows
                .iter()
                .filter(|(name, _)| OrderStatus::parse(name) == Some(status))
                .map(|(_, count)| *count)
                .sum(),
        })
        .collect()
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn missing_statuses_are_zero() {
        let rows = vec![("delivered".to_string(), 3), ("pending".to_string(), 2)];
        let counts = fill_status_counts(&rows);
        assert_eq!(counts.len(), OrderStatus::iter().count());

        let summary = DashboardSummary {
            orders_by_status: counts,
            orders_today: 0,
            revenue_today: Decimal::ZERO,
            recent_orders: vec![],
        };
        assert_eq!(summary.count_for(OrderStatus::Delivered), 3);
        assert_eq!(summary.count_for(OrderStatus::Pending), 2);
        assert_eq!(summary.count_for(OrderStatus::Cancelled), 0);
        assert_eq!(summary.count_for(OrderStatus::OnTheWay), 0);
    }

    #[test]
    fn unknown_status_rows_are_ignored() {
        let rows = vec![("archived".to_string(), 7)];
        assert!(fill_status_counts(&rows).iter().all(|c| c.count == 0));
    }

    #[test]
    fn day_starts_at_utc_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 18, 42, 7).unwrap();
        let start = start_of_day(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 17, 0, 0, 0).unwrap());
    }
}
