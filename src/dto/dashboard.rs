use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{entity::sea_orm_active_enums::OrderStatus, models::Order};

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub orders_by_status: Vec<StatusCount>,
    pub orders_today: i64,
    pub revenue_today: Decimal,
    pub recent_orders: Vec<Order>,
}

impl DashboardSummary {
    pub fn count_for(&self, status: OrderStatus) -> i64 {
        self.orders_by_status
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
