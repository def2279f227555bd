use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{
        CreateOrderRequest, OrderLineRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest,
    },
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        payment_methods::{Column as PaymentCol, Entity as PaymentMethods},
        products::Entity as Products,
        restaurants::Entity as Restaurants,
        sea_orm_active_enums::OrderStatus,
        shipping_options::{Column as ShippingCol, Entity as ShippingOptions},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{
        access::owned_restaurant,
        pricing::{LineQuote, price_order},
        validation,
    },
    state::AppState,
};

const MAX_LINE_QUANTITY: i32 = 1000;

/// Checked and trimmed customer input, ready to be written.
#[derive(Debug)]
struct OrderDraft {
    contact_name: Option<String>,
    contact_phone: Option<String>,
    contact_email: Option<String>,
    delivery_address: String,
    special_instructions: Option<String>,
    items: Vec<OrderLineRequest>,
}

fn validate_order(payload: CreateOrderRequest) -> AppResult<OrderDraft> {
    if payload.items.is_empty() {
        return Err(AppError::bad_request("Order must contain at least one item"));
    }

    let mut seen = HashSet::new();
    for line in &payload.items {
        if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
            return Err(AppError::bad_request(format!(
                "Quantity for product {} must be between 1 and {MAX_LINE_QUANTITY}",
                line.product_id
            )));
        }
        if !seen.insert(line.product_id) {
            return Err(AppError::bad_request(format!(
                "Product {} is listed more than once",
                line.product_id
            )));
        }
    }

    let contact_email = match payload.contact_email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(email) => Some(validation::email("contact_email", email)?),
    };

    Ok(OrderDraft {
        contact_name: validation::optional_text("contact_name", payload.contact_name, 100)?,
        contact_phone: validation::optional_text("contact_phone", payload.contact_phone, 20)?,
        contact_email,
        delivery_address: validation::required_text(
            "delivery_address",
            &payload.delivery_address,
            500,
        )?,
        special_instructions: validation::optional_text(
            "special_instructions",
            payload.special_instructions,
            2000,
        )?,
        items: payload.items,
    })
}

/// Places an order for the caller.
///
/// Everything runs in one transaction: any missing product or foreign
/// payment/shipping reference rolls back the order and all its lines.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let restaurant_id = payload.restaurant_id;
    let payment_method_id = payload.payment_method_id;
    let shipping_option_id = payload.shipping_option_id;
    let draft = validate_order(payload)?;

    let txn = state.orm.begin().await?;

    let restaurant = Restaurants::find_by_id(restaurant_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(id) = payment_method_id {
        let method = PaymentMethods::find()
            .filter(
                Condition::all()
                    .add(PaymentCol::Id.eq(id))
                    .add(PaymentCol::RestaurantId.eq(restaurant.id)),
            )
            .one(&txn)
            .await?;
        if method.is_none() {
            return Err(AppError::bad_request(format!(
                "Payment method {id} is not offered by this restaurant"
            )));
        }
    }

    let shipping_price = match shipping_option_id {
        Some(id) => {
            let option = ShippingOptions::find()
                .filter(
                    Condition::all()
                        .add(ShippingCol::Id.eq(id))
                        .add(ShippingCol::RestaurantId.eq(restaurant.id)),
                )
                .one(&txn)
                .await?;
            match option {
                Some(option) => Some(option.price),
                None => {
                    return Err(AppError::bad_request(format!(
                        "Shipping option {id} is not offered by this restaurant"
                    )));
                }
            }
        }
        None => None,
    };

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(Some(user.user_id)),
        restaurant_id: Set(restaurant.id),
        status: Set(OrderStatus::Pending),
        total: Set(Decimal::ZERO),
        payment_method_id: Set(payment_method_id),
        shipping_option_id: Set(shipping_option_id),
        contact_name: Set(draft.contact_name),
        contact_phone: Set(draft.contact_phone),
        contact_email: Set(draft.contact_email),
        delivery_address: Set(draft.delivery_address),
        special_instructions: Set(draft.special_instructions),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut quotes = Vec::with_capacity(draft.items.len());
    for line in &draft.items {
        let product = Products::find_by_id(line.product_id).one(&txn).await?;
        match product {
            Some(product) if product.restaurant_id == restaurant.id => quotes.push(LineQuote {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            }),
            _ => {
                tracing::debug!(
                    product_id = %line.product_id,
                    restaurant_id = %restaurant.id,
                    "order rejected: unknown product"
                );
                return Err(AppError::bad_request(format!(
                    "Product {} does not exist in this restaurant",
                    line.product_id
                )));
            }
        }
    }

    let priced = price_order(&quotes, shipping_price);
    priced.ensure_storable()?;

    let mut items = Vec::with_capacity(priced.lines.len());
    for line in &priced.lines {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            subtotal: Set(line.subtotal),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(order_item_from_entity(item));
    }

    let mut active: OrderActive = order.into();
    active.total = Set(priced.total);
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = %order.id, restaurant = %restaurant.slug, total = %order.total, "order placed");
    audit::record(
        &state.pool,
        user.user_id,
        "order_create",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "restaurant_id": restaurant.id,
            "total": order.total,
        }),
    )
    .await;

    Ok(ApiResponse::ok(
        "Order created",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
    ))
}

/// Visible to the customer who placed the order and to the restaurant owner.
pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if order.customer_id != Some(user.user_id) {
        let restaurant = Restaurants::find_by_id(order.restaurant_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound)?;
        if restaurant.owner_id != user.user_id {
            return Err(AppError::Forbidden);
        }
    }

    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::ok(
        "OK",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
    ))
}

pub async fn list_my_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let condition = Condition::all().add(OrderCol::CustomerId.eq(user.user_id));
    list_orders(state, condition, &query).await
}

pub async fn list_restaurant_orders(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let condition = Condition::all().add(OrderCol::RestaurantId.eq(restaurant.id));
    list_orders(state, condition, &query).await
}

pub async fn get_restaurant_order(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let order = find_restaurant_order(state, restaurant.id, id).await?;
    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::ok(
        "OK",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
    ))
}

/// Sets any status of the enumeration; there are no transition rules.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    slug: &str,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let restaurant = owned_restaurant(state, user, slug).await?;
    let status = OrderStatus::parse(payload.status.trim()).ok_or_else(|| {
        AppError::bad_request(format!("Unknown order status '{}'", payload.status))
    })?;
    let order = find_restaurant_order(state, restaurant.id, id).await?;
    let previous = order.status;

    let mut active: OrderActive = order.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_status_update",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "from": previous.as_str(),
            "to": status.as_str(),
        }),
    )
    .await;

    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::ok(
        "Status updated",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
    ))
}

async fn list_orders(
    state: &AppState,
    mut condition: Condition,
    query: &OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::page("Orders", OrderList { items: orders }, meta))
}

async fn find_restaurant_order(
    state: &AppState,
    restaurant_id: Uuid,
    id: Uuid,
) -> AppResult<OrderModel> {
    Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::Id.eq(id))
                .add(OrderCol::RestaurantId.eq(restaurant_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

async fn load_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    Ok(OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::CreatedAt)
        .order_by_asc(OrderItemCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect())
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        customer_id: model.customer_id,
        restaurant_id: model.restaurant_id,
        status: model.status,
        total: model.total,
        payment_method_id: model.payment_method_id,
        shipping_option_id: model.shipping_option_id,
        contact_name: model.contact_name,
        contact_phone: model.contact_phone,
        contact_email: model.contact_email,
        delivery_address: model.delivery_address,
        special_instructions: model.special_instructions,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
        subtotal: model.subtotal,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<OrderLineRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            restaurant_id: Uuid::new_v4(),
            payment_method_id: None,
            shipping_option_id: None,
            contact_name: Some("  Ana ".into()),
            contact_phone: None,
            contact_email: Some("Ana@Example.com".into()),
            delivery_address: " Main St 1 ".into(),
            special_instructions: Some("".into()),
            items,
        }
    }

    fn line(quantity: i32) -> OrderLineRequest {
        OrderLineRequest {
            product_id: Uuid::new_v4(),
            quantity,
        }
    }

    #[test]
    fn valid_request_is_normalized() {
        let draft = validate_order(request(vec![line(2), line(1)])).unwrap();
        assert_eq!(draft.contact_name.as_deref(), Some("Ana"));
        assert_eq!(draft.contact_email.as_deref(), Some("ana@example.com"));
        assert_eq!(draft.delivery_address, "Main St 1");
        assert_eq!(draft.special_instructions, None);
        assert_eq!(draft.items.len(), 2);
    }

    #[test]
    fn empty_items_are_rejected() {
        assert!(matches!(
            validate_order(request(vec![])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(validate_order(request(vec![line(0)])).is_err());
        assert!(validate_order(request(vec![line(-3)])).is_err());
    }

    #[test]
    fn repeated_product_is_rejected() {
        let first = line(1);
        let again = OrderLineRequest {
            product_id: first.product_id,
            quantity: 2,
        };
        let err = validate_order(request(vec![first, again])).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn blank_address_and_bad_email_are_rejected() {
        let mut req = request(vec![line(1)]);
        req.delivery_address = "   ".into();
        assert!(validate_order(req).is_err());

        let mut req = request(vec![line(1)]);
        req.contact_email = Some("not-an-email".into());
        assert!(validate_order(req).is_err());
    }
}
