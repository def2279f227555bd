mod common;

use common::dec;
use restaurant_ordering_api::{
    dto::{
        categories::CreateCategoryRequest,
        orders::{CreateOrderRequest, OrderLineRequest, UpdateOrderStatusRequest},
        payment_methods::CreatePaymentMethodRequest,
        products::{CreateProductRequest, UpdateProductRequest},
        shipping_options::CreateShippingOptionRequest,
    },
    entity::sea_orm_active_enums::{OrderStatus, PaymentKind},
    error::AppError,
    routes::params::OrderListQuery,
    services::{
        category_service, dashboard_service, order_service, payment_method_service,
        product_service, restaurant_service, shipping_option_service,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

// Integration flow: owner sets up a menu -> customer orders -> owner manages the order.
#[tokio::test]
async fn order_pricing_ownership_and_dashboard_flow() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let owner = common::create_customer(&state).await?;
    let customer = common::create_customer(&state).await?;
    let stranger = common::create_customer(&state).await?;

    let slug = common::create_restaurant(&state, &owner, "Flow Pizzeria").await?;
    let restaurant_id = restaurant_service::get_restaurant(&state, &slug)
        .await?
        .data
        .unwrap()
        .restaurant
        .id;

    let shipping = shipping_option_service::create_shipping_option(
        &state,
        &owner,
        &slug,
        CreateShippingOptionRequest {
            name: "Delivery".into(),
            price: dec("5.00"),
            status: None,
        },
    )
    .await?
    .data
    .unwrap();

    let cash = payment_method_service::create_payment_method(
        &state,
        &owner,
        &slug,
        CreatePaymentMethodRequest {
            kind: PaymentKind::Cash,
            description: "On delivery".into(),
            position: 0,
            active: None,
            config: None,
        },
    )
    .await?
    .data
    .unwrap();

    let category = category_service::create_category(
        &state,
        &owner,
        &slug,
        CreateCategoryRequest {
            name: "Mains".into(),
            description: None,
            position: 0,
            active: None,
        },
    )
    .await?
    .data
    .unwrap();

    let product = |name: &str, price: &str| CreateProductRequest {
        name: name.into(),
        description: None,
        price: dec(price),
        active: None,
        availability: None,
        position: 0,
        featured: false,
    };
    let pizza = product_service::create_product(
        &state,
        &owner,
        &slug,
        category.id,
        product("Pizza", "10.00"),
    )
    .await?
    .data
    .unwrap();
    let soda = product_service::create_product(
        &state,
        &owner,
        &slug,
        category.id,
        product("Soda", "3.50"),
    )
    .await?
    .data
    .unwrap();

    let order_request = |items: Vec<OrderLineRequest>| CreateOrderRequest {
        restaurant_id,
        payment_method_id: Some(cash.id),
        shipping_option_id: Some(shipping.id),
        contact_name: Some("Ana".into()),
        contact_phone: None,
        contact_email: Some("ana@example.com".into()),
        delivery_address: "Elm Street 5".into(),
        special_instructions: None,
        items,
    };

    // Totals: 2 x 10.00 + 1 x 3.50 + 5.00 shipping.
    let placed = order_service::create_order(
        &state,
        &customer,
        order_request(vec![
            OrderLineRequest {
                product_id: pizza.id,
                quantity: 2,
            },
            OrderLineRequest {
                product_id: soda.id,
                quantity: 1,
            },
        ]),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(placed.order.total, dec("28.50"));
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.customer_id, Some(customer.user_id));
    let pizza_line = placed.items.iter().find(|i| i.product_id == pizza.id).unwrap();
    assert_eq!(pizza_line.unit_price, dec("10.00"));
    assert_eq!(pizza_line.subtotal, dec("20.00"));
    let soda_line = placed.items.iter().find(|i| i.product_id == soda.id).unwrap();
    assert_eq!(soda_line.subtotal, dec("3.50"));

    // A later price change leaves the captured unit price alone.
    product_service::update_product(
        &state,
        &owner,
        &slug,
        category.id,
        pizza.id,
        UpdateProductRequest {
            price: Some(dec("12.00")),
            ..Default::default()
        },
    )
    .await?;
    let reread = order_service::get_order(&state, &customer, placed.order.id)
        .await?
        .data
        .unwrap();
    let pizza_line = reread.items.iter().find(|i| i.product_id == pizza.id).unwrap();
    assert_eq!(pizza_line.unit_price, dec("10.00"));
    assert_eq!(reread.order.total, dec("28.50"));

    // Lines written in one transaction come back in a stable order.
    let line_ids: Vec<Uuid> = reread.items.iter().map(|i| i.id).collect();
    let mut sorted = line_ids.clone();
    sorted.sort();
    assert_eq!(line_ids, sorted);

    // An unknown product rolls back the whole order.
    let before = order_counts(&state.pool, restaurant_id).await?;
    let missing = order_service::create_order(
        &state,
        &customer,
        order_request(vec![
            OrderLineRequest {
                product_id: soda.id,
                quantity: 1,
            },
            OrderLineRequest {
                product_id: Uuid::new_v4(),
                quantity: 1,
            },
        ]),
    )
    .await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));
    assert_eq!(order_counts(&state.pool, restaurant_id).await?, before);

    // Each price fits a money column, but the line subtotal would not.
    let banquet = product_service::create_product(
        &state,
        &owner,
        &slug,
        category.id,
        product("Banquet", "60000000.00"),
    )
    .await?
    .data
    .unwrap();
    let oversized = order_service::create_order(
        &state,
        &customer,
        order_request(vec![OrderLineRequest {
            product_id: banquet.id,
            quantity: 2,
        }]),
    )
    .await;
    assert!(matches!(oversized, Err(AppError::BadRequest(_))));
    assert_eq!(order_counts(&state.pool, restaurant_id).await?, before);

    // Payment methods of another restaurant are refused.
    let other_slug = common::create_restaurant(&state, &stranger, "Other Diner").await?;
    let foreign_cash = payment_method_service::create_payment_method(
        &state,
        &stranger,
        &other_slug,
        CreatePaymentMethodRequest {
            kind: PaymentKind::Cash,
            description: String::new(),
            position: 0,
            active: None,
            config: None,
        },
    )
    .await?
    .data
    .unwrap();
    let mut foreign = order_request(vec![OrderLineRequest {
        product_id: soda.id,
        quantity: 1,
    }]);
    foreign.payment_method_id = Some(foreign_cash.id);
    let foreign = order_service::create_order(&state, &customer, foreign).await;
    assert!(matches!(foreign, Err(AppError::BadRequest(_))));

    // Visibility: customer and owner yes, anyone else no.
    assert!(order_service::get_order(&state, &owner, placed.order.id).await.is_ok());
    assert!(matches!(
        order_service::get_order(&state, &stranger, placed.order.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        order_service::get_restaurant_order(&state, &stranger, &slug, placed.order.id).await,
        Err(AppError::Forbidden)
    ));
    // The order exists, but not in the stranger's restaurant.
    assert!(matches!(
        order_service::get_restaurant_order(&state, &stranger, &other_slug, placed.order.id)
            .await,
        Err(AppError::NotFound)
    ));

    let mine = order_service::list_my_orders(&state, &customer, OrderListQuery::default())
        .await?
        .data
        .unwrap();
    assert!(mine.items.iter().any(|o| o.id == placed.order.id));

    // Status updates: owner only, enumeration values only.
    let status = |value: &str| UpdateOrderStatusRequest {
        status: value.into(),
    };
    assert!(matches!(
        order_service::update_order_status(
            &state,
            &stranger,
            &slug,
            placed.order.id,
            status("delivered")
        )
        .await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        order_service::update_order_status(
            &state,
            &owner,
            &slug,
            placed.order.id,
            status("shipped")
        )
        .await,
        Err(AppError::BadRequest(_))
    ));
    let delivered = order_service::update_order_status(
        &state,
        &owner,
        &slug,
        placed.order.id,
        status("delivered"),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(delivered.order.status, OrderStatus::Delivered);

    let delivered_only = order_service::list_restaurant_orders(
        &state,
        &owner,
        &slug,
        OrderListQuery {
            status: Some(OrderStatus::Delivered),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(delivered_only.items.len(), 1);

    let summary = dashboard_service::summary(&state, &owner, &slug)
        .await?
        .data
        .unwrap();
    assert_eq!(summary.count_for(OrderStatus::Delivered), 1);
    assert_eq!(summary.count_for(OrderStatus::Pending), 0);
    assert_eq!(summary.orders_today, 1);
    assert_eq!(summary.revenue_today, dec("28.50"));
    assert_eq!(summary.recent_orders.len(), 1);
    assert!(matches!(
        dashboard_service::summary(&state, &stranger, &slug).await,
        Err(AppError::Forbidden)
    ));

    // Ordered data is protected from deletion.
    assert!(matches!(
        product_service::delete_product(&state, &owner, &slug, category.id, pizza.id).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        restaurant_service::delete_restaurant(&state, &owner, &slug).await,
        Err(AppError::BadRequest(_))
    ));

    // Removing the shipping option keeps the order total.
    shipping_option_service::delete_shipping_option(&state, &owner, &slug, shipping.id).await?;
    let after = order_service::get_order(&state, &customer, placed.order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(after.order.shipping_option_id, None);
    assert_eq!(after.order.total, dec("28.50"));

    Ok(())
}

/// Orders and line items currently stored for one restaurant.
async fn order_counts(pool: &PgPool, restaurant_id: Uuid) -> anyhow::Result<(i64, i64)> {
    let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE restaurant_id = $1")
        .bind(restaurant_id)
        .fetch_one(pool)
        .await?;
    let (items,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        WHERE o.restaurant_id = $1
        "#,
    )
    .bind(restaurant_id)
    .fetch_one(pool)
    .await?;
    Ok((orders, items))
}
