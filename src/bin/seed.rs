use anyhow::Context;
use restaurant_ordering_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let pool = create_pool(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&create_orm_conn(&database_url).await?).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin1234", "admin").await?;
    let owner_id = ensure_user(&pool, "owner@example.com", "owner1234", "customer").await?;
    let customer_id = ensure_user(&pool, "customer@example.com", "customer1234", "customer").await?;

    let kitchen_type_id = ensure_kitchen_type(&pool, "Italian", "italian").await?;
    let restaurant_id = ensure_restaurant(&pool, owner_id, kitchen_type_id).await?;
    seed_configuration(&pool, restaurant_id).await?;
    seed_menu(&pool, restaurant_id).await?;

    tracing::info!(
        %admin_id,
        %owner_id,
        %customer_id,
        %restaurant_id,
        "seed completed"
    );
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    tracing::info!(email, role, "ensured user");
    Ok(user_id)
}

async fn ensure_kitchen_type(pool: &sqlx::PgPool, name: &str, slug: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO kitchen_types (id, name, slug)
        VALUES ($1, $2, $3)
        ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn ensure_restaurant(
    pool: &sqlx::PgPool,
    owner_id: Uuid,
    kitchen_type_id: Uuid,
) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO restaurants (id, owner_id, name, slug, address, phone, description)
        VALUES ($1, $2, 'Demo Pizzeria', 'demo-pizzeria', 'Main Street 1', '555-0100',
                'Wood-fired pizza and fresh pasta')
        ON CONFLICT (slug) DO UPDATE SET owner_id = EXCLUDED.owner_id
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO restaurant_kitchen_types (restaurant_id, kitchen_type_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(id)
    .bind(kitchen_type_id)
    .execute(pool)
    .await?;

    tracing::info!(slug = "demo-pizzeria", "ensured restaurant");
    Ok(id)
}

async fn seed_configuration(pool: &sqlx::PgPool, restaurant_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO payment_methods (id, restaurant_id, kind, description)
        VALUES ($1, $2, 'cash', 'Pay the rider on delivery')
        ON CONFLICT (restaurant_id, kind) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO social_links (id, restaurant_id, kind, url)
        VALUES ($1, $2, 'instagram', 'https://instagram.com/demo-pizzeria')
        ON CONFLICT (restaurant_id, kind) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO shipping_options (id, restaurant_id, name, price)
        SELECT $1, $2, 'Home delivery', $3
        WHERE NOT EXISTS (
            SELECT 1 FROM shipping_options WHERE restaurant_id = $2 AND name = 'Home delivery'
        )
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(restaurant_id)
    .bind(Decimal::new(500, 2))
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_menu(pool: &sqlx::PgPool, restaurant_id: Uuid) -> anyhow::Result<()> {
    let menu = vec![
        (
            "Pizzas",
            "pizzas",
            vec![
                ("Margherita", "margherita", "Tomato, mozzarella, basil", 1000),
                ("Diavola", "diavola", "Spicy salami and chili", 1250),
            ],
        ),
        (
            "Drinks",
            "drinks",
            vec![
                ("Lemonade", "lemonade", "Fresh lemons", 350),
                ("Espresso", "espresso", "Single shot", 200),
            ],
        ),
    ];

    for (position, (name, slug, products)) in menu.into_iter().enumerate() {
        let (category_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO categories (id, restaurant_id, name, slug, position)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (restaurant_id, slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(restaurant_id)
        .bind(name)
        .bind(slug)
        .bind(position as i32)
        .fetch_one(pool)
        .await?;

        for (product_position, (product, product_slug, description, cents)) in
            products.into_iter().enumerate()
        {
            sqlx::query(
                r#"
                INSERT INTO products
                    (id, category_id, restaurant_id, name, slug, description, price, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (category_id, slug) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(category_id)
            .bind(restaurant_id)
            .bind(product)
            .bind(product_slug)
            .bind(description)
            .bind(Decimal::new(cents, 2))
            .bind(product_position as i32)
            .execute(pool)
            .await?;
        }
    }

    tracing::info!("seeded menu");
    Ok(())
}
