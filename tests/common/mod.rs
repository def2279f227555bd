#![allow(dead_code)]

use std::sync::Arc;

use restaurant_ordering_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::restaurants::CreateRestaurantRequest,
    entity::users::ActiveModel as UserActive,
    middleware::auth::{AuthUser, ROLE_CUSTOMER},
    services::restaurant_service,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

/// Connects to the test database, or returns `None` when none is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    Ok(Some(AppState {
        pool,
        orm,
        config: Arc::new(AppConfig {
            database_url,
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "integration-test-secret".into(),
            jwt_ttl_hours: 1,
        }),
    }))
}

/// Inserts a user with a unique email; data is never truncated between runs.
pub async fn create_user(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(format!("{}@example.test", Uuid::new_v4().simple())),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn create_customer(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, ROLE_CUSTOMER).await
}

/// Creates a restaurant owned by `owner` and returns its slug.
pub async fn create_restaurant(
    state: &AppState,
    owner: &AuthUser,
    name: &str,
) -> anyhow::Result<String> {
    let resp = restaurant_service::create_restaurant(
        state,
        owner,
        CreateRestaurantRequest {
            name: format!("{name} {}", &Uuid::new_v4().simple().to_string()[..8]),
            address: "Main Street 1".into(),
            phone: "555-0100".into(),
            description: String::new(),
            status: None,
            opening_time: None,
            closing_time: None,
            kitchen_type_ids: vec![],
        },
    )
    .await?;
    Ok(resp.data.expect("restaurant detail").restaurant.slug)
}

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}
