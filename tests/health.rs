mod common;

use axum::extract::State;
use restaurant_ordering_api::routes::{doc::ApiDoc, health::health_check};
use utoipa::OpenApi;

#[tokio::test]
async fn health_check_reports_database() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let response = health_check(State(state)).await?;
    assert_eq!(response.0.message, "Health check");
    assert!(response.0.data.is_some());
    Ok(())
}

#[test]
fn openapi_document_serializes() {
    let json = ApiDoc::openapi().to_json().expect("openapi json");
    assert!(json.contains("/api/restaurants/{slug}/menu"));
    assert!(json.contains("bearer_auth"));
}
