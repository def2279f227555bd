mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use restaurant_ordering_api::{
    dto::restaurants::CreateRestaurantRequest,
    routes,
    services::{auth_service::issue_token, restaurant_service},
};
use serde_json::Value;
use tower::ServiceExt;

async fn send(app: &axum::Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

// A restaurant literally called "Mine" must stay reachable next to `/restaurants/mine`.
#[tokio::test]
async fn restaurant_named_like_a_route_stays_reachable() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let owner = common::create_customer(&state).await?;
    let app = routes::app(state.clone());

    let created = restaurant_service::create_restaurant(
        &state,
        &owner,
        CreateRestaurantRequest {
            name: "Mine".into(),
            address: "Quarry Road 2".into(),
            phone: "555-0199".into(),
            description: String::new(),
            status: None,
            opening_time: None,
            closing_time: None,
            kitchen_type_ids: vec![],
        },
    )
    .await?
    .data
    .unwrap()
    .restaurant;
    assert_ne!(created.slug, "mine");
    assert!(created.slug.starts_with("mine-"));

    let (status, body) = send(&app, get(&format!("/api/restaurants/{}", created.slug))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["restaurant"]["id"], created.id.to_string());

    // `/mine` is still the caller's list and needs a token.
    let (status, _) = send(&app, get("/api/restaurants/mine")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let token = issue_token(
        owner.user_id,
        &owner.role,
        &state.config.jwt_secret,
        1,
    )?
    .token;
    let request = Request::builder()
        .uri("/api/restaurants/mine")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())?;
    let (status, body) = send(&app, request).await?;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body["data"]["items"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|r| r["slug"].as_str())
        .collect();
    assert_eq!(slugs, vec![created.slug.as_str()]);

    Ok(())
}

#[tokio::test]
async fn unknown_route_answers_with_json_envelope() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let app = routes::app(state);

    let response = app.clone().oneshot(get("/api/nowhere")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/api/nowhere");
    Ok(())
}
