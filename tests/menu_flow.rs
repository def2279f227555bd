mod common;

use common::dec;
use restaurant_ordering_api::{
    dto::{
        categories::{CreateCategoryRequest, UpdateCategoryRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        restaurants::UpdateRestaurantRequest,
        social_links::CreateSocialLinkRequest,
    },
    entity::sea_orm_active_enums::SocialNetwork,
    error::AppError,
    routes::params::Pagination,
    services::{
        category_service, menu_service, product_service, restaurant_service, social_link_service,
    },
};

fn category(name: &str) -> CreateCategoryRequest {
    CreateCategoryRequest {
        name: name.into(),
        description: None,
        position: 0,
        active: None,
    }
}

fn product(name: &str, price: &str, active: bool) -> CreateProductRequest {
    CreateProductRequest {
        name: name.into(),
        description: Some("House special".into()),
        price: dec(price),
        active: Some(active),
        availability: None,
        position: 0,
        featured: false,
    }
}

// Integration flow: slugs, tenant isolation and the public menu.
#[tokio::test]
async fn menu_slugs_and_tenant_isolation_flow() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let owner = common::create_customer(&state).await?;
    let stranger = common::create_customer(&state).await?;
    let slug = common::create_restaurant(&state, &owner, "Menu House").await?;
    let stranger_slug = common::create_restaurant(&state, &stranger, "Stranger Grill").await?;

    // Same name twice in one restaurant.
    let first = category_service::create_category(&state, &owner, &slug, category("Pizza"))
        .await?
        .data
        .unwrap();
    let second = category_service::create_category(&state, &owner, &slug, category("Pizza"))
        .await?
        .data
        .unwrap();
    assert_eq!(first.slug, "pizza");
    assert_eq!(second.slug, "pizza-1");

    // Another restaurant starts its own slug scope.
    let elsewhere =
        category_service::create_category(&state, &stranger, &stranger_slug, category("Pizza"))
            .await?
            .data
            .unwrap();
    assert_eq!(elsewhere.slug, "pizza");

    // Renaming keeps the slug.
    let renamed = category_service::update_category(
        &state,
        &owner,
        &slug,
        first.id,
        UpdateCategoryRequest {
            name: Some("Pizzas".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(renamed.slug, "pizza");

    let margherita =
        product_service::create_product(&state, &owner, &slug, first.id, product("Margherita", "9.00", true))
            .await?
            .data
            .unwrap();
    let hidden =
        product_service::create_product(&state, &owner, &slug, first.id, product("Secret", "4.00", false))
            .await?
            .data
            .unwrap();
    let parked = product_service::create_product(
        &state,
        &owner,
        &slug,
        second.id,
        product("Margherita", "9.50", true),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(margherita.slug, "margherita");
    assert_eq!(parked.slug, "margherita");

    category_service::update_category(
        &state,
        &owner,
        &slug,
        second.id,
        UpdateCategoryRequest {
            active: Some(false),
            ..Default::default()
        },
    )
    .await?;

    // Public menu: active categories, active products only.
    let menu = menu_service::get_menu(&state, &slug).await?.data.unwrap();
    assert_eq!(menu.sections.len(), 1);
    assert_eq!(menu.sections[0].category.id, first.id);
    let visible: Vec<_> = menu.sections[0].products.iter().map(|p| p.id).collect();
    assert_eq!(visible, vec![margherita.id]);

    assert!(menu_service::get_menu_product(&state, &slug, margherita.id).await.is_ok());
    assert!(matches!(
        menu_service::get_menu_product(&state, &slug, hidden.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        menu_service::get_menu_product(&state, &stranger_slug, margherita.id).await,
        Err(AppError::NotFound)
    ));

    let all = menu_service::list_restaurant_products(&state, &slug, Pagination::default())
        .await?;
    assert_eq!(all.meta.as_ref().and_then(|m| m.total), Some(3));

    // Ownership runs before the nested lookup.
    assert!(matches!(
        category_service::get_category(&state, &stranger, &slug, first.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        product_service::get_product(&state, &stranger, &slug, first.id, margherita.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        restaurant_service::update_restaurant(
            &state,
            &stranger,
            &slug,
            UpdateRestaurantRequest::default()
        )
        .await,
        Err(AppError::Forbidden)
    ));

    // Ids from another tenant are not found in the caller's own restaurant.
    assert!(matches!(
        category_service::get_category(&state, &stranger, &stranger_slug, first.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        category_service::delete_category(&state, &stranger, &stranger_slug, first.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        product_service::get_product(&state, &owner, &slug, second.id, margherita.id).await,
        Err(AppError::NotFound)
    ));

    // Moving a product re-resolves its slug in the target category.
    let moved = product_service::update_product(
        &state,
        &owner,
        &slug,
        first.id,
        margherita.id,
        UpdateProductRequest {
            category_id: Some(second.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(moved.category_id, second.id);
    assert_eq!(moved.slug, "margherita-1");

    // Moving into another restaurant's category is not allowed.
    assert!(matches!(
        product_service::update_product(
            &state,
            &owner,
            &slug,
            second.id,
            margherita.id,
            UpdateProductRequest {
                category_id: Some(elsewhere.id),
                ..Default::default()
            },
        )
        .await,
        Err(AppError::NotFound)
    ));

    assert!(matches!(
        product_service::update_product(
            &state,
            &owner,
            &slug,
            second.id,
            margherita.id,
            UpdateProductRequest {
                price: Some(dec("-1.00")),
                ..Default::default()
            },
        )
        .await,
        Err(AppError::BadRequest(_))
    ));

    // One link per network, http(s) only.
    let link = |kind: SocialNetwork, url: &str| CreateSocialLinkRequest {
        kind,
        url: url.into(),
        position: 0,
        active: None,
    };
    social_link_service::create_social_link(
        &state,
        &owner,
        &slug,
        link(SocialNetwork::Instagram, "https://instagram.com/menu-house"),
    )
    .await?;
    assert!(matches!(
        social_link_service::create_social_link(
            &state,
            &owner,
            &slug,
            link(SocialNetwork::Instagram, "https://instagram.com/other"),
        )
        .await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        social_link_service::create_social_link(
            &state,
            &owner,
            &slug,
            link(SocialNetwork::Facebook, "ftp://facebook.com/menu-house"),
        )
        .await,
        Err(AppError::BadRequest(_))
    ));

    let detail = restaurant_service::get_restaurant(&state, &slug)
        .await?
        .data
        .unwrap();
    assert_eq!(detail.social_links.len(), 1);

    // Unordered categories can be removed along with their products.
    category_service::delete_category(&state, &owner, &slug, second.id).await?;
    assert!(matches!(
        product_service::get_product(&state, &owner, &slug, second.id, margherita.id).await,
        Err(AppError::NotFound)
    ));

    // A restaurant without orders can be deleted.
    restaurant_service::delete_restaurant(&state, &stranger, &stranger_slug).await?;
    assert!(matches!(
        restaurant_service::get_restaurant(&state, &stranger_slug).await,
        Err(AppError::NotFound)
    ));

    Ok(())
}
